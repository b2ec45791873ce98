//! Product detail page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use botanical_core::{Page, ProductId, TemplateArg};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{PotStyle, Product, ProductDetail, ProductVariant, Review, Size};
use crate::client_state;
use crate::error::{AppError, Result};
use crate::filters;
use crate::messages::{self, MessageQuery};
use crate::middleware::OptionalAuth;
use crate::routes::PageContext;
use crate::state::AppState;

/// Number of related products shown under the detail.
const RELATED_COUNT: usize = 4;

/// Variant selection and review page.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub size: Option<String>,
    pub pot: Option<String>,
    pub reviews_page: Option<usize>,
}

/// Review form data.
#[derive(Debug, Deserialize)]
pub struct ReviewForm {
    pub rating: u8,
    pub comment: String,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "store/product.html")]
pub struct ProductTemplate {
    pub ctx: PageContext,
    pub detail: ProductDetail,
    pub selected: Option<ProductVariant>,
    pub sizes: [Size; 4],
    pub pot_styles: [PotStyle; 3],
    pub reviews: Page<Review>,
    pub related: Vec<Product>,
    pub in_wishlist: bool,
    pub return_to: String,
}

impl ProductTemplate {
    #[must_use]
    pub fn is_selected_size(&self, size: impl TemplateArg<Size>) -> bool {
        self.selected.as_ref().is_some_and(|v| v.size == size.resolve())
    }

    #[must_use]
    pub fn is_selected_pot(&self, pot: impl TemplateArg<PotStyle>) -> bool {
        self.selected.as_ref().is_some_and(|v| v.pot_style == pot.resolve())
    }

    /// Stock available for the current selection.
    #[must_use]
    pub fn available_stock(&self) -> u32 {
        self.selected.as_ref().map_or(self.detail.stock, |v| v.stock)
    }

    #[must_use]
    pub fn reviews_href(&self, page: impl TemplateArg<usize>) -> String {
        format!(
            "/store/product/{}?reviews_page={}#reviews",
            self.detail.product.id,
            page.resolve()
        )
    }
}

fn parse_product_id(raw: &str) -> Result<ProductId> {
    raw.parse()
        .map_err(|_| AppError::NotFound(format!("product {raw}")))
}

/// Display a product.
#[instrument(skip(state, session, user, query, messages))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<String>,
    Query(query): Query<ProductQuery>,
    Query(messages): Query<MessageQuery>,
) -> Result<ProductTemplate> {
    let id = parse_product_id(&id)?;
    let detail = state.catalog().product_detail(id).await?;
    let related = state.catalog().related(id, RELATED_COUNT).await;

    let selected = match (query.size.as_deref(), query.pot.as_deref()) {
        (Some(size), Some(pot)) => detail.variant(size, pot).cloned(),
        _ => detail.default_variant().cloned(),
    };
    let reviews = detail.review_page(query.reviews_page.unwrap_or(1));
    let in_wishlist = client_state::load_wishlist(&session).await?.contains(id);

    Ok(ProductTemplate {
        ctx: PageContext::load(&session, user, &messages).await?,
        return_to: format!("/store/product/{id}"),
        selected,
        sizes: Size::ALL,
        pot_styles: PotStyle::ALL,
        reviews,
        related,
        in_wishlist,
        detail,
    })
}

/// Accept a review. Nothing is stored.
#[instrument(skip(state, form))]
pub async fn submit_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ReviewForm>,
) -> Result<Redirect> {
    let id = parse_product_id(&id)?;
    let product = state.catalog().product(id).await?;
    let back = format!("/store/product/{id}#reviews");

    if form.comment.trim().is_empty() || !(1..=5).contains(&form.rating) {
        return Ok(messages::error(&back, "review_incomplete"));
    }

    tracing::info!(product_id = %product.id, rating = form.rating, "Review submitted");
    Ok(messages::success(&back, "review_submitted"))
}
