//! Wishlist route handlers.
//!
//! The wishlist is stored in the session as JSON text. The page is served
//! both at `/wishlist` and, for signed-in visitors, at `/profile/wishlist`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use botanical_core::{
    ProductId, SessionUser, SortDirection, TemplateArg, WishlistItem, listing::compare_text,
    matches_query,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::client_state;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::messages::{self, MessageKind, MessageQuery, safe_return_path};
use crate::middleware::OptionalAuth;
use crate::routes::PageContext;
use crate::state::AppState;

/// Sort column for the wishlist page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistSort {
    #[default]
    Name,
    Price,
}

impl WishlistSort {
    pub const ALL: [Self; 2] = [Self::Name, Self::Price];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Name => "Sort by Name",
            Self::Price => "Sort by Price",
        }
    }
}

/// Search and sort chosen on the wishlist page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WishlistFilter {
    pub q: String,
    pub sort: WishlistSort,
    pub dir: SortDirection,
}

impl WishlistFilter {
    /// Filter by name and sort.
    #[must_use]
    pub fn apply(&self, items: &[WishlistItem]) -> Vec<WishlistItem> {
        let mut items: Vec<_> = items
            .iter()
            .filter(|item| matches_query(&self.q, &[&item.name]))
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            let ordering = match self.sort {
                WishlistSort::Name => compare_text(&a.name, &b.name),
                WishlistSort::Price => a.price.cmp(&b.price),
            };
            self.dir.apply(ordering)
        });
        items
    }

    #[must_use]
    pub fn is_sort(&self, sort: impl TemplateArg<WishlistSort>) -> bool {
        self.sort == sort.resolve()
    }
}

/// Wishlist form data.
#[derive(Debug, Deserialize)]
pub struct WishlistForm {
    pub product_id: ProductId,
    pub return_to: Option<String>,
}

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/index.html")]
pub struct WishlistTemplate {
    pub ctx: PageContext,
    pub filter: WishlistFilter,
    pub items: Vec<WishlistItem>,
    pub total: usize,
    pub sorts: [WishlistSort; 2],
    /// Path the page is served at, used for form actions and redirects.
    pub base_path: &'static str,
}

/// Build the wishlist page for either mount point.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn render(
    session: &Session,
    user: Option<SessionUser>,
    filter: WishlistFilter,
    messages: &MessageQuery,
    base_path: &'static str,
) -> Result<WishlistTemplate> {
    let wishlist = client_state::load_wishlist(session).await?;
    Ok(WishlistTemplate {
        ctx: PageContext::load(session, user, messages).await?,
        items: filter.apply(wishlist.items()),
        total: wishlist.len(),
        sorts: WishlistSort::ALL,
        filter,
        base_path,
    })
}

/// Display the wishlist page.
#[instrument(skip(session, user, filter, messages))]
pub async fn show(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(filter): Query<WishlistFilter>,
    Query(messages): Query<MessageQuery>,
) -> Result<WishlistTemplate> {
    render(&session, user, filter, &messages, "/wishlist").await
}

async fn lookup(state: &AppState, id: ProductId) -> Option<WishlistItem> {
    match state.catalog().product(id).await {
        Ok(product) => Some(product.to_wishlist_item()),
        Err(error) => {
            tracing::warn!(%error, "Wishlist change for unknown product");
            None
        }
    }
}

/// Add a product to the wishlist. Adding twice changes nothing.
#[instrument(skip(state, session, form), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect> {
    let back = safe_return_path(form.return_to.as_deref(), "/wishlist");
    let Some(item) = lookup(&state, form.product_id).await else {
        return Ok(messages::error(back, "wishlist_failed"));
    };

    let name = item.name.clone();
    let mut wishlist = client_state::load_wishlist(&session).await?;
    if wishlist.add(item) {
        client_state::save_wishlist(&session, &wishlist).await?;
        add_breadcrumb(
            "wishlist",
            "Added to wishlist",
            &[("product_id", form.product_id.to_string())],
        );
    }

    Ok(messages::redirect_with(
        back,
        MessageKind::Success,
        "wishlist_added",
        Some(&name),
    ))
}

/// Remove a product from the wishlist.
#[instrument(skip(session, form), fields(product_id = %form.product_id))]
pub async fn remove(session: Session, Form(form): Form<WishlistForm>) -> Result<Redirect> {
    let back = safe_return_path(form.return_to.as_deref(), "/wishlist");
    let mut wishlist = client_state::load_wishlist(&session).await?;
    let removed = wishlist.remove(form.product_id);
    if removed.is_some() {
        client_state::save_wishlist(&session, &wishlist).await?;
    }

    Ok(messages::redirect_with(
        back,
        MessageKind::Success,
        "wishlist_removed",
        removed.as_ref().map(|item| item.name.as_str()),
    ))
}

/// Add the product if absent, otherwise remove it.
#[instrument(skip(state, session, form), fields(product_id = %form.product_id))]
pub async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WishlistForm>,
) -> Result<Redirect> {
    let back = safe_return_path(form.return_to.as_deref(), "/wishlist");
    let Some(item) = lookup(&state, form.product_id).await else {
        return Ok(messages::error(back, "wishlist_failed"));
    };

    let name = item.name.clone();
    let mut wishlist = client_state::load_wishlist(&session).await?;
    let added = wishlist.toggle(item);
    client_state::save_wishlist(&session, &wishlist).await?;

    let code = if added { "wishlist_added" } else { "wishlist_removed" };
    Ok(messages::redirect_with(
        back,
        MessageKind::Success,
        code,
        Some(&name),
    ))
}

/// Form data for clearing the wishlist.
#[derive(Debug, Default, Deserialize)]
pub struct ClearForm {
    pub return_to: Option<String>,
}

/// Remove every item from the wishlist.
#[instrument(skip(session, form))]
pub async fn clear(session: Session, Form(form): Form<ClearForm>) -> Result<Redirect> {
    let back = safe_return_path(form.return_to.as_deref(), "/wishlist");
    let mut wishlist = client_state::load_wishlist(&session).await?;
    wishlist.clear();
    client_state::save_wishlist(&session, &wishlist).await?;
    Ok(messages::success(back, "wishlist_cleared"))
}

#[cfg(test)]
mod tests {
    use botanical_core::Price;

    use super::*;

    fn item(id: i32, name: &str, cents: i64) -> WishlistItem {
        WishlistItem {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Price::from_cents(cents),
            image: String::new(),
            alt: String::new(),
        }
    }

    fn names(items: &[WishlistItem]) -> Vec<&str> {
        items.iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_name_ascending() {
        let items = [item(1, "snake plant", 2999), item(2, "Aloe Vera", 1599)];
        let sorted = WishlistFilter::default().apply(&items);
        assert_eq!(names(&sorted), ["Aloe Vera", "snake plant"]);
    }

    #[test]
    fn test_sort_by_price_descending_and_search() {
        let items = [
            item(1, "Snake Plant", 2999),
            item(2, "Aloe Vera", 1599),
            item(3, "Olive Tree", 14999),
        ];
        let filter = WishlistFilter {
            sort: WishlistSort::Price,
            dir: SortDirection::Desc,
            ..WishlistFilter::default()
        };
        assert_eq!(
            names(&filter.apply(&items)),
            ["Olive Tree", "Snake Plant", "Aloe Vera"]
        );

        let search = WishlistFilter {
            q: "PLANT".to_string(),
            ..WishlistFilter::default()
        };
        assert_eq!(names(&search.apply(&items)), ["Snake Plant"]);
    }
}
