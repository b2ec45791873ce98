//! Cart route handlers.
//!
//! The cart lives in the visitor's session. Each form post loads it,
//! applies one change, saves it, and redirects back with a message code.

use std::num::NonZeroU32;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::Redirect,
};
use botanical_core::{Cart, CartItem, CartTotals, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::PurchaseError;
use crate::client_state;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::messages::{self, MessageKind, MessageQuery, safe_return_path};
use crate::middleware::OptionalAuth;
use crate::routes::PageContext;
use crate::state::AppState;

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
///
/// Grid cards send only the product id. The product page also sends the
/// chosen size, pot style, and quantity.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub pot_style: Option<String>,
    pub quantity: Option<String>,
    pub return_to: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Parse a quantity field. Blank or malformed input reads as 0.
fn parse_quantity(raw: &str) -> u32 {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}

const fn purchase_error_code(error: PurchaseError) -> &'static str {
    match error {
        PurchaseError::MissingSelection => "select_variant",
        PurchaseError::VariantUnavailable => "variant_unavailable",
        PurchaseError::QuantityTooLow => "quantity_low",
        PurchaseError::ExceedsStock => "exceeds_stock",
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartTemplate {
    pub ctx: PageContext,
    pub cart: Cart,
    pub totals: CartTotals,
}

/// Checkout summary template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/checkout.html")]
pub struct CheckoutTemplate {
    pub ctx: PageContext,
    pub cart: Cart,
    pub totals: CartTotals,
}

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Display the cart page.
#[instrument(skip(session, user, query))]
pub async fn show(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<CartTemplate> {
    let cart = client_state::load_cart(&session).await?;
    Ok(CartTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
        totals: cart.totals(),
        cart,
    })
}

/// Add a product to the cart.
#[instrument(skip(state, session, form), fields(product_id = %form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let back = safe_return_path(form.return_to.as_deref(), "/cart");

    let Ok(detail) = state.catalog().product_detail(form.product_id).await else {
        tracing::warn!("Add to cart for unknown product");
        return Ok(messages::error(back, "product_not_found"));
    };

    let from_product_page =
        form.size.is_some() || form.pot_style.is_some() || form.quantity.is_some();

    let (item, quantity) = if from_product_page {
        let quantity = form.quantity.as_deref().map_or(1, parse_quantity);
        match detail.purchase(form.size.as_deref(), form.pot_style.as_deref(), quantity) {
            Ok(purchase) => purchase,
            Err(error) => {
                tracing::warn!(%error, "Rejected add to cart");
                return Ok(messages::error(back, purchase_error_code(error)));
            }
        }
    } else {
        let item = CartItem::from(detail.product.to_wishlist_item());
        (item, NonZeroU32::MIN)
    };

    let name = item.name.clone();
    let mut cart = client_state::load_cart(&session).await?;
    let total = cart.add_quantity(item, quantity);
    client_state::save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[
            ("product_id", form.product_id.to_string()),
            ("quantity", total.to_string()),
        ],
    );
    tracing::info!(quantity = %total, "Added to cart");

    Ok(messages::redirect_with(
        back,
        MessageKind::Success,
        "cart_added",
        Some(&name),
    ))
}

/// Update the quantity of a cart line.
///
/// A quantity below 1 is rejected and the cart is left as it was.
#[instrument(skip(session, form), fields(product_id = %form.product_id))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let Some(quantity) = NonZeroU32::new(parse_quantity(&form.quantity)) else {
        return Ok(messages::error("/cart", "quantity_min"));
    };

    let mut cart = client_state::load_cart(&session).await?;
    if !cart.update_quantity(form.product_id, quantity) {
        return Ok(messages::error("/cart", "not_in_cart"));
    }
    client_state::save_cart(&session, &cart).await?;

    tracing::info!(%quantity, "Updated cart quantity");
    Ok(messages::success("/cart", "cart_updated"))
}

/// Remove a line from the cart.
#[instrument(skip(session, form), fields(product_id = %form.product_id))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let mut cart = client_state::load_cart(&session).await?;
    let Some(removed) = cart.remove(form.product_id) else {
        return Ok(messages::error("/cart", "not_in_cart"));
    };
    client_state::save_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Removed from cart",
        &[("product_id", form.product_id.to_string())],
    );
    Ok(messages::redirect_with(
        "/cart",
        MessageKind::Success,
        "cart_removed",
        Some(&removed.name),
    ))
}

/// Cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<CartCountTemplate> {
    let cart = client_state::load_cart(&session).await?;
    Ok(CartCountTemplate {
        count: cart.total_items(),
    })
}

/// Proceed from the cart page. An empty cart stays on the cart page.
#[instrument(skip(session))]
pub async fn begin_checkout(session: Session) -> Result<Redirect> {
    let cart = client_state::load_cart(&session).await?;
    if cart.is_empty() {
        return Ok(messages::error("/cart", "cart_empty"));
    }
    add_breadcrumb(
        "checkout",
        "Checkout started",
        &[("items", cart.total_items().to_string())],
    );
    Ok(Redirect::to("/checkout"))
}

/// Checkout summary. No payment is taken.
#[instrument(skip(session, user, query))]
pub async fn checkout(
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Query(query): Query<MessageQuery>,
) -> Result<CheckoutTemplate> {
    let cart = client_state::load_cart(&session).await?;
    Ok(CheckoutTemplate {
        ctx: PageContext::load(&session, user, &query).await?,
        totals: cart.totals(),
        cart,
    })
}
