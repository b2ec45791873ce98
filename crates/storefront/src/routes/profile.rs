//! Profile route handlers.
//!
//! Every page here requires a signed-in visitor. Addresses, cards, and
//! preferences live in the session's account book; order history comes
//! from the catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use botanical_core::{
    AccountBook, AccountError, AddressId, OrderStatus, PaymentMethodId, Preference, SessionUser,
    SortDirection, TemplateArg,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::{CustomerOrder, OrderFilter, OrderSort};
use crate::client_state;
use crate::error::Result;
use crate::filters;
use crate::messages::{self, MessageQuery};
use crate::middleware::RequireAuth;
use crate::routes::PageContext;
use crate::routes::wishlist::{self, WishlistFilter, WishlistTemplate};
use crate::services::auth::{self, AuthError};
use crate::state::AppState;

/// Orders shown on the overview page.
const RECENT_ORDERS: usize = 2;

// =============================================================================
// Templates
// =============================================================================

/// Profile overview template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/overview.html")]
pub struct OverviewTemplate {
    pub ctx: PageContext,
    pub user: SessionUser,
    pub recent_orders: Vec<CustomerOrder>,
    pub order_count: usize,
    pub book: AccountBook,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/orders.html")]
pub struct OrdersTemplate {
    pub ctx: PageContext,
    pub filter: OrderFilter,
    pub orders: Vec<CustomerOrder>,
    pub statuses: &'static [OrderStatus],
}

impl OrdersTemplate {
    #[must_use]
    pub fn is_status(&self, status: impl TemplateArg<OrderStatus>) -> bool {
        self.filter.status.eq_ignore_ascii_case(status.resolve().as_str())
    }

    #[must_use]
    pub fn is_sort(&self, sort: OrderSort) -> bool {
        self.filter.sort == sort
    }

    #[must_use]
    pub fn is_desc(&self) -> bool {
        self.filter.direction() == SortDirection::Desc
    }
}

/// Saved addresses template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/addresses.html")]
pub struct AddressesTemplate {
    pub ctx: PageContext,
    pub book: AccountBook,
}

/// Saved cards template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/payment_methods.html")]
pub struct PaymentMethodsTemplate {
    pub ctx: PageContext,
    pub book: AccountBook,
}

/// Account settings template.
#[derive(Template, WebTemplate)]
#[template(path = "profile/settings.html")]
pub struct SettingsTemplate {
    pub ctx: PageContext,
    pub user: SessionUser,
    pub book: AccountBook,
    pub preferences: [Preference; 6],
}

impl SettingsTemplate {
    #[must_use]
    pub fn is_on(&self, preference: impl TemplateArg<Preference>) -> bool {
        self.book.preferences.get(preference.resolve())
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// Preference switch form data.
#[derive(Debug, Deserialize)]
pub struct PreferenceForm {
    pub preference: String,
}

/// Password change form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

const fn account_error_code(error: &AccountError) -> &'static str {
    match error {
        AccountError::AddressNotFound(_) | AccountError::PaymentMethodNotFound(_) => {
            "account_not_found"
        }
        AccountError::DefaultAddress => "address_is_default",
        AccountError::DefaultPaymentMethod => "payment_is_default",
        AccountError::UnknownPreference(_) => "unknown_setting",
    }
}

/// Load the account book, apply `change`, and save it when it succeeds.
async fn update_account<T>(
    state: &AppState,
    session: &Session,
    change: impl FnOnce(&mut AccountBook) -> std::result::Result<T, AccountError>,
) -> Result<std::result::Result<T, AccountError>> {
    let mut book = client_state::load_account(session, state.catalog()).await?;
    let outcome = change(&mut book);
    if outcome.is_ok() {
        client_state::save_account(session, &book).await?;
    }
    Ok(outcome)
}

fn redirect_for<T>(
    outcome: std::result::Result<T, AccountError>,
    path: &str,
    success: &str,
) -> Redirect {
    match outcome {
        Ok(_) => messages::success(path, success),
        Err(error) => {
            tracing::warn!(%error, "Account change rejected");
            messages::error(path, account_error_code(&error))
        }
    }
}

// =============================================================================
// Overview and Orders
// =============================================================================

/// Profile overview.
#[instrument(skip(state, session, user, query))]
pub async fn overview(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<OverviewTemplate> {
    let orders = state.catalog().customer_orders().await;
    let order_count = orders.len();
    let recent_orders = OrderFilter::default()
        .apply(orders)
        .into_iter()
        .take(RECENT_ORDERS)
        .collect();

    Ok(OverviewTemplate {
        ctx: PageContext::load(&session, Some(user.clone()), &query).await?,
        book: client_state::load_account(&session, state.catalog()).await?,
        user,
        recent_orders,
        order_count,
    })
}

/// Order history with search, status filter, and sort.
#[instrument(skip(state, session, user, filter, query))]
pub async fn orders(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(filter): Query<OrderFilter>,
    Query(query): Query<MessageQuery>,
) -> Result<OrdersTemplate> {
    let orders = filter.apply(state.catalog().customer_orders().await);
    Ok(OrdersTemplate {
        ctx: PageContext::load(&session, Some(user), &query).await?,
        filter,
        orders,
        statuses: OrderStatus::ALL,
    })
}

/// Wishlist, inside the profile layout.
#[instrument(skip(session, user, filter, query))]
pub async fn wishlist(
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(filter): Query<WishlistFilter>,
    Query(query): Query<MessageQuery>,
) -> Result<WishlistTemplate> {
    wishlist::render(&session, Some(user), filter, &query, "/profile/wishlist").await
}

// =============================================================================
// Payment Methods
// =============================================================================

/// Saved payment methods.
#[instrument(skip(state, session, user, query))]
pub async fn payment_methods(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<PaymentMethodsTemplate> {
    Ok(PaymentMethodsTemplate {
        ctx: PageContext::load(&session, Some(user), &query).await?,
        book: client_state::load_account(&session, state.catalog()).await?,
    })
}

/// Make a card the default.
#[instrument(skip(state, session, _user))]
pub async fn set_default_payment_method(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<PaymentMethodId>,
) -> Result<Redirect> {
    let outcome = update_account(&state, &session, |book| book.set_default_payment_method(id)).await?;
    Ok(redirect_for(outcome, "/profile/payment-methods", "payment_default"))
}

/// Delete a card. The default card cannot be deleted.
#[instrument(skip(state, session, _user))]
pub async fn delete_payment_method(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<PaymentMethodId>,
) -> Result<Redirect> {
    let outcome = update_account(&state, &session, |book| book.remove_payment_method(id)).await?;
    Ok(redirect_for(outcome, "/profile/payment-methods", "payment_removed"))
}

// =============================================================================
// Addresses
// =============================================================================

/// Saved delivery addresses.
#[instrument(skip(state, session, user, query))]
pub async fn addresses(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<AddressesTemplate> {
    Ok(AddressesTemplate {
        ctx: PageContext::load(&session, Some(user), &query).await?,
        book: client_state::load_account(&session, state.catalog()).await?,
    })
}

/// Make an address the default.
#[instrument(skip(state, session, _user))]
pub async fn set_default_address(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<Redirect> {
    let outcome = update_account(&state, &session, |book| book.set_default_address(id)).await?;
    Ok(redirect_for(outcome, "/profile/addresses", "address_default"))
}

/// Delete an address. The default address cannot be deleted.
#[instrument(skip(state, session, _user))]
pub async fn delete_address(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<AddressId>,
) -> Result<Redirect> {
    let outcome = update_account(&state, &session, |book| book.remove_address(id)).await?;
    Ok(redirect_for(outcome, "/profile/addresses", "address_removed"))
}

// =============================================================================
// Settings
// =============================================================================

/// Preference switches and the password form.
#[instrument(skip(state, session, user, query))]
pub async fn settings(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<SettingsTemplate> {
    Ok(SettingsTemplate {
        ctx: PageContext::load(&session, Some(user.clone()), &query).await?,
        book: client_state::load_account(&session, state.catalog()).await?,
        user,
        preferences: Preference::ALL,
    })
}

/// Flip one preference switch.
#[instrument(skip(state, session, _user, form), fields(preference = %form.preference))]
pub async fn toggle_preference(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<PreferenceForm>,
) -> Result<Redirect> {
    let outcome = update_account(&state, &session, |book| {
        let preference: Preference = form.preference.parse()?;
        Ok(book.preferences.toggle(preference))
    })
    .await?;
    Ok(redirect_for(outcome, "/profile/settings", "setting_updated"))
}

/// Validate a password change. Nothing is stored.
#[instrument(skip(_user, form))]
pub async fn change_password(
    RequireAuth(_user): RequireAuth,
    Form(form): Form<PasswordForm>,
) -> Redirect {
    if form.current_password.expose_secret().is_empty() {
        return messages::error("/profile/settings", "missing_password");
    }

    match auth::change_password(
        form.new_password.expose_secret(),
        form.confirm_password.expose_secret(),
    ) {
        Ok(()) => {
            tracing::info!("Password change accepted");
            messages::success("/profile/settings", "password_changed")
        }
        Err(error) => {
            let code = match error {
                AuthError::PasswordMismatch => "new_password_mismatch",
                _ => "password_requirements",
            };
            tracing::warn!(%error, "Password change rejected");
            messages::error("/profile/settings", code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_errors_map_to_known_messages() {
        for error in [
            AccountError::AddressNotFound(AddressId::new(9)),
            AccountError::PaymentMethodNotFound(PaymentMethodId::new(9)),
            AccountError::DefaultAddress,
            AccountError::DefaultPaymentMethod,
            AccountError::UnknownPreference("x".to_string()),
        ] {
            let query = MessageQuery {
                error: Some(account_error_code(&error).to_string()),
                ..MessageQuery::default()
            };
            assert!(query.message().is_some(), "{error:?}");
        }
    }
}
