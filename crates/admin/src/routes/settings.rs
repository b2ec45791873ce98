//! Store settings route handlers.
//!
//! One page with three tabs. Every form posts to its own endpoint and
//! redirects back to the tab it came from, carrying a message code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::Redirect,
};
use botanical_core::{CurrencyCode, PaymentGatewayId, ShippingMethodId, TemplateArg};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::messages::{self, MessageQuery};
use crate::middleware::RequireAdmin;
use crate::models::{
    AdminSettings, PaymentGatewayForm, ShippingMethodForm,
    settings::{GeneralSettingsForm, SettingsFormError, SettingsTab},
};
use crate::routes::{AdminContext, Section};
use crate::state::AdminState;
use crate::store::BackOfficeError;

// =============================================================================
// Templates
// =============================================================================

/// Settings page template.
#[derive(Template, WebTemplate)]
#[template(path = "settings.html")]
pub struct SettingsTemplate {
    pub ctx: AdminContext,
    pub tab: SettingsTab,
    pub tabs: [SettingsTab; 3],
    pub settings: AdminSettings,
    pub currencies: [CurrencyCode; 4],
}

impl SettingsTemplate {
    #[must_use]
    pub fn is_tab(&self, tab: impl TemplateArg<SettingsTab>) -> bool {
        self.tab == tab.resolve()
    }
}

/// `?tab=` on the settings page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TabQuery {
    pub tab: String,
}

// =============================================================================
// Helpers
// =============================================================================

fn rejected(tab: SettingsTab, error: &SettingsFormError) -> Redirect {
    tracing::debug!(%error, tab = tab.as_str(), "Settings form rejected");
    messages::error(&tab.href(), error.code())
}

fn missing(tab: SettingsTab, error: &BackOfficeError) -> Redirect {
    tracing::warn!(%error, "Settings record not found");
    let code = match error {
        BackOfficeError::PaymentGatewayNotFound(_) => "gateway_not_found",
        _ => "shipping_not_found",
    };
    messages::error(&tab.href(), code)
}

// =============================================================================
// Page
// =============================================================================

/// Settings page on the requested tab.
#[instrument(skip(state, admin, tab, query))]
pub async fn index(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Query(tab): Query<TabQuery>,
    Query(query): Query<MessageQuery>,
) -> SettingsTemplate {
    let settings = state.read(|office| office.settings().clone()).await;
    SettingsTemplate {
        ctx: AdminContext::new(admin, Section::Settings, &query),
        tab: SettingsTab::parse(&tab.tab),
        tabs: SettingsTab::ALL,
        settings,
        currencies: CurrencyCode::ALL,
    }
}

// =============================================================================
// General
// =============================================================================

/// Save store name, currency, and tax rate.
#[instrument(skip(state, _admin, form))]
pub async fn update_general(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<GeneralSettingsForm>,
) -> Redirect {
    let tab = SettingsTab::General;
    match form.validate() {
        Ok(general) => {
            tracing::info!(store_name = %general.store_name, "General settings updated");
            state.write(|office| office.update_general(general)).await;
            messages::success(&tab.href(), "general_updated")
        }
        Err(error) => rejected(tab, &error),
    }
}

// =============================================================================
// Shipping Methods
// =============================================================================

#[instrument(skip(state, _admin, form))]
pub async fn add_shipping_method(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<ShippingMethodForm>,
) -> Redirect {
    let tab = SettingsTab::Shipping;
    match form.validate() {
        Ok(draft) => {
            let method = state.write(|office| office.add_shipping_method(draft)).await;
            tracing::info!(shipping_method_id = %method.id, "Shipping method added");
            messages::success(&tab.href(), "shipping_added")
        }
        Err(error) => rejected(tab, &error),
    }
}

#[instrument(skip(state, _admin, form))]
pub async fn update_shipping_method(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ShippingMethodId>,
    Form(form): Form<ShippingMethodForm>,
) -> Redirect {
    let tab = SettingsTab::Shipping;
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(error) => return rejected(tab, &error),
    };
    match state
        .write(|office| office.update_shipping_method(id, draft).map(|_| ()))
        .await
    {
        Ok(()) => messages::success(&tab.href(), "shipping_updated"),
        Err(error) => missing(tab, &error),
    }
}

#[instrument(skip(state, _admin))]
pub async fn delete_shipping_method(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<ShippingMethodId>,
) -> Redirect {
    let tab = SettingsTab::Shipping;
    match state.write(|office| office.delete_shipping_method(id)).await {
        Ok(method) => messages::success_item(&tab.href(), "shipping_deleted", &method.name),
        Err(error) => missing(tab, &error),
    }
}

// =============================================================================
// Payment Gateways
// =============================================================================

#[instrument(skip(state, _admin, form))]
pub async fn add_payment_gateway(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Form(form): Form<PaymentGatewayForm>,
) -> Redirect {
    let tab = SettingsTab::Payment;
    match form.validate() {
        Ok(draft) => {
            let gateway = state.write(|office| office.add_payment_gateway(draft)).await;
            tracing::info!(payment_gateway_id = %gateway.id, "Payment gateway added");
            messages::success(&tab.href(), "gateway_added")
        }
        Err(error) => rejected(tab, &error),
    }
}

#[instrument(skip(state, _admin, form))]
pub async fn update_payment_gateway(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<PaymentGatewayId>,
    Form(form): Form<PaymentGatewayForm>,
) -> Redirect {
    let tab = SettingsTab::Payment;
    let draft = match form.validate() {
        Ok(draft) => draft,
        Err(error) => return rejected(tab, &error),
    };
    match state
        .write(|office| office.update_payment_gateway(id, draft).map(|_| ()))
        .await
    {
        Ok(()) => messages::success(&tab.href(), "gateway_updated"),
        Err(error) => missing(tab, &error),
    }
}

/// Enable or disable a gateway.
#[instrument(skip(state, _admin))]
pub async fn toggle_payment_gateway(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<PaymentGatewayId>,
) -> Redirect {
    let tab = SettingsTab::Payment;
    let toggled = state
        .write(|office| {
            office
                .toggle_payment_gateway(id)
                .map(|g| (g.name.clone(), g.enabled))
        })
        .await;
    match toggled {
        Ok((name, enabled)) => {
            tracing::info!(payment_gateway_id = %id, enabled, "Payment gateway toggled");
            let code = if enabled {
                "gateway_enabled"
            } else {
                "gateway_disabled"
            };
            messages::success_item(&tab.href(), code, &name)
        }
        Err(error) => missing(tab, &error),
    }
}

#[instrument(skip(state, _admin))]
pub async fn delete_payment_gateway(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<PaymentGatewayId>,
) -> Redirect {
    let tab = SettingsTab::Payment;
    match state.write(|office| office.delete_payment_gateway(id)).await {
        Ok(gateway) => messages::success_item(&tab.href(), "gateway_deleted", &gateway.name),
        Err(error) => missing(tab, &error),
    }
}
