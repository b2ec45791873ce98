//! Store settings: general info, shipping methods, and payment gateways.

use std::str::FromStr;

use botanical_core::{CurrencyCode, PaymentGatewayId, Price, ShippingMethodId, TemplateArg};
use rust_decimal::Decimal;
use serde::Deserialize;

/// Tabs of the settings page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsTab {
    #[default]
    General,
    Shipping,
    Payment,
}

impl SettingsTab {
    pub const ALL: [Self; 3] = [Self::General, Self::Shipping, Self::Payment];

    /// Tab from a query value; anything unknown is the general tab.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == value)
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Shipping => "shipping",
            Self::Payment => "payment",
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Shipping => "Shipping",
            Self::Payment => "Payment",
        }
    }

    #[must_use]
    pub fn href(&self) -> String {
        format!("/admin/settings?tab={}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSettings {
    pub store_name: String,
    pub currency: CurrencyCode,
    /// Percentage, `0..=100`.
    pub tax_rate: Decimal,
}

impl GeneralSettings {
    #[must_use]
    pub fn is_currency(&self, currency: impl TemplateArg<CurrencyCode>) -> bool {
        self.currency == currency.resolve()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingMethod {
    pub id: ShippingMethodId,
    pub name: String,
    pub price: Price,
    pub estimated_delivery: String,
}

impl ShippingMethod {
    /// "Free" for zero-priced methods.
    #[must_use]
    pub fn price_label(&self) -> String {
        if self.price.is_zero() {
            "Free".to_string()
        } else {
            self.price.display()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentGateway {
    pub id: PaymentGatewayId,
    pub name: String,
    pub enabled: bool,
}

/// Every store setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSettings {
    pub general: GeneralSettings,
    pub shipping_methods: Vec<ShippingMethod>,
    pub payment_gateways: Vec<PaymentGateway>,
}

/// Why a settings form was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsFormError {
    #[error("Store name is required")]
    MissingStoreName,
    #[error("Unknown currency")]
    UnknownCurrency,
    #[error("Tax rate must be between 0 and 100")]
    InvalidTaxRate,
    #[error("Name is required")]
    MissingName,
    #[error("Price must be a non-negative number")]
    InvalidPrice,
    #[error("Estimated delivery is required")]
    MissingEstimatedDelivery,
}

impl SettingsFormError {
    /// Message code carried on the redirect back to the settings page.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingStoreName => "store_name_required",
            Self::UnknownCurrency => "unknown_currency",
            Self::InvalidTaxRate => "invalid_tax_rate",
            Self::MissingName => "name_required",
            Self::InvalidPrice => "invalid_price",
            Self::MissingEstimatedDelivery => "delivery_required",
        }
    }
}

/// Submitted general settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneralSettingsForm {
    pub store_name: String,
    pub currency: String,
    pub tax_rate: String,
}

impl GeneralSettingsForm {
    /// # Errors
    ///
    /// Returns the first field that fails.
    pub fn validate(&self) -> Result<GeneralSettings, SettingsFormError> {
        let store_name = self.store_name.trim();
        if store_name.is_empty() {
            return Err(SettingsFormError::MissingStoreName);
        }
        let currency = CurrencyCode::from_str(&self.currency)
            .map_err(|_| SettingsFormError::UnknownCurrency)?;
        let tax_rate = Decimal::from_str(self.tax_rate.trim())
            .ok()
            .filter(|rate| (Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(rate))
            .ok_or(SettingsFormError::InvalidTaxRate)?;
        Ok(GeneralSettings {
            store_name: store_name.to_string(),
            currency,
            tax_rate,
        })
    }
}

/// Submitted shipping method (add or edit).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShippingMethodForm {
    pub name: String,
    pub price: String,
    pub estimated_delivery: String,
}

/// Validated shipping method fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingMethodDraft {
    pub name: String,
    pub price: Price,
    pub estimated_delivery: String,
}

impl ShippingMethodForm {
    /// # Errors
    ///
    /// Returns the first field that fails.
    pub fn validate(&self) -> Result<ShippingMethodDraft, SettingsFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SettingsFormError::MissingName);
        }
        let price = Price::parse(&self.price).map_err(|_| SettingsFormError::InvalidPrice)?;
        let estimated_delivery = self.estimated_delivery.trim();
        if estimated_delivery.is_empty() {
            return Err(SettingsFormError::MissingEstimatedDelivery);
        }
        Ok(ShippingMethodDraft {
            name: name.to_string(),
            price,
            estimated_delivery: estimated_delivery.to_string(),
        })
    }
}

/// Submitted payment gateway (add or edit).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PaymentGatewayForm {
    pub name: String,
    /// Checkbox: present when ticked.
    pub enabled: Option<String>,
}

/// Validated payment gateway fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentGatewayDraft {
    pub name: String,
    pub enabled: bool,
}

impl PaymentGatewayForm {
    /// # Errors
    ///
    /// Returns [`SettingsFormError::MissingName`] for a blank name.
    pub fn validate(&self) -> Result<PaymentGatewayDraft, SettingsFormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(SettingsFormError::MissingName);
        }
        Ok(PaymentGatewayDraft {
            name: name.to_string(),
            enabled: self.enabled.is_some(),
        })
    }
}

fn shipping(id: i32, name: &str, cents: i64, estimated_delivery: &str) -> ShippingMethod {
    ShippingMethod {
        id: ShippingMethodId::new(id),
        name: name.to_string(),
        price: Price::from_cents(cents),
        estimated_delivery: estimated_delivery.to_string(),
    }
}

fn gateway(id: i32, name: &str, enabled: bool) -> PaymentGateway {
    PaymentGateway {
        id: PaymentGatewayId::new(id),
        name: name.to_string(),
        enabled,
    }
}

/// Settings the back office starts with.
pub(crate) fn seed_settings() -> AdminSettings {
    AdminSettings {
        general: GeneralSettings {
            store_name: "Botanical Store".to_string(),
            currency: CurrencyCode::Ron,
            tax_rate: Decimal::from(19),
        },
        shipping_methods: vec![
            shipping(1, "Standard Shipping", 599, "3-5 business days"),
            shipping(2, "Express Shipping", 1299, "1-2 business days"),
            shipping(3, "Free Shipping", 0, "5-7 business days"),
        ],
        payment_gateways: vec![
            gateway(1, "Credit Card", true),
            gateway(2, "PayPal", true),
            gateway(3, "Apple Pay", false),
            gateway(4, "Google Pay", false),
        ],
    }
}
