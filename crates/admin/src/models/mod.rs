//! Back-office data: products, orders, users, store settings, and the
//! dashboard summary.
//!
//! Each manager module pairs its record type with the list filter used by
//! its table (search, select filters, sort column, direction, and page) and
//! with the mock rows the back office starts from.

pub mod dashboard;
pub mod order;
pub mod product;
pub mod settings;
pub mod user;

use chrono::{DateTime, Utc};

pub use dashboard::{DashboardStats, MonthlySales, TopProduct};
pub use order::{AdminOrder, OrderCustomer, OrderFilter, OrderLine, OrderSort, ShippingAddress};
pub use product::{AdminProduct, ProductDraft, ProductFilter, ProductForm, ProductSort};
pub use settings::{
    AdminSettings, GeneralSettings, PaymentGateway, PaymentGatewayForm, ShippingMethod,
    ShippingMethodForm,
};
pub use user::{AdminUser, UserFilter, UserForm, UserSort};

/// Parse an RFC 3339 timestamp from the mock tables.
fn utc(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}

/// 1-based page from a query value; anything unparseable is page 1.
fn parse_page(value: &str) -> usize {
    value.trim().parse().unwrap_or(1).max(1)
}

/// Page size from a query value, accepted only when it is one of `options`.
fn parse_per_page(value: &str, options: &[usize], default: usize) -> usize {
    value
        .trim()
        .parse()
        .ok()
        .filter(|n| options.contains(n))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(""), 1);
        assert_eq!(parse_page("0"), 1);
        assert_eq!(parse_page("3"), 3);
        assert_eq!(parse_page("three"), 1);
    }

    #[test]
    fn test_parse_per_page_only_accepts_options() {
        assert_eq!(parse_per_page("25", &[5, 10, 25], 5), 25);
        assert_eq!(parse_per_page("7", &[5, 10, 25], 5), 5);
        assert_eq!(parse_per_page("", &[5, 10, 25], 10), 10);
    }

    #[test]
    fn test_utc_parses_mock_timestamps() {
        assert_eq!(
            utc("2023-10-15T08:30:00Z").to_rfc3339(),
            "2023-10-15T08:30:00+00:00"
        );
    }
}
