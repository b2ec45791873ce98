//! Order history for the profile orders page.

use std::str::FromStr;

use botanical_core::{
    OrderStatus, PaymentStatus, Price, ProductId, SortDirection, listing::compare_text,
    matches_query,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrderItem {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTimelineEntry {
    pub date: NaiveDate,
    pub status: &'static str,
}

/// A past order as the customer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerOrder {
    /// Display number such as `#ORD001`.
    pub number: String,
    pub date: NaiveDate,
    pub total: Price,
    pub status: OrderStatus,
    pub items: Vec<CustomerOrderItem>,
    pub shipping_address: String,
    pub shipping_method: String,
    pub tracking: Option<String>,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub timeline: Vec<OrderTimelineEntry>,
}

impl CustomerOrder {
    /// Anchor-safe id for the expand/collapse toggle.
    #[must_use]
    pub fn anchor(&self) -> String {
        self.number.trim_start_matches('#').to_lowercase()
    }

    fn matches(&self, search: &str) -> bool {
        matches_query(search, &[&self.number])
            || self
                .items
                .iter()
                .any(|item| matches_query(search, &[&item.name]))
    }
}

/// Sort column for the orders page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSort {
    #[default]
    Date,
    Total,
}

impl OrderSort {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Total => "total",
        }
    }
}

/// Search, status filter, and sort chosen on the orders page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderFilter {
    pub q: String,
    /// `all` or an order status.
    pub status: String,
    pub sort: OrderSort,
    /// Defaults to newest first.
    pub dir: Option<SortDirection>,
}

impl OrderFilter {
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.dir.unwrap_or(SortDirection::Desc)
    }

    fn status(&self) -> Option<OrderStatus> {
        if self.status.is_empty() || self.status.eq_ignore_ascii_case("all") {
            return None;
        }
        OrderStatus::from_str(&self.status).ok()
    }

    /// Filter and sort orders.
    ///
    /// An unrecognized status value is treated as `all`.
    #[must_use]
    pub fn apply(&self, orders: Vec<CustomerOrder>) -> Vec<CustomerOrder> {
        let status = self.status();
        let direction = self.direction();
        let mut orders: Vec<_> = orders
            .into_iter()
            .filter(|order| order.matches(&self.q))
            .filter(|order| status.is_none_or(|s| order.status == s))
            .collect();
        orders.sort_by(|a, b| {
            let ordering = match self.sort {
                OrderSort::Date => a.date.cmp(&b.date),
                OrderSort::Total => a.total.cmp(&b.total),
            };
            direction.apply(ordering.then_with(|| compare_text(&a.number, &b.number)))
        });
        orders
    }
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn item(id: i32, name: &str, quantity: u32, cents: i64) -> CustomerOrderItem {
    CustomerOrderItem {
        id: ProductId::new(id),
        name: name.to_string(),
        quantity,
        price: Price::from_cents(cents),
        image: "https://placehold.co/100x100".to_string(),
    }
}

pub(super) fn mock_customer_orders() -> Vec<CustomerOrder> {
    vec![
        CustomerOrder {
            number: "#ORD001".to_string(),
            date: day(2024, 1, 15),
            total: Price::from_cents(29999),
            status: OrderStatus::Delivered,
            items: vec![
                item(1, "Monstera Deliciosa", 1, 14999),
                item(2, "Snake Plant", 2, 7499),
            ],
            shipping_address: "123 Main Street, Bucharest, Sector 1".to_string(),
            shipping_method: "Standard Delivery".to_string(),
            tracking: Some("RO123456789".to_string()),
            payment_method: "Visa ending in 4242".to_string(),
            payment_status: PaymentStatus::Paid,
            timeline: vec![
                OrderTimelineEntry { date: day(2024, 1, 15), status: "Delivered" },
                OrderTimelineEntry { date: day(2024, 1, 14), status: "Out for Delivery" },
                OrderTimelineEntry { date: day(2024, 1, 13), status: "Shipped" },
                OrderTimelineEntry { date: day(2024, 1, 12), status: "Packed" },
            ],
        },
        CustomerOrder {
            number: "#ORD002".to_string(),
            date: day(2024, 1, 10),
            total: Price::from_cents(14999),
            status: OrderStatus::Processing,
            items: vec![item(3, "Peace Lily", 1, 14999)],
            shipping_address: "456 Business Avenue, Bucharest, Sector 2".to_string(),
            shipping_method: "Express Delivery".to_string(),
            tracking: Some("RO987654321".to_string()),
            payment_method: "Mastercard ending in 8888".to_string(),
            payment_status: PaymentStatus::Paid,
            timeline: Vec::new(),
        },
        CustomerOrder {
            number: "#ORD003".to_string(),
            date: day(2024, 1, 5),
            total: Price::from_cents(8999),
            status: OrderStatus::Cancelled,
            items: vec![item(4, "Succulent Set", 1, 8999)],
            shipping_address: "789 Park Road, Bucharest, Sector 3".to_string(),
            shipping_method: "Standard Delivery".to_string(),
            tracking: None,
            payment_method: "PayPal".to_string(),
            payment_status: PaymentStatus::Refunded,
            timeline: Vec::new(),
        },
    ]
}
