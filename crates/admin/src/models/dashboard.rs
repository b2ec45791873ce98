//! Dashboard summary: headline totals, top products, and monthly sales.

use botanical_core::{Price, ProductId};

use crate::models::AdminOrder;

/// Number of recent orders shown on the dashboard.
pub const RECENT_ORDERS: usize = 5;

/// One headline figure with its change against the previous period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    /// Percentage change; negative for a decline.
    pub change: i32,
}

impl StatCard {
    #[must_use]
    pub const fn is_increase(&self) -> bool {
        self.change >= 0
    }

    #[must_use]
    pub const fn change_magnitude(&self) -> u32 {
        self.change.unsigned_abs()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopProduct {
    pub id: ProductId,
    pub name: String,
    /// Units sold.
    pub sales: u32,
    pub revenue: Price,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlySales {
    pub month: &'static str,
    pub sales: u32,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_sales: u32,
    pub total_orders: u32,
    pub total_users: u32,
    pub total_products: u32,
    pub recent_orders: Vec<AdminOrder>,
    pub top_products: Vec<TopProduct>,
    pub sales_by_month: Vec<MonthlySales>,
}

/// Format a whole number with thousands separators.
fn grouped(value: u32) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl DashboardStats {
    /// The four headline cards.
    #[must_use]
    pub fn cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Total Sales",
                value: format!("${}", grouped(self.total_sales)),
                change: 12,
            },
            StatCard {
                title: "Orders",
                value: grouped(self.total_orders),
                change: 8,
            },
            StatCard {
                title: "Customers",
                value: grouped(self.total_users),
                change: 5,
            },
            StatCard {
                title: "Products",
                value: grouped(self.total_products),
                change: -2,
            },
        ]
    }

    /// Highest monthly figure, the full length of a chart bar.
    #[must_use]
    pub fn chart_max(&self) -> u32 {
        self.sales_by_month
            .iter()
            .map(|m| m.sales)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

fn top(id: i32, name: &str, sales: u32, revenue_cents: i64) -> TopProduct {
    TopProduct {
        id: ProductId::new(id),
        name: name.to_string(),
        sales,
        revenue: Price::from_cents(revenue_cents),
    }
}

/// Dashboard figures around the given recent orders.
pub(crate) fn mock_stats(recent_orders: Vec<AdminOrder>) -> DashboardStats {
    const MONTHS: [(&str, u32); 12] = [
        ("Jan", 1200),
        ("Feb", 1900),
        ("Mar", 2400),
        ("Apr", 1800),
        ("May", 2100),
        ("Jun", 1700),
        ("Jul", 1900),
        ("Aug", 2300),
        ("Sep", 2500),
        ("Oct", 2800),
        ("Nov", 3200),
        ("Dec", 3500),
    ];

    DashboardStats {
        total_sales: 15_680,
        total_orders: 156,
        total_users: 432,
        total_products: 89,
        recent_orders,
        top_products: vec![
            top(1, "Snake Plant", 42, 125_958),
            top(2, "Fiddle Leaf Fig", 38, 113_962),
            top(3, "Monstera Deliciosa", 35, 174_965),
        ],
        sales_by_month: MONTHS
            .into_iter()
            .map(|(month, sales)| MonthlySales { month, sales })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(15_680), "15,680");
        assert_eq!(grouped(1_234_567), "1,234,567");
    }

    #[test]
    fn test_cards() {
        let stats = mock_stats(Vec::new());
        let cards = stats.cards();
        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, ["$15,680", "156", "432", "89"]);
        assert!(cards.iter().any(|c| !c.is_increase() && c.change_magnitude() == 2));
    }

    #[test]
    fn test_chart_max() {
        assert_eq!(mock_stats(Vec::new()).chart_max(), 3500);
    }
}
