//! Orders manager: order records, list filter, and mock orders.

use std::cmp::Ordering;
use std::str::FromStr;

use botanical_core::{
    OrderId, OrderStatus, Page, PaymentStatus, Price, ProductId, SortDirection, TemplateArg,
    UserId, listing::compare_text, matches_query,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::components::data_table::{
    self, FilterOption, SortKey, TableColumn, next_direction, parse_direction,
};
use crate::models::{parse_page, parse_per_page, utc};

/// Page sizes offered by the orders manager.
pub const ORDER_PAGE_SIZES: [usize; 4] = [5, 10, 25, 50];

/// Default page size of the orders manager.
pub const DEFAULT_ORDERS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCustomer {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: Price,
}

impl OrderLine {
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// A customer order as the back office sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminOrder {
    pub id: OrderId,
    pub order_number: String,
    pub customer: OrderCustomer,
    pub products: Vec<OrderLine>,
    pub total_amount: Price,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub shipping_address: ShippingAddress,
}

impl AdminOrder {
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }

    #[must_use]
    pub fn updated_label(&self) -> String {
        self.updated_at.format("%b %-d, %Y %H:%M").to_string()
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.products.iter().map(|line| line.quantity).sum()
    }

    #[must_use]
    pub fn has_status(&self, status: impl TemplateArg<OrderStatus>) -> bool {
        self.status == status.resolve()
    }

    fn matches(&self, query: &str) -> bool {
        matches_query(
            query,
            &[
                &self.order_number,
                &self.customer.name,
                &self.customer.email,
            ],
        )
    }
}

/// Sortable columns of the orders table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    Date,
    Amount,
    Number,
}

impl SortKey for OrderSort {
    const ALL: &'static [Self] = &[Self::Date, Self::Amount, Self::Number];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Number => "number",
        }
    }

    /// Orders list newest, largest, or latest number first.
    fn initial_direction(&self) -> SortDirection {
        SortDirection::Desc
    }
}

impl OrderSort {
    fn compare(self, a: &AdminOrder, b: &AdminOrder) -> Ordering {
        match self {
            Self::Date => a.created_at.cmp(&b.created_at),
            Self::Amount => a.total_amount.cmp(&b.total_amount),
            Self::Number => compare_text(&a.order_number, &b.order_number),
        }
    }
}

/// Columns of the orders table (after the selection checkbox).
pub const ORDER_COLUMNS: [TableColumn<OrderSort>; 7] = [
    TableColumn::sortable("Order", OrderSort::Number),
    TableColumn::new("Customer"),
    TableColumn::sortable("Date", OrderSort::Date),
    TableColumn::sortable("Amount", OrderSort::Amount),
    TableColumn::new("Status"),
    TableColumn::new("Payment"),
    TableColumn::new("Actions"),
];

/// Raw query string of the orders manager.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrderListQuery {
    pub q: String,
    pub status: String,
    pub sort: String,
    pub dir: String,
    pub page: String,
    pub per_page: String,
}

/// Search, status filter, sort, and paging of the orders manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFilter {
    pub q: String,
    /// `None` shows every status.
    pub status: Option<OrderStatus>,
    pub sort: OrderSort,
    pub dir: SortDirection,
    pub page: usize,
    pub per_page: usize,
}

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            q: String::new(),
            status: None,
            sort: OrderSort::Date,
            dir: SortDirection::Desc,
            page: 1,
            per_page: DEFAULT_ORDERS_PER_PAGE,
        }
    }
}

impl From<OrderListQuery> for OrderFilter {
    fn from(query: OrderListQuery) -> Self {
        let sort = OrderSort::parse(&query.sort).unwrap_or_default();
        Self {
            q: query.q.trim().to_string(),
            status: if data_table::is_all(&query.status) {
                None
            } else {
                OrderStatus::from_str(&query.status).ok()
            },
            sort,
            dir: parse_direction(&query.dir).unwrap_or_else(|| sort.initial_direction()),
            page: parse_page(&query.page),
            per_page: parse_per_page(&query.per_page, &ORDER_PAGE_SIZES, DEFAULT_ORDERS_PER_PAGE),
        }
    }
}

impl OrderFilter {
    /// Filter, sort, and paginate.
    ///
    /// Ties keep the order number ascending so pages are stable.
    #[must_use]
    pub fn apply(&self, orders: Vec<AdminOrder>) -> Page<AdminOrder> {
        let mut orders: Vec<_> = orders
            .into_iter()
            .filter(|order| order.matches(&self.q))
            .filter(|order| self.status.is_none_or(|s| order.status == s))
            .collect();
        orders.sort_by(|a, b| {
            self.dir
                .apply(self.sort.compare(a, b))
                .then_with(|| compare_text(&a.order_number, &b.order_number))
        });
        Page::paginate(orders, self.page, self.per_page)
    }

    fn href(&self, page: usize, sort: OrderSort, dir: SortDirection) -> String {
        let default = Self::default();
        let (sort, dir) = if sort == default.sort && dir == default.dir {
            (String::new(), String::new())
        } else {
            (sort.as_str().to_string(), dir.as_str().to_string())
        };
        data_table::href(
            "/admin/orders",
            &[
                ("q", self.q.clone()),
                (
                    "status",
                    self.status.map(|s| s.as_str().to_string()).unwrap_or_default(),
                ),
                ("sort", sort),
                ("dir", dir),
                (
                    "per_page",
                    if self.per_page == default.per_page {
                        String::new()
                    } else {
                        self.per_page.to_string()
                    },
                ),
                ("page", if page > 1 { page.to_string() } else { String::new() }),
            ],
        )
    }

    /// Link back to this exact view, used as the return path of forms.
    #[must_use]
    pub fn current_href(&self) -> String {
        self.href(self.page, self.sort, self.dir)
    }

    #[must_use]
    pub fn page_href(&self, page: impl TemplateArg<usize>) -> String {
        self.href(page.resolve(), self.sort, self.dir)
    }

    #[must_use]
    pub fn sort_href(&self, sort: impl TemplateArg<OrderSort>) -> String {
        let sort = sort.resolve();
        self.href(1, sort, next_direction(self.sort, self.dir, sort))
    }

    #[must_use]
    pub fn arrow(&self, sort: impl TemplateArg<OrderSort>) -> &'static str {
        if self.sort == sort.resolve() {
            self.dir.arrow()
        } else {
            ""
        }
    }

    #[must_use]
    pub fn is_status(&self, value: impl AsRef<str>) -> bool {
        let value = value.as_ref();
        match self.status {
            None => data_table::is_all(value),
            Some(status) => status.as_str() == value,
        }
    }

    #[must_use]
    pub fn is_per_page(&self, size: impl TemplateArg<usize>) -> bool {
        self.per_page == size.resolve()
    }
}

/// "All" plus every order status.
#[must_use]
pub fn status_options() -> Vec<FilterOption> {
    std::iter::once(FilterOption::all())
        .chain(
            OrderStatus::ALL
                .iter()
                .map(|s| FilterOption::new(s.as_str(), s.label())),
        )
        .collect()
}

/// Status form posted from the order detail page or the bulk bar.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatusForm {
    pub status: String,
    /// Where to go back to after the update.
    pub return_to: String,
}

fn customer(id: i32, name: &str, email: &str) -> OrderCustomer {
    OrderCustomer {
        id: UserId::new(id),
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn line(id: i32, name: &str, quantity: u32, cents: i64) -> OrderLine {
    OrderLine {
        id: ProductId::new(id),
        name: name.to_string(),
        quantity,
        price: Price::from_cents(cents),
    }
}

fn address(street: &str, city: &str, zip_code: &str) -> ShippingAddress {
    ShippingAddress {
        street: street.to_string(),
        city: city.to_string(),
        state: "ST".to_string(),
        zip_code: zip_code.to_string(),
        country: "Country".to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: i32,
    customer: OrderCustomer,
    products: Vec<OrderLine>,
    status: OrderStatus,
    payment_status: PaymentStatus,
    (created_at, updated_at): (&str, &str),
    shipping_address: ShippingAddress,
) -> AdminOrder {
    AdminOrder {
        id: OrderId::new(id),
        order_number: format!("ORD-2023-{id:03}"),
        customer,
        total_amount: products.iter().map(OrderLine::line_total).sum(),
        products,
        status,
        payment_status,
        created_at: utc(created_at),
        updated_at: utc(updated_at),
        shipping_address,
    }
}

/// Orders the back office starts with.
pub(crate) fn seed_orders() -> Vec<AdminOrder> {
    vec![
        order(
            1,
            customer(1, "John Doe", "john@example.com"),
            vec![line(1, "Snake Plant", 2, 2999)],
            OrderStatus::Delivered,
            PaymentStatus::Paid,
            ("2023-10-15T08:30:00Z", "2023-10-16T14:20:00Z"),
            address("123 Main St", "Anytown", "12345"),
        ),
        order(
            2,
            customer(2, "Jane Smith", "jane@example.com"),
            vec![line(3, "Monstera Deliciosa", 1, 4999)],
            OrderStatus::Shipped,
            PaymentStatus::Paid,
            ("2023-10-16T10:15:00Z", "2023-10-17T09:30:00Z"),
            address("456 Oak Ave", "Somewhere", "67890"),
        ),
        order(
            3,
            customer(3, "Robert Johnson", "robert@example.com"),
            vec![
                line(2, "Fiddle Leaf Fig", 1, 5999),
                line(4, "Potting Soil Mix", 1, 1999),
            ],
            OrderStatus::Processing,
            PaymentStatus::Paid,
            ("2023-10-17T15:45:00Z", "2023-10-17T16:30:00Z"),
            address("789 Pine Rd", "Otherplace", "54321"),
        ),
        order(
            4,
            customer(4, "Alice Williams", "alice@example.com"),
            vec![line(5, "Ceramic Plant Pot - White", 3, 2499)],
            OrderStatus::Pending,
            PaymentStatus::Unpaid,
            ("2023-10-18T09:20:00Z", "2023-10-18T09:20:00Z"),
            address("101 Elm Blvd", "Newtown", "11223"),
        ),
        order(
            5,
            customer(5, "Michael Brown", "michael@example.com"),
            vec![
                line(1, "Snake Plant", 1, 2999),
                line(3, "Monstera Deliciosa", 1, 4999),
            ],
            OrderStatus::Cancelled,
            PaymentStatus::Refunded,
            ("2023-10-14T11:10:00Z", "2023-10-15T13:25:00Z"),
            address("202 Cedar St", "Somecity", "33445"),
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filter(q: &str, status: &str, sort: &str, dir: &str) -> OrderFilter {
        OrderFilter::from(OrderListQuery {
            q: q.to_string(),
            status: status.to_string(),
            sort: sort.to_string(),
            dir: dir.to_string(),
            ..OrderListQuery::default()
        })
    }

    fn numbers(page: &Page<AdminOrder>) -> Vec<&str> {
        page.items.iter().map(|o| o.order_number.as_str()).collect()
    }

    #[test]
    fn test_seed_totals_match_lines() {
        let totals: Vec<String> = seed_orders()
            .iter()
            .map(|o| o.total_amount.display())
            .collect();
        assert_eq!(totals, ["$59.98", "$49.99", "$79.98", "$74.97", "$79.98"]);
    }

    #[test]
    fn test_default_is_newest_first() {
        let page = OrderFilter::default().apply(seed_orders());
        assert_eq!(
            numbers(&page),
            [
                "ORD-2023-004",
                "ORD-2023-003",
                "ORD-2023-002",
                "ORD-2023-001",
                "ORD-2023-005"
            ]
        );
        assert_eq!(page.per_page, 10);
    }

    #[test]
    fn test_search_matches_customer_email() {
        let page = filter("ALICE@", "", "", "").apply(seed_orders());
        assert_eq!(numbers(&page), ["ORD-2023-004"]);
    }

    #[test]
    fn test_status_filter() {
        let page = filter("", "shipped", "", "").apply(seed_orders());
        assert_eq!(numbers(&page), ["ORD-2023-002"]);
        let page = filter("", "All", "", "").apply(seed_orders());
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn test_amount_ties_break_on_number() {
        let page = filter("", "", "amount", "desc").apply(seed_orders());
        assert_eq!(
            numbers(&page).into_iter().take(2).collect::<Vec<_>>(),
            ["ORD-2023-003", "ORD-2023-005"]
        );
    }

    #[test]
    fn test_new_column_starts_descending() {
        let f = OrderFilter::default();
        assert_eq!(f.sort_href(OrderSort::Amount), "/admin/orders?sort=amount&dir=desc");
        assert_eq!(f.sort_href(OrderSort::Date), "/admin/orders?sort=date&dir=asc");
    }

    #[test]
    fn test_per_page_is_restricted_to_options() {
        let f = OrderFilter::from(OrderListQuery {
            per_page: "5".to_string(),
            ..OrderListQuery::default()
        });
        assert_eq!(f.per_page, 5);
        assert_eq!(f.page_href(2usize), "/admin/orders?per_page=5&page=2");

        let f = OrderFilter::from(OrderListQuery {
            per_page: "1000".to_string(),
            ..OrderListQuery::default()
        });
        assert_eq!(f.per_page, DEFAULT_ORDERS_PER_PAGE);
    }

    #[test]
    fn test_status_options_start_with_all() {
        let options = status_options();
        assert_eq!(options.len(), 6);
        assert_eq!(options.first().unwrap().value, "all");
    }
}
