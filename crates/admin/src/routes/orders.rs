//! Orders manager route handlers.
//!
//! The list supports search, a status filter, sortable columns, and a
//! page-size selector. Status changes come from the detail page (one order)
//! or the bulk bar above the table (every checked row).

use std::str::FromStr;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    body::Bytes,
    extract::{Path, Query, State},
    response::Redirect,
};
use botanical_core::{OrderId, OrderStatus, Page};
use chrono::Utc;
use tracing::instrument;

use crate::components::data_table::{FilterOption, SortKey, TableColumn};
use crate::error::Result;
use crate::filters;
use crate::messages::{self, MessageKind, MessageQuery};
use crate::middleware::RequireAdmin;
use crate::models::{
    AdminOrder, OrderFilter, OrderSort,
    order::{ORDER_COLUMNS, ORDER_PAGE_SIZES, OrderListQuery, StatusForm, status_options},
};
use crate::routes::{AdminContext, Section};
use crate::state::AdminState;

const ORDERS_PATH: &str = "/admin/orders";

// =============================================================================
// Templates
// =============================================================================

/// Orders list template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersTemplate {
    pub ctx: AdminContext,
    pub filter: OrderFilter,
    pub page: Page<AdminOrder>,
    pub columns: [TableColumn<OrderSort>; 7],
    pub status_options: Vec<FilterOption>,
    pub statuses: &'static [OrderStatus],
    pub page_sizes: [usize; 4],
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/show.html")]
pub struct OrderTemplate {
    pub ctx: AdminContext,
    pub order: AdminOrder,
    pub statuses: &'static [OrderStatus],
}

// =============================================================================
// Form Types
// =============================================================================

/// Bulk status form: the chosen status plus one `order_id` per checked row.
///
/// Repeated keys do not fit `Form`, so the body is parsed by hand.
#[derive(Debug, Default, PartialEq, Eq)]
struct BulkStatusForm {
    order_ids: Vec<OrderId>,
    status: String,
    return_to: String,
}

impl BulkStatusForm {
    fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            match key.as_ref() {
                "order_id" => {
                    if let Ok(id) = value.trim().parse::<i32>() {
                        form.order_ids.push(OrderId::new(id));
                    }
                }
                "status" => form.status = value.into_owned(),
                "return_to" => form.return_to = value.into_owned(),
                _ => {}
            }
        }
        form
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Orders table.
#[instrument(skip(state, admin, list, query))]
pub async fn index(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Query(list): Query<OrderListQuery>,
    Query(query): Query<MessageQuery>,
) -> OrdersTemplate {
    let filter = OrderFilter::from(list);
    let orders = state.read(|office| office.orders().to_vec()).await;
    let page = filter.apply(orders);

    OrdersTemplate {
        ctx: AdminContext::new(admin, Section::Orders, &query),
        filter,
        page,
        columns: ORDER_COLUMNS,
        status_options: status_options(),
        statuses: OrderStatus::ALL,
        page_sizes: ORDER_PAGE_SIZES,
    }
}

/// One order with its lines, address, and status form.
#[instrument(skip(state, admin, query))]
pub async fn show(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Query(query): Query<MessageQuery>,
) -> Result<OrderTemplate> {
    let order = state.read(|office| office.order(id).cloned()).await?;
    Ok(OrderTemplate {
        ctx: AdminContext::new(admin, Section::Orders, &query),
        order,
        statuses: OrderStatus::ALL,
    })
}

/// Change one order's status.
#[instrument(skip(state, _admin, form))]
pub async fn update_status(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<OrderId>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let detail = format!("{ORDERS_PATH}/{id}");
    let return_to = messages::safe_return_path(&form.return_to, &detail);

    let Ok(status) = OrderStatus::from_str(&form.status) else {
        return messages::error(return_to, "invalid_status");
    };

    let updated = state
        .write(|office| {
            office
                .update_order_status(id, status, Utc::now())
                .map(|order| order.order_number.clone())
        })
        .await;

    match updated {
        Ok(number) => {
            tracing::info!(order_id = %id, %status, "Order status updated");
            messages::redirect_with(
                return_to,
                MessageKind::Success,
                "order_status_updated",
                &[
                    ("item", number),
                    ("new_status", status.as_str().to_string()),
                ],
            )
        }
        Err(error) => {
            tracing::warn!(%error, "Order status update failed");
            messages::error(ORDERS_PATH, "order_not_found")
        }
    }
}

/// Set the status of every checked order.
#[instrument(skip(state, _admin, body))]
pub async fn bulk_status(
    State(state): State<AdminState>,
    RequireAdmin(_admin): RequireAdmin,
    body: Bytes,
) -> Redirect {
    let form = BulkStatusForm::parse(&body);
    let return_to = messages::safe_return_path(&form.return_to, ORDERS_PATH);

    if form.order_ids.is_empty() {
        return messages::error(return_to, "no_orders_selected");
    }
    let Ok(status) = OrderStatus::from_str(&form.status) else {
        return messages::error(return_to, "invalid_status");
    };

    let count = state
        .write(|office| office.bulk_update_order_status(&form.order_ids, status, Utc::now()))
        .await;
    if count == 0 {
        tracing::warn!(requested = form.order_ids.len(), "Bulk update matched no orders");
        return messages::error(return_to, "order_not_found");
    }

    tracing::info!(count, %status, "Orders bulk updated");
    messages::redirect_with(
        return_to,
        MessageKind::Success,
        "orders_bulk_updated",
        &[
            ("count", count.to_string()),
            ("new_status", status.as_str().to_string()),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulk_form_collects_repeated_ids() {
        let form = BulkStatusForm::parse(
            b"order_id=1&order_id=3&order_id=x&status=shipped&return_to=%2Fadmin%2Forders%3Fpage%3D2",
        );
        assert_eq!(form.order_ids, vec![OrderId::new(1), OrderId::new(3)]);
        assert_eq!(form.status, "shipped");
        assert_eq!(form.return_to, "/admin/orders?page=2");
    }

    #[test]
    fn test_bulk_form_without_ids() {
        let form = BulkStatusForm::parse(b"status=delivered");
        assert!(form.order_ids.is_empty());
    }
}
