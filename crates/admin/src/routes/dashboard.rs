//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::filters;
use crate::messages::MessageQuery;
use crate::middleware::RequireAdmin;
use crate::models::{DashboardStats, dashboard};
use crate::routes::{AdminContext, Section};
use crate::state::AdminState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: AdminContext,
    pub stats: DashboardStats,
    pub chart_max: u32,
}

/// Dashboard: headline cards, monthly sales chart, top products, recent orders.
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AdminState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<MessageQuery>,
) -> DashboardTemplate {
    let recent = state
        .read(|office| office.recent_orders(dashboard::RECENT_ORDERS))
        .await;
    let stats = dashboard::mock_stats(recent);

    DashboardTemplate {
        ctx: AdminContext::new(admin, Section::Dashboard, &query),
        chart_max: stats.chart_max(),
        stats,
    }
}
