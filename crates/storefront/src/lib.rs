//! Botanical Store storefront library.
//!
//! This crate provides the storefront as a library so the full router can
//! be spawned by integration tests and by the binary alike.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod client_state;
pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod messages;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Directory holding the stylesheet and other static assets.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Build the complete application router.
///
/// Storefront pages, `/health`, static assets, and the back office under
/// `/admin`, wrapped in the middleware stack described in [`middleware`].
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());
    let admin = botanical_admin::router(state.admin().clone());

    Router::new()
        .route("/health", get(health))
        .nest("/admin", admin)
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. There are no dependencies to check.
async fn health() -> &'static str {
    "ok"
}
