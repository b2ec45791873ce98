//! Application state shared across handlers.

use std::sync::Arc;

use botanical_admin::{AdminConfig, AdminState};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the mock catalog backend, and the back-office state mounted
/// under `/admin`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    admin: AdminState,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The catalog and the back office share the configured mock latency.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let catalog = Catalog::new(config.mock_latency);
        let admin = AdminState::new(AdminConfig {
            mock_latency: config.mock_latency,
        });

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                admin,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the mock catalog backend.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the back-office state.
    #[must_use]
    pub fn admin(&self) -> &AdminState {
        &self.inner.admin
    }
}
