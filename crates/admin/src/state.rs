//! Back-office state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::store::BackOffice;

/// Settings handed to the back office by the server binary.
#[derive(Debug, Clone, Default)]
pub struct AdminConfig {
    /// Simulated backend latency applied to every data access.
    pub mock_latency: Duration,
}

/// Back-office state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The tables live behind a
/// [`tokio::sync::RwLock`]; each access holds the lock only for the
/// closure it runs.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

struct AdminStateInner {
    config: AdminConfig,
    office: RwLock<BackOffice>,
}

impl AdminState {
    /// Create the state with freshly seeded tables.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        Self::with_office(config, BackOffice::seeded())
    }

    /// Create the state around existing tables.
    #[must_use]
    pub fn with_office(config: AdminConfig, office: BackOffice) -> Self {
        Self {
            inner: Arc::new(AdminStateInner {
                config,
                office: RwLock::new(office),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    async fn simulate_latency(&self) {
        let latency = self.inner.config.mock_latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Run `f` against the tables under the read lock.
    pub async fn read<T>(&self, f: impl FnOnce(&BackOffice) -> T) -> T {
        self.simulate_latency().await;
        let office = self.inner.office.read().await;
        f(&office)
    }

    /// Run `f` against the tables under the write lock.
    pub async fn write<T>(&self, f: impl FnOnce(&mut BackOffice) -> T) -> T {
        self.simulate_latency().await;
        let mut office = self.inner.office.write().await;
        f(&mut office)
    }
}

#[cfg(test)]
mod tests {
    use botanical_core::{OrderId, OrderStatus};

    use super::*;

    #[tokio::test]
    async fn test_writes_are_visible_to_clones() {
        let state = AdminState::new(AdminConfig::default());
        let other = state.clone();

        let count = state
            .write(|office| {
                office.bulk_update_order_status(
                    &[OrderId::new(1)],
                    OrderStatus::Pending,
                    chrono::Utc::now(),
                )
            })
            .await;
        assert_eq!(count, 1);

        let status = other
            .read(|office| office.order(OrderId::new(1)).map(|o| o.status))
            .await;
        assert_eq!(status, Ok(OrderStatus::Pending));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let state = AdminState::new(AdminConfig {
            mock_latency: Duration::from_millis(800),
        });
        let start = tokio::time::Instant::now();
        let products = state.read(|office| office.products().len()).await;
        assert_eq!(products, 6);
        assert!(start.elapsed() >= Duration::from_millis(800));
    }
}
