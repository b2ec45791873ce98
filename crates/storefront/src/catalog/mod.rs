//! Mock catalog backend.
//!
//! Every call sleeps for the configured latency and then answers from
//! hard-coded data, standing in for a remote product and account API.
//!
//! # Example
//!
//! ```rust,ignore
//! let catalog = Catalog::new(Duration::from_millis(300));
//! let products = catalog.products().await;
//! let detail = catalog.product_detail(ProductId::new(1)).await?;
//! ```

mod account;
mod detail;
mod orders;
mod products;

use std::sync::Arc;
use std::time::Duration;

use botanical_core::{AccountBook, ProductId};
use thiserror::Error;
use tracing::instrument;

pub use detail::{
    CareInfo, Difficulty, PotStyle, ProductDetail, ProductImage, ProductVariant, PurchaseError,
    REVIEWS_PER_PAGE, Review, Size,
};
pub use orders::{CustomerOrder, CustomerOrderItem, OrderFilter, OrderSort, OrderTimelineEntry};
pub use products::{CATEGORIES, Product};

/// Errors from the catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("product {0} not found")]
    ProductNotFound(ProductId),
}

/// Client for the mock catalog.
///
/// Cheap to clone; the data is built once and shared.
#[derive(Clone)]
pub struct Catalog {
    latency: Duration,
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Build the catalog with a simulated per-call latency.
    #[must_use]
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            products: Arc::new(products::mock_products()),
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Every product, in catalog ("featured") order.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Vec<Product> {
        self.simulate_latency().await;
        self.products.as_ref().clone()
    }

    /// A single product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` for an unknown id.
    #[instrument(skip(self))]
    pub async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.simulate_latency().await;
        self.find(id).cloned()
    }

    /// Full detail for the product page.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` for an unknown id.
    #[instrument(skip(self))]
    pub async fn product_detail(&self, id: ProductId) -> Result<ProductDetail, CatalogError> {
        self.simulate_latency().await;
        self.find(id).map(ProductDetail::for_product)
    }

    /// The most recently added products, newest first.
    #[instrument(skip(self))]
    pub async fn new_arrivals(&self, count: usize) -> Vec<Product> {
        self.simulate_latency().await;
        let mut products = self.products.as_ref().clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products.truncate(count);
        products
    }

    /// Other products in the same category, for the product page.
    #[instrument(skip(self))]
    pub async fn related(&self, id: ProductId, count: usize) -> Vec<Product> {
        self.simulate_latency().await;
        let Ok(product) = self.find(id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.id != id && p.category == product.category)
            .take(count)
            .cloned()
            .collect()
    }

    /// Past orders shown on the profile orders page.
    #[instrument(skip(self))]
    pub async fn customer_orders(&self) -> Vec<CustomerOrder> {
        self.simulate_latency().await;
        orders::mock_customer_orders()
    }

    /// Addresses, cards, and preferences a new session starts with.
    #[instrument(skip(self))]
    pub async fn starter_account(&self) -> AccountBook {
        self.simulate_latency().await;
        account::starter_account()
    }

    fn find(&self, id: ProductId) -> Result<&Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .ok_or(CatalogError::ProductNotFound(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_product_lookup() {
        let catalog = Catalog::new(Duration::ZERO);
        let product = catalog.product(ProductId::new(1)).await.unwrap();
        assert_eq!(product.name, "Monstera Deliciosa");

        let missing = catalog.product(ProductId::new(999)).await;
        assert!(matches!(missing, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_new_arrivals_are_newest_first() {
        let catalog = Catalog::new(Duration::ZERO);
        let arrivals = catalog.new_arrivals(4).await;
        assert_eq!(arrivals.len(), 4);
        assert!(arrivals.windows(2).all(|w| match w {
            [a, b] => a.created_at >= b.created_at,
            _ => true,
        }));
    }

    #[tokio::test]
    async fn test_related_share_category() {
        let catalog = Catalog::new(Duration::ZERO);
        let related = catalog.related(ProductId::new(1), 3).await;
        assert!(!related.is_empty());
        assert!(related.iter().all(|p| p.category == "Indoor Plants"));
        assert!(related.iter().all(|p| p.id != ProductId::new(1)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_simulated() {
        let catalog = Catalog::new(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        let _ = catalog.products().await;
        assert!(start.elapsed() >= Duration::from_millis(500));
    }
}
