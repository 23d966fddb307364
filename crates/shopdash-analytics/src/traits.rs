//! The seam between aggregation and the shop backend.

use async_trait::async_trait;
use shopdash_common::{Order, Product, Result, Review};

/// Anything that can hand over the three collections the dashboard is built from.
///
/// Each call is independent; the fetcher issues all three concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Retrieves every order.
    async fn fetch_orders(&self) -> Result<Vec<Order>>;

    /// Retrieves the product catalog.
    async fn fetch_products(&self) -> Result<Vec<Product>>;

    /// Retrieves every product review.
    async fn fetch_reviews(&self) -> Result<Vec<Review>>;
}
