//! Shop backend client and the fan-out/fan-in load of one aggregation cycle.

use crate::traits::RecordSource;
use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shopdash_common::{
    decode_collection, truncate_string, Order, Product, Result, Review, ShopDashError,
};
use shopdash_config::BackendConfig;
use std::{num::NonZeroU32, sync::Arc, time::Duration, time::Instant};
use tracing::{debug, error, info, instrument, warn};

/// `GET {base}/orders`
pub const ORDERS_PATH: &str = "orders";
/// `GET {base}/products`
pub const PRODUCTS_PATH: &str = "products";
/// `GET {base}/products/rates`
pub const REVIEWS_PATH: &str = "products/rates";

/// Raw collections of one aggregation cycle. Complete or not built at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    /// Every order.
    pub orders: Vec<Order>,
    /// The product catalog.
    pub products: Vec<Product>,
    /// Every review.
    pub reviews: Vec<Review>,
}

/// Fetches the three collections concurrently and waits for all of them.
///
/// The first failure aborts the cycle; nothing from the other requests is returned.
#[instrument(skip(source))]
pub async fn load_dashboard_data<S>(source: &S) -> Result<DashboardData>
where
    S: RecordSource + ?Sized,
{
    let started = Instant::now();

    let (orders, products, reviews) = tokio::try_join!(
        source.fetch_orders(),
        source.fetch_products(),
        source.fetch_reviews(),
    )
    .map_err(|e| {
        error!(error = %e, "Dashboard data load failed");
        e
    })?;

    info!(
        orders = orders.len(),
        products = products.len(),
        reviews = reviews.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Loaded dashboard data"
    );

    Ok(DashboardData {
        orders,
        products,
        reviews,
    })
}

/// HTTP implementation of [`RecordSource`] with connection pooling and rate limiting.
#[derive(Debug, Clone)]
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
    token: Option<String>,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl HttpRecordSource {
    /// Builds a client from the backend section of the configuration.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(config.max_idle_per_host)
            .build()
            .map_err(|e| ShopDashError::network_with_source("Failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| ShopDashError::config("Rate limit must be greater than 0"))?,
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            rate_limiter: Arc::new(DefaultDirectRateLimiter::direct(quota)),
        })
    }

    /// Absolute URL of a collection path.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    #[instrument(skip(self), fields(endpoint = %path))]
    async fn get_collection<T>(&self, path: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.rate_limiter.until_ready().await;

        let url = self.endpoint_url(path);
        debug!("Requesting {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Backend returned an error");
            return Err(ShopDashError::backend_with_status(
                path,
                format!("API returned {status}: {}", truncate_string(body.trim(), 200)),
                status.as_u16(),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ShopDashError::network_with_source("Failed to read response body", e))?;

        let (records, dropped) = decode_collection::<T>(&bytes).map_err(|e| {
            ShopDashError::backend_with_source(path, "Response is not a JSON array of records", e)
        })?;
        if dropped > 0 {
            warn!(dropped, "Skipped collection entries that are not records");
        }

        debug!(records = records.len(), bytes = bytes.len(), "Decoded collection");
        Ok(records)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.get_collection(ORDERS_PATH).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        self.get_collection(PRODUCTS_PATH).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>> {
        self.get_collection(REVIEWS_PATH).await
    }
}
