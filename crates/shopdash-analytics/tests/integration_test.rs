//! Integration tests for shopdash-analytics crate.
//!
//! A fake backend serves the recorded payloads so the whole path from JSON to charts
//! runs without a network.

use async_trait::async_trait;
use shopdash_analytics::{
    load_dashboard_data, AnalyticsOptions, DashboardCharts, DashboardSession, RecordSource,
    ViewState, PRODUCTS_PATH,
};
use shopdash_common::test_utils::{init_test_logging, payloads};
use shopdash_common::{Order, Product, Result, Review, ShopDashError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Serves the recorded payloads, optionally slowly or with a broken products endpoint.
#[derive(Default)]
struct FakeBackend {
    delay: Option<Duration>,
    products_status: Option<u16>,
    calls: AtomicUsize,
}

impl FakeBackend {
    async fn serve<T: serde::de::DeserializeOwned>(&self, payload: &str) -> Result<Vec<T>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(serde_json::from_str(payload)?)
    }
}

#[async_trait]
impl RecordSource for FakeBackend {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.serve(payloads::ORDERS).await
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        if let Some(status) = self.products_status {
            self.calls.fetch_add(1, Ordering::SeqCst);
            return Err(ShopDashError::backend_with_status(PRODUCTS_PATH, "unavailable", status));
        }
        self.serve(payloads::PRODUCTS).await
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>> {
        self.serve(payloads::REVIEWS).await
    }
}

#[tokio::test]
async fn test_payloads_to_charts() {
    init_test_logging();

    let backend = FakeBackend::default();
    let data = load_dashboard_data(&backend).await.unwrap();
    assert_eq!(backend.calls.load(Ordering::SeqCst), 3);

    let session = DashboardSession::new();
    let snapshot = session
        .refresh(&backend, &AnalyticsOptions::default())
        .await
        .unwrap();
    assert_eq!(snapshot.totals.orders, data.orders.len());

    let charts = DashboardCharts::from_snapshot(&snapshot, None);
    assert_eq!(charts.by_city.labels, vec!["Tunis", "Unknown"]);
    assert_eq!(charts.by_month.datasets[0].data[..2], [1, 1]);
    assert_eq!(charts.top_products.labels, vec!["Soap"]);
    assert_eq!(charts.top_products.datasets[0].data, vec![3]);
    assert_eq!(charts.reviews.datasets[0].label, "Soap");
    assert_eq!(charts.reviews.datasets[0].data, vec![0, 0, 1, 0, 1]);
}

#[tokio::test]
async fn test_backend_error_surfaces_once() {
    init_test_logging();

    let backend = FakeBackend {
        products_status: Some(502),
        ..FakeBackend::default()
    };
    let err = load_dashboard_data(&backend).await.unwrap_err();
    assert_eq!(err.status_code(), Some(502));
    assert!(err.is_retryable());

    let session = DashboardSession::new();
    assert!(session.refresh(&backend, &AnalyticsOptions::default()).await.is_err());
    match session.state() {
        ViewState::Failed { message, previous } => {
            assert!(message.contains("HTTP 502"));
            assert!(previous.is_none());
        }
        other => panic!("expected failed state, got {other:?}"),
    }
}

#[tokio::test]
async fn test_slow_cycle_does_not_overwrite_newer_one() {
    init_test_logging();

    let session = DashboardSession::new();
    let options = AnalyticsOptions::default();
    let slow = FakeBackend {
        delay: Some(Duration::from_millis(200)),
        ..FakeBackend::default()
    };
    let fast = FakeBackend::default();

    let slow_cycle = session.refresh(&slow, &options);
    let fast_cycle = async {
        // Let the slow cycle take its ticket first.
        tokio::time::sleep(Duration::from_millis(20)).await;
        session.refresh(&fast, &options).await
    };
    let (older, newer) = tokio::join!(slow_cycle, fast_cycle);
    let (older, newer) = (older.unwrap(), newer.unwrap());

    assert!(!Arc::ptr_eq(&older, &newer));
    match session.state() {
        ViewState::Ready(published) => assert!(Arc::ptr_eq(&published, &newer)),
        other => panic!("expected ready state, got {other:?}"),
    }
}
