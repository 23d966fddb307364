//! Integration tests for shopdash crate.
//!
//! These drive the application with a config file on disk and an in-process backend.

use async_trait::async_trait;
use clap::Parser;
use shopdash::{render_snapshot, App, Args, OutputFormat};
use shopdash_analytics::{DashboardCharts, RecordSource};
use shopdash_common::test_utils::{init_test_logging, payloads};
use shopdash_common::{Order, Product, Result, Review, ShopDashError};
use std::io::Write;

struct RecordedBackend;

#[async_trait]
impl RecordSource for RecordedBackend {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        Ok(serde_json::from_str(payloads::ORDERS)?)
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        Ok(serde_json::from_str(payloads::PRODUCTS)?)
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>> {
        Ok(serde_json::from_str(payloads::REVIEWS)?)
    }
}

struct DownBackend;

#[async_trait]
impl RecordSource for DownBackend {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        Err(ShopDashError::network("connection refused"))
    }

    async fn fetch_products(&self) -> Result<Vec<Product>> {
        Ok(Vec::new())
    }

    async fn fetch_reviews(&self) -> Result<Vec<Review>> {
        Ok(Vec::new())
    }
}

fn app_with(config: &str) -> (App, tempfile::NamedTempFile) {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(config.as_bytes()).unwrap();
    let args = Args::try_parse_from(["shopdash", "--config", file.path().to_str().unwrap()]).unwrap();
    (App::new(args).unwrap(), file)
}

#[tokio::test]
async fn test_snapshot_uses_configured_options() {
    init_test_logging();

    let (app, _file) = app_with(
        r#"
[dashboard]
timezone = "Africa/Tunis"
unknown_city_label = "Sans ville"
top_products_limit = 1
"#,
    );

    let snapshot = app.snapshot_from(&RecordedBackend).await.unwrap();
    let cities: Vec<&str> = snapshot.city_stats.iter().map(|s| s.city.as_str()).collect();
    assert_eq!(cities, vec!["Tunis", "Sans ville"]);
    assert_eq!(snapshot.monthly[0], 1);
    assert_eq!(snapshot.monthly[1], 1);
    assert_eq!(snapshot.rankings[0].name, "Soap");
    assert_eq!(snapshot.rankings[0].count, 3);

    let text = render_snapshot(&snapshot, OutputFormat::Text, Some(1)).unwrap();
    assert!(text.contains("Sans ville"));

    let charts = DashboardCharts::from_snapshot(&snapshot, Some(1));
    assert_eq!(charts.top_products.labels, vec!["Soap"]);
}

#[tokio::test]
async fn test_backend_failure_propagates() {
    init_test_logging();

    let (app, _file) = app_with("[backend]\ntimeout_seconds = 5\n");
    let err = app.snapshot_from(&DownBackend).await.unwrap_err();
    assert_eq!(err.user_message(), "The backend could not be reached");
}

#[test]
fn test_unreadable_config_file() {
    let args = Args::try_parse_from(["shopdash", "--config", "/no/such/shopdash.yaml"]).unwrap();
    assert!(App::new(args).is_err());
}
