//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use shopdash_common::LoggingConfig;

/// Main configuration structure for ShopDash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Shop backend connection.
    pub backend: BackendConfig,
    /// Aggregation and refresh behaviour.
    pub dashboard: DashboardConfig,
    /// Log output.
    pub logging: LoggingSettings,
}

/// Shop backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// API root, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
    /// Connection pool max idle connections per host.
    pub max_idle_per_host: usize,
    /// Client side request budget per second.
    pub rate_limit_per_sec: u32,
}

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// IANA timezone used to bucket orders by month.
    pub timezone: String,
    /// Bucket name for orders without a delivery city.
    pub unknown_city_label: String,
    /// Cap on the bars of the most-ordered products chart.
    pub top_products_limit: Option<usize>,
    /// Delay between refresh cycles in watch mode.
    pub refresh_interval_seconds: u64,
}

/// Logging configuration as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive (trace, debug, info, warn, error or a full `EnvFilter` string).
    pub level: String,
    /// Emit JSON lines instead of human readable output.
    pub json: bool,
    /// Append logs to this file instead of stderr.
    pub file: Option<String>,
}

impl LoggingSettings {
    /// Converts the file settings into the runtime logging configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            json_format: self.json,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
