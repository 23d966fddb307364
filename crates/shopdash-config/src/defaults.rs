//! Default values for every configuration section.

use crate::schema::*;

/// Default API root of the shop backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// Label used for orders without a delivery city.
pub const DEFAULT_UNKNOWN_CITY_LABEL: &str = "Unknown";

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_seconds: 30,
            max_idle_per_host: 10,
            rate_limit_per_sec: 10,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            unknown_city_label: DEFAULT_UNKNOWN_CITY_LABEL.to_string(),
            top_products_limit: None,
            refresh_interval_seconds: 60,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
