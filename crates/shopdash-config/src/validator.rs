//! Runtime validation of a loaded configuration.

use crate::schema::{Config, DashboardConfig};
use chrono_tz::Tz;
use shopdash_common::{Result, ShopDashError};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        let backend = &config.backend;

        let url = url::Url::parse(&backend.base_url).map_err(|e| {
            ShopDashError::validation_field(
                format!("'{}' is not a valid URL: {e}", backend.base_url),
                "backend.base_url",
            )
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ShopDashError::validation_field(
                format!("unsupported scheme '{}', expected http or https", url.scheme()),
                "backend.base_url",
            ));
        }

        if backend.timeout_seconds == 0 {
            return Err(ShopDashError::validation_field(
                "timeout must be greater than 0",
                "backend.timeout_seconds",
            ));
        }

        if backend.rate_limit_per_sec == 0 {
            return Err(ShopDashError::validation_field(
                "rate limit must be greater than 0",
                "backend.rate_limit_per_sec",
            ));
        }

        if matches!(backend.token.as_deref(), Some(token) if token.trim().is_empty()) {
            return Err(ShopDashError::validation_field(
                "token cannot be blank; omit it instead",
                "backend.token",
            ));
        }

        Self::validate_dashboard(&config.dashboard)?;

        let level = config.logging.level.trim();
        let is_directive_list = level.contains('=') || level.contains(',');
        if !is_directive_list && !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            return Err(ShopDashError::validation_field(
                format!("unknown log level '{level}'"),
                "logging.level",
            ));
        }

        Ok(())
    }

    fn validate_dashboard(dashboard: &DashboardConfig) -> Result<()> {
        dashboard.tz()?;

        if dashboard.unknown_city_label.trim().is_empty() {
            return Err(ShopDashError::validation_field(
                "label cannot be empty",
                "dashboard.unknown_city_label",
            ));
        }

        if dashboard.top_products_limit == Some(0) {
            return Err(ShopDashError::validation_field(
                "limit must be greater than 0 when set",
                "dashboard.top_products_limit",
            ));
        }

        if dashboard.refresh_interval_seconds == 0 {
            return Err(ShopDashError::validation_field(
                "refresh interval must be greater than 0",
                "dashboard.refresh_interval_seconds",
            ));
        }

        Ok(())
    }
}

impl DashboardConfig {
    /// Resolves the configured IANA timezone.
    pub fn tz(&self) -> Result<Tz> {
        self.timezone.parse::<Tz>().map_err(|_| {
            ShopDashError::validation_field(
                format!("unknown timezone '{}'", self.timezone),
                "dashboard.timezone",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ShopDashError) -> Option<String> {
        match err {
            ShopDashError::Validation { field, .. } => field,
            _ => None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut config = Config::default();
        config.backend.base_url = "localhost:8000".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("backend.base_url"));

        config.backend.base_url = "not a url".to_string();
        assert!(ConfigValidator::validate(&config).is_err());

        config.backend.base_url = "ftp://shop.example/api".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_limits() {
        let mut config = Config::default();
        config.backend.rate_limit_per_sec = 0;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("backend.rate_limit_per_sec"));

        let mut config = Config::default();
        config.dashboard.top_products_limit = Some(0);
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("dashboard.top_products_limit"));
    }

    #[test]
    fn test_timezone_resolution() {
        let mut dashboard = DashboardConfig::default();
        assert_eq!(dashboard.tz().unwrap(), chrono_tz::UTC);

        dashboard.timezone = "Africa/Tunis".to_string();
        assert_eq!(dashboard.tz().unwrap(), chrono_tz::Africa::Tunis);

        dashboard.timezone = "Mars/Olympus".to_string();
        assert!(dashboard.tz().is_err());
    }

    #[test]
    fn test_log_level_rules() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "info,shopdash_analytics=trace".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "chatty".to_string();
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("logging.level"));
    }

    #[test]
    fn test_blank_token_rejected() {
        let mut config = Config::default();
        config.backend.token = Some("  ".to_string());
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
