//! Configuration loading from YAML or TOML files with environment overrides.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use shopdash_common::{Result as ShopDashResult, ShopDashError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "SHOPDASH_CONFIG_PATH";

/// Files looked up in the working directory when no path is given.
const DEFAULT_CONFIG_FILES: [&str; 3] = ["shopdash.yaml", "shopdash.yml", "shopdash.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// File extension is neither YAML nor TOML
    #[error("Unsupported configuration format for {0}, expected .yaml, .yml or .toml")]
    UnsupportedFormat(PathBuf),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParseError { var: String, message: String },
}

impl From<ConfigError> for ShopDashError {
    fn from(err: ConfigError) -> Self {
        ShopDashError::config_with_source("Configuration loading failed", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the environment-selected file, a default file in the
    /// working directory, or built-in defaults, in that order.
    pub fn load() -> ShopDashResult<Config> {
        if let Some(path) = Self::locate() {
            return Self::load_from_file(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// The file [`ConfigLoader::load`] would read, if any.
    pub fn locate() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Load, override and validate configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ShopDashResult<Config> {
        let path = path.as_ref();
        let mut config = Self::parse_file(path)?;
        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse a configuration file without overrides or validation
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(serde_yaml::from_str(&content)?),
            Some("toml") => Ok(toml::from_str(&content)?),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Apply `SHOPDASH_*` process environment overrides
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |key| env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, keyed by environment variable name
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SHOPDASH_BASE_URL") {
            config.backend.base_url = url;
        }

        if let Some(token) = lookup("SHOPDASH_TOKEN") {
            config.backend.token = Some(token);
        }

        if let Some(timeout) = lookup("SHOPDASH_TIMEOUT") {
            config.backend.timeout_seconds = parse_var("SHOPDASH_TIMEOUT", &timeout)?;
        }

        if let Some(rate) = lookup("SHOPDASH_RATE_LIMIT") {
            config.backend.rate_limit_per_sec = parse_var("SHOPDASH_RATE_LIMIT", &rate)?;
        }

        if let Some(timezone) = lookup("SHOPDASH_TIMEZONE") {
            config.dashboard.timezone = timezone;
        }

        if let Some(limit) = lookup("SHOPDASH_TOP_PRODUCTS") {
            config.dashboard.top_products_limit = Some(parse_var("SHOPDASH_TOP_PRODUCTS", &limit)?);
        }

        if let Some(interval) = lookup("SHOPDASH_REFRESH_INTERVAL") {
            config.dashboard.refresh_interval_seconds =
                parse_var("SHOPDASH_REFRESH_INTERVAL", &interval)?;
        }

        if let Some(level) = lookup("SHOPDASH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(json) = lookup("SHOPDASH_LOG_JSON") {
            config.logging.json = parse_var("SHOPDASH_LOG_JSON", &json)?;
        }

        if let Some(file) = lookup("SHOPDASH_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        message: e.to_string(),
    })
}
