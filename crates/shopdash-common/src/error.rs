//! Error types and utilities for ShopDash

use thiserror::Error;

/// Result type alias for ShopDash operations
pub type Result<T> = std::result::Result<T, ShopDashError>;

/// Main error type for ShopDash operations
#[derive(Error, Debug)]
pub enum ShopDashError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport level failures (connect, timeout, body read)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The backend answered, but not with something usable
    #[error("Backend error on {endpoint}: {message}")]
    Backend {
        message: String,
        endpoint: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Validation errors for configuration or input data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },
}

impl ShopDashError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new backend error for an endpoint
    pub fn backend(endpoint: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Backend {
            message: msg.into(),
            endpoint: endpoint.into(),
            status_code: None,
            source: None,
        }
    }

    /// Create a new backend error carrying the HTTP status
    pub fn backend_with_status(
        endpoint: impl Into<String>,
        msg: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::Backend {
            message: msg.into(),
            endpoint: endpoint.into(),
            status_code: Some(status),
            source: None,
        }
    }

    /// Create a new backend error with source
    pub fn backend_with_source(
        endpoint: impl Into<String>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Backend {
            message: msg.into(),
            endpoint: endpoint.into(),
            status_code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// HTTP status reported by the backend, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Backend { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether trying the same request again could succeed.
    ///
    /// Transport failures and 5xx answers qualify; client errors, bad payloads and
    /// configuration problems do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Backend {
                status_code: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }

    /// Short message suitable for an error indicator in the dashboard
    pub fn user_message(&self) -> String {
        match self {
            Self::Network { .. } => "The backend could not be reached".to_string(),
            Self::Backend {
                endpoint,
                status_code: Some(status),
                ..
            } => format!("The backend rejected {endpoint} (HTTP {status})"),
            Self::Backend { endpoint, .. } => format!("The backend sent unreadable data for {endpoint}"),
            Self::Serialization(_) => "The backend sent unreadable data".to_string(),
            Self::Config { .. } | Self::Validation { .. } => "The dashboard is misconfigured".to_string(),
            Self::Io(_) => "A local I/O operation failed".to_string(),
        }
    }
}

/// Convert from reqwest::Error to ShopDashError
impl From<reqwest::Error> for ShopDashError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_decode() {
            let endpoint = err.url().map(|u| u.path().to_string()).unwrap_or_default();
            Self::backend_with_source(endpoint, "Response body could not be decoded", err)
        } else if let Some(status) = err.status() {
            let endpoint = err.url().map(|u| u.path().to_string()).unwrap_or_default();
            Self::Backend {
                message: format!("HTTP error: {}", status.as_u16()),
                endpoint,
                status_code: Some(status.as_u16()),
                source: Some(Box::new(err)),
            }
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let config_error = ShopDashError::config("config issue");
        assert!(config_error.to_string().contains("Configuration error"));
        assert!(config_error.to_string().contains("config issue"));

        let backend_error = ShopDashError::backend_with_status("/orders", "Server error", 500);
        assert_eq!(
            backend_error.to_string(),
            "Backend error on /orders: Server error"
        );
        assert_eq!(backend_error.status_code(), Some(500));

        let validation_error = ShopDashError::validation_field("Invalid input", "base_url");
        assert!(validation_error.to_string().contains("Validation error"));
        assert!(validation_error.to_string().contains("Invalid input"));
    }

    #[test]
    fn test_error_with_source() {
        let config_source_error = ShopDashError::config_with_source(
            "Config loading failed",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        assert!(config_source_error.to_string().contains("Config loading failed"));
        assert!(config_source_error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ShopDashError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_error = serde_json::from_str::<serde_json::Value>(r#"{"invalid": json}"#).unwrap_err();
        let error: ShopDashError = serde_error.into();

        assert!(error.to_string().contains("Serialization error"));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ShopDashError::network("timeout").is_retryable());
        assert!(ShopDashError::backend_with_status("/orders", "boom", 503).is_retryable());
        assert!(!ShopDashError::backend_with_status("/orders", "missing", 404).is_retryable());
        assert!(!ShopDashError::backend("/orders", "bad body").is_retryable());
        assert!(!ShopDashError::config("nope").is_retryable());
    }

    #[test]
    fn test_user_message() {
        let error = ShopDashError::backend_with_status("/products/rates", "forbidden", 403);
        assert_eq!(
            error.user_message(),
            "The backend rejected /products/rates (HTTP 403)"
        );
        assert_eq!(
            ShopDashError::network("down").user_message(),
            "The backend could not be reached"
        );
    }
}
