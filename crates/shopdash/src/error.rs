//! Application-wide error types using thiserror.

use shopdash_common::ShopDashError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Configuration, backend or aggregation error.
    #[error("{0}")]
    Dashboard(#[from] ShopDashError),

    /// Output could not be rendered.
    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Short message for the terminal, without internal detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Dashboard(e) => e.user_message(),
            Self::Render(_) => "The dashboard could not be rendered".to_string(),
            Self::Io(e) => format!("I/O error: {e}"),
        }
    }
}

/// Result type for the application.
pub type AppResult<T> = Result<T, AppError>;
