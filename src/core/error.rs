//! Crate-level error types
//!
//! Request-path failures are modelled by [`crate::api::ApiError`] and never
//! reach this type. `AppError` covers everything that can go wrong while the
//! client is being assembled:
//! - Configuration validation
//! - HTTP client construction

use crate::core::config::ConfigError;

/// Main error type for client initialization
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),
}

impl AppError {
    /// Get the error type name for diagnostics
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::ConfigError(_) => "ConfigError",
            AppError::HttpClientError(_) => "HttpClientError",
        }
    }
}

/// Result type alias for operations that can fail with AppError
pub type Result<T> = std::result::Result<T, AppError>;
