//! Normalized API errors
//!
//! Every failed call made through [`crate::api::ApiClient`] ends up as one of
//! these shapes:
//! - `Network`: no usable response was obtained (status code `0`)
//! - `Api`: the server answered with a non-2xx status
//! - `Unexpected`: the server answered 2xx with data the caller can't use

use serde_json::Value;
use std::collections::HashMap;

/// Message surfaced when no usable response was obtained
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Message surfaced when the server rejects a call without saying why
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

/// Message surfaced for failures that are neither transport nor server rejections
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Normalized failure of a single API call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: connection, DNS, invalid request or undecodable body
    #[error("{message}")]
    Network { message: String },

    /// Success status whose payload does not have the requested shape
    #[error("{message}")]
    Unexpected { message: String, status: u16 },

    /// Application failure: response received with a failure status
    #[error("{message}")]
    Api {
        message: String,
        errors: Option<HashMap<String, String>>,
        status: u16,
    },
}

impl ApiError {
    /// Transport failure with the generic connectivity message
    pub fn network() -> Self {
        ApiError::Network {
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    /// 2xx answer that could not be turned into the requested type
    pub fn unexpected(status: u16) -> Self {
        ApiError::Unexpected {
            message: UNEXPECTED_ERROR_MESSAGE.to_string(),
            status,
        }
    }

    /// Build an application failure from a decoded error body.
    ///
    /// The body is read leniently: a missing or empty `message` falls back to
    /// [`DEFAULT_ERROR_MESSAGE`], and non-string entries in `errors` are
    /// skipped.
    pub fn from_response(status: u16, body: &Value) -> Self {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_ERROR_MESSAGE)
            .to_string();

        let errors = body.get("errors").and_then(Value::as_object).map(|map| {
            map.iter()
                .filter_map(|(field, reason)| {
                    reason.as_str().map(|r| (field.clone(), r.to_string()))
                })
                .collect::<HashMap<_, _>>()
        });

        ApiError::Api {
            message,
            errors,
            status,
        }
    }

    /// Status code of the failed call, `0` for transport failures
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Network { .. } => 0,
            ApiError::Unexpected { status, .. } | ApiError::Api { status, .. } => *status,
        }
    }

    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Network { .. } => "NetworkError",
            ApiError::Unexpected { .. } => "UnexpectedResponse",
            ApiError::Api { .. } => "ApiError",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Network { message }
            | ApiError::Unexpected { message, .. }
            | ApiError::Api { message, .. } => message,
        }
    }

    /// Per-field reasons supplied by the server, if any
    pub fn field_errors(&self) -> Option<&HashMap<String, String>> {
        match self {
            ApiError::Network { .. } | ApiError::Unexpected { .. } => None,
            ApiError::Api { errors, .. } => errors.as_ref(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }
}
