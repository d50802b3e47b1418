//! TrackNext authentication client
//!
//! This library provides the client side of the TrackNext signup and login
//! flow: field validation, a JSON API client that normalizes failures, and
//! authentication operations that always resolve to a uniform outcome.

pub mod api;
pub mod auth;
pub mod cli;
pub mod core;

// Re-export commonly used types
pub use api::{ApiClient, ApiError};
pub use auth::{AuthOutcome, AuthService, FormSubmitter, SubmissionOutcome};
pub use crate::core::{Config, Logger};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
