//! HTTP API access
//!
//! This module provides the JSON client used by the authentication layer and
//! the normalized error shape it produces.

pub mod client;
pub mod error;

pub use client::{ApiClient, Headers};
pub use error::{ApiError, DEFAULT_ERROR_MESSAGE, NETWORK_ERROR_MESSAGE, UNEXPECTED_ERROR_MESSAGE};
