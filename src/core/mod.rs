//! Core application layer
//!
//! This module provides the ambient plumbing shared by the client:
//! - Configuration management
//! - Structured logging system
//! - Initialization error types

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig};
pub use error::{AppError, Result};
pub use logging::Logger;
