//! Structured logging system
//!
//! This module provides structured logging with:
//! - JSON and text format support
//! - Configurable log levels, overridable through `RUST_LOG`
//! - stderr, stdout or file output through a non-blocking writer

use crate::core::config::LoggingConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// Logger instance that manages the logging system
pub struct Logger {
    _guard: WorkerGuard,
}

impl Logger {
    /// Initialize the logging system based on configuration
    ///
    /// This sets up the global tracing subscriber with the specified format,
    /// level, and output destination. The returned value must be held for
    /// the lifetime of the process so buffered lines get flushed.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let level = parse_log_level(&config.level)?;

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str()));

        let (writer, guard) = make_writer(&config.output, config.log_file.as_deref())?;

        let fmt_layer = match config.format.as_str() {
            "json" => fmt::layer()
                .json()
                .with_writer(writer)
                .with_current_span(true)
                .with_target(true)
                .boxed(),
            "text" => fmt::layer()
                .with_writer(writer)
                .with_ansi(config.output != "file")
                .with_target(true)
                .boxed(),
            _ => {
                anyhow::bail!("Invalid format configuration: {}", config.format);
            }
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .context("Failed to initialize tracing subscriber")?;

        tracing::debug!(
            level = %config.level,
            format = %config.format,
            output = %config.output,
            "Logging system initialized"
        );

        Ok(Logger { _guard: guard })
    }
}

fn make_writer(output: &str, log_file: Option<&Path>) -> Result<(NonBlocking, WorkerGuard)> {
    match output {
        "stderr" => Ok(tracing_appender::non_blocking(std::io::stderr())),
        "stdout" => Ok(tracing_appender::non_blocking(std::io::stdout())),
        "file" => {
            let log_file = log_file.context("log_file must be specified when output is 'file'")?;
            let (directory, filename) = split_log_path(log_file)?;

            std::fs::create_dir_all(directory).context("Failed to create log directory")?;

            let appender = tracing_appender::rolling::never(directory, filename);
            Ok(tracing_appender::non_blocking(appender))
        }
        _ => anyhow::bail!("Invalid output configuration: {}", output),
    }
}

/// Split a log file path into its directory and file name
fn split_log_path(log_file: &Path) -> Result<(&Path, &str)> {
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let filename = log_file
        .file_name()
        .context("Log file must have a filename")?
        .to_str()
        .context("Log filename must be valid UTF-8")?;

    Ok((directory, filename))
}

/// Parse log level string to tracing Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {}", level),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_log_level("debug"), Ok(Level::DEBUG)));
        assert!(matches!(parse_log_level("INFO"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("warn"), Ok(Level::WARN)));
        assert!(matches!(parse_log_level("error"), Ok(Level::ERROR)));
        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_split_log_path() {
        let (dir, name) = split_log_path(Path::new("/tmp/logs/auth.log")).unwrap();
        assert_eq!(dir, Path::new("/tmp/logs"));
        assert_eq!(name, "auth.log");

        let (dir, name) = split_log_path(Path::new("auth.log")).unwrap();
        assert_eq!(dir, Path::new("."));
        assert_eq!(name, "auth.log");
    }

    #[test]
    fn test_make_writer_rejects_unknown_output() {
        assert!(make_writer("syslog", None).is_err());
        assert!(make_writer("file", None).is_err());
    }
}
