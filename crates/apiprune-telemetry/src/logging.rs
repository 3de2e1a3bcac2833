//! Structured logging to stderr.
//!
//! stdout carries the rendered document, so every layer writes to stderr.

use crate::{LogFormat, TelemetryConfig, TelemetryError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the logging subsystem.
///
/// Sets up tracing-subscriber in the configured format, respecting the
/// configured log level unless `RUST_LOG` is set.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.log_level)?;

    match config.log_format {
        LogFormat::Text => init_text_logging(filter),
        LogFormat::Json => init_json_logging(filter),
        LogFormat::Pretty => init_pretty_logging(filter),
    }
}

/// Build the env filter from `RUST_LOG`, falling back to `level`.
fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| TelemetryError::LoggingInit(format!("invalid log level '{level}': {e}"))),
    }
}

fn init_text_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let text_layer = fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(text_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

fn init_json_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let json_layer = fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_file(false)
        .with_line_number(false)
        .flatten_event(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(json_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

fn init_pretty_logging(filter: EnvFilter) -> Result<(), TelemetryError> {
    let pretty_layer = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(pretty_layer)
        .try_init()
        .map_err(|e: tracing_subscriber::util::TryInitError| {
            TelemetryError::LoggingInit(e.to_string())
        })
}

/// Standard log event names.
pub mod events {
    /// A command has started.
    pub const STARTUP: &str = "startup";

    /// A document has been read and parsed.
    pub const DOCUMENT_LOADED: &str = "document_loaded";

    /// A document has been pruned.
    pub const DOCUMENT_PRUNED: &str = "document_pruned";

    /// A rendered document has been written to a file.
    pub const DOCUMENT_WRITTEN: &str = "document_written";

    /// A document failed structural validation.
    pub const VALIDATION_FAILURE: &str = "validation_failure";
}

/// Helper macros for structured logging with standard fields.
///
/// These wrap the tracing macros to ensure consistent field naming.
#[macro_export]
macro_rules! log_startup {
    ($($field:tt)*) => {
        tracing::debug!(
            event = $crate::logging::events::STARTUP,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_document_loaded {
    ($($field:tt)*) => {
        tracing::debug!(
            event = $crate::logging::events::DOCUMENT_LOADED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_document_pruned {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::DOCUMENT_PRUNED,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_document_written {
    ($($field:tt)*) => {
        tracing::info!(
            event = $crate::logging::events::DOCUMENT_WRITTEN,
            $($field)*
        )
    };
}

#[macro_export]
macro_rules! log_validation_failure {
    ($($field:tt)*) => {
        tracing::warn!(
            event = $crate::logging::events::VALIDATION_FAILURE,
            $($field)*
        )
    };
}
