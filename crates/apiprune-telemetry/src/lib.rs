//! Logging infrastructure for the apiprune CLI.
//!
//! Structured logging to stderr in text, JSON or pretty format, plus a set
//! of standard event names and macros so every command logs the same way.
//!
//! # Usage
//!
//! ```ignore
//! use apiprune_telemetry::{LogFormat, TelemetryConfig};
//!
//! let config = TelemetryConfig::new()
//!     .with_log_level("info")
//!     .with_log_format(LogFormat::Json);
//!
//! apiprune_telemetry::init(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::{LogFormat, TelemetryConfig};
pub use logging::events;

use thiserror::Error;

/// Telemetry errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Install the global subscriber described by `config`.
///
/// Fails if a subscriber is already installed.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_logging(config)?;
    crate::log_startup!(service = %config.service_name, "telemetry initialized");
    Ok(())
}
