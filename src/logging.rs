//! Logging setup for host applications
//!
//! Library crates in this workspace only emit `tracing` events; installing a
//! subscriber is the host's job, via this module. Supports pretty, compact,
//! and JSON output with `EnvFilter`-style directives.
//!
//! ## Usage
//!
//! ```ignore
//! use catalog_import::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_filter("core_reconcile=debug,info");
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Import starting");
//! ```

use thiserror::Error;
use tracing_subscriber::filter::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format with colors
    Pretty,
    /// Structured JSON format for machine parsing
    Json,
    /// Compact format for production
    Compact,
}

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Custom filter directives (e.g. `"core_reconcile=debug,info"`);
    /// falls back to `RUST_LOG`, then to `info`
    pub filter: Option<String>,
    /// Display target module in logs
    pub display_target: bool,
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn with_display_target(mut self, display_target: bool) -> Self {
        self.display_target = display_target;
        self
    }
}

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },

    #[error("A global subscriber is already installed")]
    AlreadyInitialized,
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails if the configured filter directives do not parse, or if another
/// global subscriber has already been installed in this process.
pub fn init_logging(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = match &config.filter {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| LoggingError::InvalidFilter {
                filter: directives.clone(),
                message: e.to_string(),
            })?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.display_target);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|_| LoggingError::AlreadyInitialized)
}
