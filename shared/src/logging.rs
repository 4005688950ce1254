//! Tracing subscriber setup driven by [`LoggingConfig`]

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// A global subscriber could not be installed
#[derive(Error, Debug)]
#[error("Failed to initialize tracing: {0}")]
pub struct LoggingInitError(String);

/// Build the filter for a configured level or directive list.
/// Unparseable directives fall back to `info`.
pub fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| level_filter(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(config.colored)
        .with_file(config.source_location)
        .with_line_number(config.source_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| LoggingInitError(e.to_string()))
}
