//! Structured logging setup using tracing
//!
//! Logs go to stderr so the bound configuration printed on stdout stays
//! machine-readable. `RUST_LOG` overrides the level passed in.
//!
//! # Example
//!
//! ```no_run
//! use confbind::logging::{init_logging, LogFormat};
//!
//! init_logging("info", LogFormat::Text).expect("Failed to initialize logging");
//! ```

use crate::domain::{ConfigurationError, Result};
use std::fmt;
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::Logging(format!(
                "Invalid log format: {s}. Must be one of: text, json"
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Initialize the global tracing subscriber
///
/// # Arguments
///
/// * `log_level_str` - Log level as a string (trace, debug, info, warn, error)
/// * `format` - Output format
///
/// # Errors
///
/// Returns [`ConfigurationError::Logging`] if the level is invalid or a global
/// subscriber is already installed.
pub fn init_logging(log_level_str: &str, format: LogFormat) -> Result<()> {
    let log_level = parse_log_level(log_level_str)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("confbind={log_level}")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| ConfigurationError::Logging(e.to_string()))?;

    tracing::debug!(level = %log_level, format = %format, "Logging initialized");
    Ok(())
}

/// Parse log level from string
fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(ConfigurationError::Logging(format!(
            "Invalid log level: {level_str}. Must be one of: trace, debug, info, warn, error"
        ))),
    }
}
