//! Domain error types
//!
//! This module defines the error hierarchy for confbind. Binding failures are
//! reported as [`ConfigurationError`], always qualified with the [`Path`] active
//! at the point of failure; store backends report [`StoreError`], which the
//! binding engine re-surfaces with path context attached.

use super::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Main confbind error type
///
/// Every variant that arises during binding carries the option path it failed at.
/// The rendered message follows the form `"<reason> in <path>"`, or just
/// `"<reason>"` when no path context exists.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// A required option without default has no value in the store
    #[error("{}", qualify(.message, .path))]
    MissingValue { message: String, path: Option<Path> },

    /// A value could not be parsed, or no parser exists for the declared type
    #[error("{}", qualify(.message, .path))]
    TypeParse { message: String, path: Option<Path> },

    /// A store expected a container and found a leaf, or found several matches
    #[error("{}", qualify(.message, .path))]
    NotAnObject { message: String, path: Option<Path> },

    /// Any other store failure
    #[error("{}", qualify_source(.source, .path))]
    Store {
        path: Option<Path>,
        #[source]
        source: StoreError,
    },

    /// The schema itself is invalid
    #[error("Invalid schema: {0}")]
    Schema(String),

    /// A bound configuration was read with an unknown name or the wrong type
    #[error("{0}")]
    Access(String),

    /// Invalid logging settings
    #[error("Logging configuration error: {0}")]
    Logging(String),
}

fn qualify(message: &str, path: &Option<Path>) -> String {
    match path {
        Some(path) => format!("{message} in {path}"),
        None => message.to_string(),
    }
}

fn qualify_source(source: &StoreError, path: &Option<Path>) -> String {
    qualify(&source.to_string(), path)
}

impl ConfigurationError {
    /// A mandatory option has no value at `path`
    ///
    /// The rendered message always carries the path, top-level options included:
    /// `"No value provided for mandatory option port in port"`.
    pub fn missing_value(path: &Path) -> Self {
        Self::MissingValue {
            message: format!(
                "No value provided for mandatory option {}",
                path.option_name()
            ),
            path: Some(path.clone()),
        }
    }

    /// A value or type failed to parse at `path`
    pub fn type_parse(message: impl Into<String>, path: Option<&Path>) -> Self {
        Self::TypeParse {
            message: message.into(),
            path: path.cloned(),
        }
    }

    /// Re-surfaces a store failure with the path it occurred at
    pub fn from_store(error: StoreError, path: &Path) -> Self {
        match error {
            StoreError::NotAnObject(message) => Self::NotAnObject {
                message,
                path: Some(path.clone()),
            },
            source => Self::Store {
                path: Some(path.clone()),
                source,
            },
        }
    }

    /// The path the error is qualified with, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::MissingValue { path, .. }
            | Self::TypeParse { path, .. }
            | Self::NotAnObject { path, .. }
            | Self::Store { path, .. } => path.as_ref(),
            Self::Schema(_) | Self::Access(_) | Self::Logging(_) => None,
        }
    }

    /// Whether this error means "nothing is stored here"
    pub fn is_missing_value(&self) -> bool {
        matches!(self, Self::MissingValue { .. })
    }
}

/// Store-specific errors
///
/// Errors raised by [`Store`](crate::store::Store) implementations. These never
/// carry path context themselves; the binding engine attaches it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An ancestor of the requested value is not a container, or a markup
    /// lookup matched more than one node
    #[error("{0}")]
    NotAnObject(String),

    /// Backend-specific structural failure
    #[error("{0}")]
    Backend(String),

    /// The source could not be read
    #[error("Can not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not a well-formed document of its format
    #[error("Could not parse {format} source: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },

    /// No backend handles the requested format
    #[error("Unsupported store format: {0}")]
    UnsupportedFormat(String),
}

impl StoreError {
    pub(crate) fn malformed(format: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Malformed {
            format,
            message: error.to_string(),
        }
    }
}

// Conversion from toml parse errors, used by the schema description loader
impl From<toml::de::Error> for ConfigurationError {
    fn from(err: toml::de::Error) -> Self {
        ConfigurationError::Schema(format!("TOML parse error: {err}"))
    }
}
