//! Store factory
//!
//! Picks a store backend from a source file's extension or an explicit format
//! name and loads the file with it.

use super::json::JsonStore;
use super::properties::PropertiesStore;
use super::toml::TomlStore;
use super::traits::Store;
use super::xml::XmlStore;
use super::yaml::YamlStore;
use crate::domain::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Supported source formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreFormat {
    /// Flat `key=value` lines
    Properties,
    Json,
    Yaml,
    Toml,
    Xml,
}

impl StoreFormat {
    /// Detects the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UnsupportedFormat`] if the path has no extension or
    /// an unknown one.
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                StoreError::UnsupportedFormat(format!("{} has no file extension", path.display()))
            })?;
        extension.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Xml => "xml",
        }
    }
}

impl FromStr for StoreFormat {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "properties" => Ok(Self::Properties),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            "xml" => Ok(Self::Xml),
            _ => Err(StoreError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loads the file at `path` with the backend matching its extension
///
/// # Errors
///
/// Returns an error if the extension is unknown, or the file cannot be read or
/// parsed.
pub fn open_store(path: impl AsRef<Path>) -> Result<Box<dyn Store>, StoreError> {
    let path = path.as_ref();
    let format = StoreFormat::from_path(path)?;
    open_store_as(path, format)
}

/// Loads the file at `path` with the given backend
pub fn open_store_as(path: impl AsRef<Path>, format: StoreFormat) -> Result<Box<dyn Store>, StoreError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), format = %format, "Opening store");

    match format {
        StoreFormat::Properties => Ok(Box::new(PropertiesStore::load(path)?) as Box<dyn Store>),
        StoreFormat::Json => Ok(Box::new(JsonStore::load(path)?) as Box<dyn Store>),
        StoreFormat::Yaml => Ok(Box::new(YamlStore::load(path)?) as Box<dyn Store>),
        StoreFormat::Toml => Ok(Box::new(TomlStore::load(path)?) as Box<dyn Store>),
        StoreFormat::Xml => Ok(Box::new(XmlStore::load(path)?) as Box<dyn Store>),
    }
}
