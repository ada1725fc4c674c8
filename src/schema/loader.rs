//! Schema description loader
//!
//! Reads a TOML schema description from disk, parses and validates it, and
//! converts it into a [`Schema`].

use super::description::SchemaDescription;
use super::node::Schema;
use crate::domain::errors::ConfigurationError;
use crate::domain::result::Result;
use std::fs;
use std::path::Path;

/// Loads a schema from a TOML description file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Parses it into a [`SchemaDescription`]
/// 3. Validates the description
/// 4. Builds the [`Schema`]
///
/// # Errors
///
/// Returns [`ConfigurationError::Schema`] if the file cannot be read, is not valid
/// TOML, or describes an invalid schema.
///
/// # Examples
///
/// ```no_run
/// use confbind::schema::load_schema;
///
/// let schema = load_schema("app.schema.toml").expect("Failed to load schema");
/// ```
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigurationError::Schema(format!(
            "Schema file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ConfigurationError::Schema(format!(
            "Failed to read schema file {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::debug!(path = %path.display(), "Loading schema description");
    parse_schema(&contents)
}

/// Parses a schema from TOML description text
pub fn parse_schema(contents: &str) -> Result<Schema> {
    let description: SchemaDescription = toml::from_str(contents)?;
    description.into_schema()
}
