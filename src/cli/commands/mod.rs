//! CLI command implementations
//!
//! This module contains all CLI command implementations. Commands return the
//! process exit code: 0 on success, 2 for configuration errors.

pub mod bind;
pub mod check;

use crate::binding::{self, BoundConfig};
use crate::domain::ConfigurationError;
use crate::parser::ValueParsers;
use crate::schema::load_schema;
use crate::store::{open_store, open_store_as, StoreFormat};
use clap::Args;

/// Schema and store selection shared by every command
#[derive(Args, Debug, Clone)]
pub struct BindTarget {
    /// Path to the TOML schema description
    #[arg(short, long)]
    pub schema: String,

    /// Path to the configuration source
    #[arg(long)]
    pub store: String,

    /// Store format (properties, json, yaml, toml, xml); detected from the extension by default
    #[arg(short, long)]
    pub format: Option<String>,
}

impl BindTarget {
    /// Loads the schema and store and binds them
    ///
    /// The outer error is fatal (unreadable format name); the inner one is the
    /// configuration error to report.
    pub fn bind(&self) -> anyhow::Result<Result<BoundConfig, ConfigurationError>> {
        let format = self
            .format
            .as_deref()
            .map(str::parse::<StoreFormat>)
            .transpose()?;

        let schema = match load_schema(&self.schema) {
            Ok(schema) => schema,
            Err(e) => return Ok(Err(e)),
        };

        let store = match format {
            Some(format) => open_store_as(&self.store, format),
            None => open_store(&self.store),
        };
        let store = match store {
            Ok(store) => store,
            Err(source) => return Ok(Err(ConfigurationError::Store { path: None, source })),
        };

        Ok(binding::bind(&schema, &*store, ValueParsers::builtin()))
    }
}
