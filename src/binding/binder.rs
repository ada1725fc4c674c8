//! Fluent binding entry point

use super::bound::BoundConfig;
use super::engine;
use crate::domain::{ConfigurationError, Result};
use crate::parser::ValueParsers;
use crate::schema::Schema;
use crate::store::{open_store, Store};
use std::any::Any;
use std::fmt;

/// Binds one schema, optionally with extra value parsers
///
/// Extra parsers are layered over the built-in registry for each bind and never
/// leak into other binders.
///
/// # Examples
///
/// ```
/// use confbind::binding::Binder;
/// use confbind::schema::{Schema, ValueType};
/// use confbind::store::PropertiesStore;
///
/// let schema = Schema::builder()
///     .scalar("ratio", ValueType::named("percent"))
///     .build()
///     .unwrap();
/// let store = PropertiesStore::from_pairs([("ratio", "75%")]);
///
/// let config = Binder::new(&schema)
///     .with_value_parser("percent", |raw: &str| {
///         raw.trim_end_matches('%')
///             .parse::<u8>()
///             .map_err(|e| e.to_string())
///     })
///     .bind(&store)
///     .unwrap();
/// assert_eq!(*config.value::<u8>("ratio").unwrap(), 75);
/// ```
pub struct Binder<'a> {
    schema: &'a Schema,
    parsers: ValueParsers,
}

impl<'a> Binder<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self {
            schema,
            parsers: ValueParsers::empty(),
        }
    }

    /// Adds a parser for `type_id`, overriding a built-in or enum lookup of the same name
    pub fn with_value_parser<T, F>(mut self, type_id: impl Into<String>, parser: F) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
        F: Fn(&str) -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        self.parsers.register(type_id, parser);
        self
    }

    /// Adds every parser of `parsers`
    pub fn with_parsers(mut self, parsers: &ValueParsers) -> Self {
        self.parsers = parsers.merged_over(&self.parsers);
        self
    }

    /// Binds the schema against `store`
    pub fn bind<S: Store + ?Sized>(&self, store: &S) -> Result<BoundConfig> {
        let parsers = self.parsers.merged_over(ValueParsers::builtin());
        engine::bind(self.schema, store, &parsers)
    }

    /// Opens `path` with the backend matching its extension and binds against it
    pub fn bind_file(&self, path: impl AsRef<std::path::Path>) -> Result<BoundConfig> {
        let path = path.as_ref();
        let store = open_store(path).map_err(|source| ConfigurationError::Store { path: None, source })?;
        tracing::debug!(path = %path.display(), "Binding against store file");
        self.bind(&*store)
    }
}

/// Binds `schema` against the store file at `path` with the built-in parsers
pub fn bind_file(schema: &Schema, path: impl AsRef<std::path::Path>) -> Result<BoundConfig> {
    Binder::new(schema).bind_file(path)
}
