//! Binding engine
//!
//! Walks a [`Schema`] and resolves every option against a [`Store`]:
//!
//! - **Nested** options bind their sub-schema with the option's path as context
//! - **Scalar** options are parsed from the store, fall back to their default, or
//!   fail as missing
//! - **Optional** options are empty when absent
//! - **List** options are scanned from index 0 until the first item that does not
//!   resolve; the list is exactly the prefix before that gap
//!
//! Every error is qualified with the path of the option that failed.

use super::bound::BoundConfig;
use super::value::{Scalar, Value};
use crate::domain::{ConfigurationError, Path, Result};
use crate::parser::ValueParsers;
use crate::schema::{ItemKind, OptionKind, Schema, SchemaNode, ValueType};
use crate::store::Store;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Binds `schema` against `store`, parsing values with `parsers`
///
/// Every value type the schema references must resolve in `parsers` before any
/// store lookup happens.
///
/// # Errors
///
/// Returns the first [`ConfigurationError`] encountered:
/// - `TypeParse` when a type has no parser or a value does not parse
/// - `MissingValue` when a required option without default is absent
/// - `NotAnObject` / `Store` when the store reports a structural failure
pub fn bind<S>(schema: &Schema, store: &S, parsers: &ValueParsers) -> Result<BoundConfig>
where
    S: Store + ?Sized,
{
    let span = tracing::debug_span!("bind", options = schema.len());
    let _guard = span.enter();

    parsers.check(schema)?;

    let engine = BindingEngine {
        store,
        parsers,
        lookups: Cell::new(0),
        hits: Cell::new(0),
    };
    let config = engine.bind_level(schema, None)?;

    tracing::debug!(
        lookups = engine.lookups.get(),
        hits = engine.hits.get(),
        "Configuration bound"
    );
    Ok(config)
}

struct BindingEngine<'a, S: ?Sized> {
    store: &'a S,
    parsers: &'a ValueParsers,
    lookups: Cell<usize>,
    hits: Cell<usize>,
}

impl<S: Store + ?Sized> BindingEngine<'_, S> {
    fn bind_level(&self, schema: &Schema, context: Option<&Path>) -> Result<BoundConfig> {
        let mut entries = BTreeMap::new();
        for node in schema.nodes() {
            let value = self.bind_node(node, context)?;
            entries.insert(node.name().to_string(), value);
        }
        Ok(BoundConfig::new(
            context.cloned(),
            entries,
            Arc::clone(schema.derived_options()),
        ))
    }

    fn bind_node(&self, node: &SchemaNode, context: Option<&Path>) -> Result<Value> {
        match node.kind() {
            OptionKind::Scalar(value_type) => {
                let path = Path::under(context, node.name());
                match self.lookup(&path)? {
                    Some(raw) => self.parse(value_type, &raw, &path).map(Value::Scalar),
                    None => match node.default_value() {
                        Some(default) => {
                            tracing::debug!(path = %path, default, "Using default value");
                            self.parse(value_type, default, &path).map(Value::Scalar)
                        }
                        None => Err(ConfigurationError::missing_value(&path)),
                    },
                }
            }
            OptionKind::Optional(value_type) => {
                let path = Path::under(context, node.name());
                let scalar = match self.lookup(&path)? {
                    Some(raw) => Some(self.parse(value_type, &raw, &path)?),
                    None => None,
                };
                Ok(Value::Optional(scalar))
            }
            OptionKind::Nested(nested) => {
                let path = Path::under(context, node.name());
                self.bind_level(nested, Some(&path)).map(Value::Nested)
            }
            OptionKind::List(item) => self.bind_list(node.name(), item, context).map(Value::List),
        }
    }

    fn bind_list(&self, name: &str, item: &ItemKind, context: Option<&Path>) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        for position in 0.. {
            let path = Path::indexed_under(context, name, position);
            let value = match item {
                ItemKind::Scalar(value_type) => match self.lookup(&path)? {
                    Some(raw) => Value::Scalar(self.parse(value_type, &raw, &path)?),
                    None => break,
                },
                ItemKind::Nested(nested) => match self.bind_item(nested, &path)? {
                    Some(config) => Value::Nested(config),
                    None => break,
                },
            };
            items.push(value);
        }

        tracing::debug!(
            option = %Path::under(context, name),
            length = items.len(),
            "List scan complete"
        );
        Ok(items)
    }

    /// Binds one nested list item; `None` ends the scan
    fn bind_item(&self, schema: &Schema, path: &Path) -> Result<Option<BoundConfig>> {
        let hits_before = self.hits.get();
        match self.bind_level(schema, Some(path)) {
            Ok(config) if self.hits.get() > hits_before => Ok(Some(config)),
            Ok(_) => {
                tracing::trace!(path = %path, "List item has no stored values");
                Ok(None)
            }
            Err(error @ (ConfigurationError::NotAnObject { .. } | ConfigurationError::Store { .. })) => {
                Err(error)
            }
            Err(error) => {
                tracing::trace!(path = %path, reason = %error, "List item did not bind");
                Ok(None)
            }
        }
    }

    fn lookup(&self, path: &Path) -> Result<Option<String>> {
        self.lookups.set(self.lookups.get() + 1);
        let value = self
            .store
            .get(path)
            .map_err(|e| ConfigurationError::from_store(e, path))?;
        if value.is_some() {
            self.hits.set(self.hits.get() + 1);
        }
        tracing::trace!(path = %path, found = value.is_some(), "Store lookup");
        Ok(value)
    }

    fn parse(&self, value_type: &ValueType, raw: &str, path: &Path) -> Result<Scalar> {
        let resolved = self.parsers.resolve(value_type).ok_or_else(|| {
            ConfigurationError::type_parse(
                format!("No value parser registered for type {value_type}"),
                Some(path),
            )
        })?;
        resolved.parse(raw).map_err(|reason| {
            ConfigurationError::type_parse(
                format!("Can not parse '{raw}' as {value_type}: {reason}"),
                Some(path),
            )
        })
    }
}
