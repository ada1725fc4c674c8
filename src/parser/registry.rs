//! Value parser registry
//!
//! Maps type identifiers to functions turning a raw store string into a typed
//! [`Scalar`]. The built-in table is built once per process and never mutated;
//! callers layer their own parsers over it for a single bind.

use super::builtin;
use crate::binding::Scalar;
use crate::domain::{ConfigurationError, Path, Result};
use crate::schema::{EnumType, ItemKind, OptionKind, Schema, ValueType};
use once_cell::sync::Lazy;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A raw parser: the error string becomes the message of a type-parse error
pub type ParseFn = dyn Fn(&str) -> std::result::Result<Scalar, String> + Send + Sync;

static BUILTIN: Lazy<ValueParsers> = Lazy::new(|| {
    let mut parsers = ValueParsers::empty();
    builtin::register_all(&mut parsers);
    tracing::trace!(count = parsers.len(), "Built-in value parsers registered");
    parsers
});

/// The variant of an enumeration option parsed by name lookup
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumVariant {
    pub enum_name: String,
    pub name: String,
    pub ordinal: usize,
}

impl fmt::Display for EnumVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// How a [`ValueType`] is turned into a value
pub enum Resolved<'a> {
    /// A registered parser
    Parser(&'a ParseFn),
    /// Exact variant-name lookup on an enumeration
    EnumLookup(&'a EnumType),
}

impl Resolved<'_> {
    /// Parses `raw`, describing the failure as a message
    pub fn parse(&self, raw: &str) -> std::result::Result<Scalar, String> {
        match self {
            Self::Parser(parse) => parse(raw),
            Self::EnumLookup(enum_type) => enum_type
                .ordinal_of(raw)
                .map(|ordinal| {
                    Scalar::new(EnumVariant {
                        enum_name: enum_type.name.clone(),
                        name: raw.to_string(),
                        ordinal,
                    })
                })
                .ok_or_else(|| format!("expected one of {}", enum_type.variants.join(", "))),
        }
    }
}

/// A table of value parsers keyed by type identifier
#[derive(Clone, Default)]
pub struct ValueParsers {
    parsers: HashMap<String, Arc<ParseFn>>,
}

impl ValueParsers {
    /// A registry without any parsers
    pub fn empty() -> Self {
        Self::default()
    }

    /// The shared built-in registry
    pub fn builtin() -> &'static ValueParsers {
        &BUILTIN
    }

    /// Registers a typed parser under `type_id`, replacing any previous one
    ///
    /// # Examples
    ///
    /// ```
    /// use confbind::parser::ValueParsers;
    ///
    /// let mut parsers = ValueParsers::empty();
    /// parsers.register("percent", |raw: &str| {
    ///     raw.trim_end_matches('%')
    ///         .parse::<u8>()
    ///         .map_err(|e| e.to_string())
    /// });
    /// assert!(parsers.contains("percent"));
    /// ```
    pub fn register<T, F>(&mut self, type_id: impl Into<String>, parser: F) -> &mut Self
    where
        T: Any + fmt::Debug + Send + Sync,
        F: Fn(&str) -> std::result::Result<T, String> + Send + Sync + 'static,
    {
        self.register_scalar(type_id, move |raw: &str| parser(raw).map(Scalar::new))
    }

    /// Registers a parser producing a [`Scalar`] directly
    pub fn register_scalar<F>(&mut self, type_id: impl Into<String>, parser: F) -> &mut Self
    where
        F: Fn(&str) -> std::result::Result<Scalar, String> + Send + Sync + 'static,
    {
        self.parsers.insert(type_id.into(), Arc::new(parser));
        self
    }

    pub fn contains(&self, type_id: &str) -> bool {
        self.parsers.contains_key(type_id)
    }

    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }

    /// Registered type identifiers, sorted
    pub fn type_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.parsers.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns `base` with every parser of `self` layered over it
    pub fn merged_over(&self, base: &ValueParsers) -> ValueParsers {
        let mut merged = base.clone();
        merged
            .parsers
            .extend(self.parsers.iter().map(|(id, parser)| (id.clone(), Arc::clone(parser))));
        merged
    }

    /// Finds how values of `value_type` are parsed
    ///
    /// A caller parser registered under an enumeration's name takes precedence
    /// over variant-name lookup. Built-in parsers never do, so an enumeration
    /// named like a built-in type (`date`, `duration`) still parses by variant.
    pub fn resolve<'a>(&'a self, value_type: &'a ValueType) -> Option<Resolved<'a>> {
        let registered = self.parsers.get(value_type.type_id());
        match value_type {
            ValueType::Named(_) => registered.map(|parser| Resolved::Parser(parser.as_ref())),
            ValueType::Enum(enum_type) => match registered {
                Some(parser) if !is_builtin(enum_type.name.as_str(), parser) => {
                    Some(Resolved::Parser(parser.as_ref()))
                }
                _ => Some(Resolved::EnumLookup(enum_type)),
            },
        }
    }

    /// Verifies that every value type referenced by `schema` resolves
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::TypeParse`] qualified by the first option
    /// whose type has no parser.
    pub fn check(&self, schema: &Schema) -> Result<()> {
        self.check_level(schema, None)
    }

    fn check_level(&self, schema: &Schema, context: Option<&Path>) -> Result<()> {
        for node in schema.nodes() {
            let path = Path::under(context, node.name());
            match node.kind() {
                OptionKind::Scalar(value_type)
                | OptionKind::Optional(value_type)
                | OptionKind::List(ItemKind::Scalar(value_type)) => {
                    self.check_type(value_type, &path)?
                }
                OptionKind::Nested(nested) | OptionKind::List(ItemKind::Nested(nested)) => {
                    self.check_level(nested, Some(&path))?
                }
            }
        }
        Ok(())
    }

    fn check_type(&self, value_type: &ValueType, path: &Path) -> Result<()> {
        if self.resolve(value_type).is_some() {
            return Ok(());
        }
        Err(ConfigurationError::type_parse(
            format!("No value parser registered for type {value_type}"),
            Some(path),
        ))
    }
}

fn is_builtin(type_id: &str, parser: &Arc<ParseFn>) -> bool {
    BUILTIN
        .parsers
        .get(type_id)
        .is_some_and(|builtin| Arc::ptr_eq(builtin, parser))
}

impl fmt::Debug for ValueParsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueParsers")
            .field("type_ids", &self.type_ids())
            .finish()
    }
}
