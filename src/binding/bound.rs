//! Bound configuration
//!
//! A [`BoundConfig`] is the immutable result of binding one schema level against a
//! store: declared option names mapped to [`Value`]s, plus the derived options of
//! that schema level evaluated on demand.

use super::value::{Scalar, Value};
use crate::domain::{ConfigurationError, Path, Result};
use crate::schema::DerivedOptions;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Read-only view of a bound configuration
///
/// Cloning is cheap; clones share the same entries.
///
/// # Examples
///
/// ```
/// use confbind::binding::Binder;
/// use confbind::schema::{Schema, ValueType};
/// use confbind::store::PropertiesStore;
///
/// let schema = Schema::builder()
///     .scalar("name", ValueType::named("string"))
///     .with_default("port", ValueType::named("u16"), "8080")
///     .build()
///     .unwrap();
/// let store = PropertiesStore::from_pairs([("name", "demo")]);
///
/// let config = Binder::new(&schema).bind(&store).unwrap();
/// assert_eq!(config.value::<String>("name").unwrap(), "demo");
/// assert_eq!(*config.value::<u16>("port").unwrap(), 8080);
/// ```
#[derive(Clone)]
pub struct BoundConfig {
    inner: Arc<BoundInner>,
}

struct BoundInner {
    path: Option<Path>,
    entries: BTreeMap<String, Value>,
    derived: DerivedOptions,
}

impl BoundConfig {
    pub(crate) fn new(
        path: Option<Path>,
        entries: BTreeMap<String, Value>,
        derived: DerivedOptions,
    ) -> Self {
        Self {
            inner: Arc::new(BoundInner {
                path,
                entries,
                derived,
            }),
        }
    }

    /// Where this configuration was bound; `None` for the top level
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.inner.entries.get(name)
    }

    /// Reads a scalar, or a populated optional, as `T`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Access`] if the option does not exist, is
    /// not a scalar, is an unset optional, or holds another type.
    pub fn value<T: Any>(&self, name: &str) -> Result<&T> {
        let scalar = match self.entry(name)? {
            Value::Scalar(scalar) | Value::Optional(Some(scalar)) => scalar,
            Value::Optional(None) => {
                return Err(self.access_error(format!("Option {name} has no value")))
            }
            other => return Err(self.wrong_kind(name, "a scalar", other)),
        };
        self.downcast(name, scalar)
    }

    /// Reads an optional option as `T`
    pub fn optional<T: Any>(&self, name: &str) -> Result<Option<&T>> {
        match self.entry(name)? {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(scalar)) | Value::Scalar(scalar) => {
                self.downcast(name, scalar).map(Some)
            }
            other => Err(self.wrong_kind(name, "an optional", other)),
        }
    }

    pub fn nested(&self, name: &str) -> Result<&BoundConfig> {
        match self.entry(name)? {
            Value::Nested(config) => Ok(config),
            other => Err(self.wrong_kind(name, "a nested configuration", other)),
        }
    }

    pub fn list(&self, name: &str) -> Result<&[Value]> {
        match self.entry(name)? {
            Value::List(items) => Ok(items),
            other => Err(self.wrong_kind(name, "a list", other)),
        }
    }

    /// Names of the bound options, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    /// Evaluates a derived option against this configuration
    ///
    /// Derived options are recomputed on every call.
    pub fn derive(&self, name: &str) -> Result<Value> {
        match self.inner.derived.get(name) {
            Some(option) => option.evaluate(self),
            None => Err(self.access_error(format!("No derived option named {name}"))),
        }
    }

    /// Evaluates a scalar derived option as `T`
    pub fn derived<T: Any + Clone>(&self, name: &str) -> Result<T> {
        let value = self.derive(name)?;
        match value.downcast::<T>() {
            Some(typed) => Ok(typed.clone()),
            None => Err(self.access_error(format!(
                "Derived option {name} is not a {}",
                std::any::type_name::<T>()
            ))),
        }
    }

    pub fn has_derived(&self, name: &str) -> bool {
        self.inner.derived.contains_key(name)
    }

    pub fn derived_names(&self) -> impl Iterator<Item = &str> {
        self.inner.derived.keys().map(String::as_str)
    }

    fn entry(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| self.access_error(format!("No option named {name}")))
    }

    fn downcast<'a, T: Any>(&self, name: &str, scalar: &'a Scalar) -> Result<&'a T> {
        scalar.downcast_ref::<T>().ok_or_else(|| {
            self.access_error(format!(
                "Option {name} holds a {}, not a {}",
                scalar.type_name(),
                std::any::type_name::<T>()
            ))
        })
    }

    fn wrong_kind(&self, name: &str, expected: &str, found: &Value) -> ConfigurationError {
        self.access_error(format!(
            "Option {name} is not {expected} but {}",
            found.kind_name()
        ))
    }

    fn access_error(&self, message: String) -> ConfigurationError {
        match self.path() {
            Some(path) => ConfigurationError::Access(format!("{message} in {path}")),
            None => ConfigurationError::Access(message),
        }
    }

    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for (name, value) in &self.inner.entries {
            write_value(f, indent, name, value)?;
        }
        Ok(())
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, indent: usize, label: &str, value: &Value) -> fmt::Result {
    let pad = "  ".repeat(indent);
    match value {
        Value::Scalar(scalar) | Value::Optional(Some(scalar)) => {
            writeln!(f, "{pad}{label} = {scalar:?}")
        }
        Value::Optional(None) => writeln!(f, "{pad}{label} = <unset>"),
        Value::Nested(config) => {
            writeln!(f, "{pad}{label}:")?;
            config.write_tree(f, indent + 1)
        }
        Value::List(items) if items.is_empty() => writeln!(f, "{pad}{label} = []"),
        Value::List(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| write_value(f, indent, &format!("{label}[{index}]"), item)),
    }
}

impl fmt::Display for BoundConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, 0)
    }
}

impl fmt::Debug for BoundConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundConfig")
            .field("path", &self.inner.path)
            .field("entries", &self.inner.entries)
            .field("derived", &self.inner.derived.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoundConfig {
        let nested = BoundConfig::new(
            Some(Path::root("server")),
            BTreeMap::from([("port".to_string(), Value::Scalar(Scalar::new(8080_u16)))]),
            DerivedOptions::default(),
        );
        BoundConfig::new(
            None,
            BTreeMap::from([
                ("name".to_string(), Value::Scalar(Scalar::new("demo".to_string()))),
                ("banner".to_string(), Value::Optional(None)),
                ("server".to_string(), Value::Nested(nested)),
                (
                    "tags".to_string(),
                    Value::List(vec![
                        Value::Scalar(Scalar::new("a".to_string())),
                        Value::Scalar(Scalar::new("b".to_string())),
                    ]),
                ),
            ]),
            DerivedOptions::default(),
        )
    }

    #[test]
    fn test_typed_accessors() {
        let config = sample();
        assert_eq!(config.value::<String>("name").unwrap(), "demo");
        assert_eq!(config.optional::<String>("banner").unwrap(), None);
        assert_eq!(*config.nested("server").unwrap().value::<u16>("port").unwrap(), 8080);
        assert_eq!(config.list("tags").unwrap().len(), 2);
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["banner", "name", "server", "tags"]);
        assert_eq!(config.len(), 4);
    }

    #[test]
    fn test_access_errors() {
        let config = sample();
        assert!(matches!(config.value::<String>("nope"), Err(ConfigurationError::Access(_))));
        assert!(matches!(config.value::<i32>("name"), Err(ConfigurationError::Access(_))));
        assert!(matches!(config.value::<String>("banner"), Err(ConfigurationError::Access(_))));
        assert!(matches!(config.list("name"), Err(ConfigurationError::Access(_))));

        let err = config.nested("server").unwrap().value::<u16>("host").unwrap_err();
        assert_eq!(err.to_string(), "No option named host in server");
    }

    #[test]
    fn test_unknown_derived_option() {
        let config = sample();
        assert!(!config.has_derived("total"));
        assert!(matches!(config.derive("total"), Err(ConfigurationError::Access(_))));
    }

    #[test]
    fn test_display_renders_tree() {
        let rendered = sample().to_string();
        assert_eq!(
            rendered,
            "banner = <unset>\nname = \"demo\"\nserver:\n  port = 8080\ntags[0] = \"a\"\ntags[1] = \"b\"\n"
        );
    }

    #[test]
    fn test_bound_config_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BoundConfig>();
    }
}
