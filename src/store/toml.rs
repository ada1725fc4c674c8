//! TOML documents
//!
//! TOML has no null; absent keys are the only way to leave an option unset.
//! Datetimes render in their TOML form.

use super::document::{DocumentNode, DocumentStore, Member};
use ::toml::Value;

/// A store over a TOML document
pub type TomlStore = DocumentStore<Value>;

impl DocumentNode for Value {
    const FORMAT: &'static str = "TOML";

    fn parse_document(source: &str) -> Result<Self, String> {
        ::toml::from_str::<::toml::Table>(source)
            .map(Value::Table)
            .map_err(|e| e.to_string())
    }

    fn is_null(&self) -> bool {
        false
    }

    fn member(&self, name: &str) -> Member<'_, Self> {
        match self {
            Value::Table(table) => table.get(name).map_or(Member::Absent, Member::Found),
            _ => Member::NotAnObject,
        }
    }

    fn element(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|items| items.get(index))
    }

    fn scalar(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            Value::Datetime(dt) => Some(dt.to_string()),
            Value::Array(_) | Value::Table(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Path, StoreError};
    use crate::store::Store;

    const SOURCE: &str = r#"
name = "demo"
port = 8080
started = 2007-12-03T10:15:30Z
tags = ["x", "y"]

[[servers]]
host = "a"

[[servers]]
host = "b"
port = 81
"#;

    #[test]
    fn test_lookup() {
        let store = TomlStore::parse(SOURCE).unwrap();
        let get = |path: Path| store.get(&path).unwrap();
        assert_eq!(get(Path::root("name")).as_deref(), Some("demo"));
        assert_eq!(get(Path::root("port")).as_deref(), Some("8080"));
        assert_eq!(get(Path::root("started")).as_deref(), Some("2007-12-03T10:15:30Z"));
        assert_eq!(get(Path::indexed_root("tags", 1)).as_deref(), Some("y"));
        assert_eq!(
            get(Path::indexed_root("servers", 1).child("port")).as_deref(),
            Some("81")
        );
        assert_eq!(get(Path::root("servers")), None);
    }

    #[test]
    fn test_leaf_parent_is_not_an_object() {
        let store = TomlStore::parse(SOURCE).unwrap();
        let err = store.get(&Path::root("name").child("x")).unwrap_err();
        assert_eq!(err.to_string(), "name is not an object");
        assert!(matches!(err, StoreError::NotAnObject(_)));
    }

    #[test]
    fn test_malformed_source() {
        let err = TomlStore::parse("name = ").unwrap_err();
        assert!(matches!(err, StoreError::Malformed { format: "TOML", .. }));
    }
}
