//! JSON documents

use super::document::{DocumentNode, DocumentStore, Member};
use serde_json::Value;

/// A store over a JSON document
pub type JsonStore = DocumentStore<Value>;

impl DocumentNode for Value {
    const FORMAT: &'static str = "JSON";

    fn parse_document(source: &str) -> Result<Self, String> {
        serde_json::from_str(source).map_err(|e| e.to_string())
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }

    fn member(&self, name: &str) -> Member<'_, Self> {
        match self {
            Value::Object(map) => map.get(name).map_or(Member::Absent, Member::Found),
            _ => Member::NotAnObject,
        }
    }

    fn element(&self, index: usize) -> Option<&Self> {
        self.as_array().and_then(|items| items.get(index))
    }

    fn scalar(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }
}
