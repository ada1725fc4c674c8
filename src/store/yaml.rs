//! YAML documents

use super::document::{DocumentNode, DocumentStore, Member};
use serde_yaml::Value;

/// A store over a YAML document
pub type YamlStore = DocumentStore<Value>;

impl DocumentNode for Value {
    const FORMAT: &'static str = "YAML";

    fn parse_document(source: &str) -> Result<Self, String> {
        serde_yaml::from_str(source).map_err(|e| e.to_string())
    }

    fn is_null(&self) -> bool {
        match self {
            Value::Tagged(tagged) => DocumentNode::is_null(&tagged.value),
            other => other.is_null(),
        }
    }

    fn member(&self, name: &str) -> Member<'_, Self> {
        match self {
            Value::Mapping(mapping) => mapping.get(name).map_or(Member::Absent, Member::Found),
            Value::Tagged(tagged) => tagged.value.member(name),
            _ => Member::NotAnObject,
        }
    }

    fn element(&self, index: usize) -> Option<&Self> {
        match self {
            Value::Sequence(items) => items.get(index),
            Value::Tagged(tagged) => tagged.value.element(index),
            _ => None,
        }
    }

    fn scalar(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => tagged.value.scalar(),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }
}
