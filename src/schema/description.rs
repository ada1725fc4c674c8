//! Schema description file types
//!
//! A schema description is a TOML document declaring options and enumerations.
//! It is deserialized with serde, validated, and converted into a [`Schema`].

use super::node::{EnumType, ItemKind, OptionKind, Schema, SchemaNode, ValueType};
use crate::domain::{ConfigurationError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a schema description file
///
/// ```toml
/// [enums]
/// Level = ["LOW", "HIGH"]
///
/// [[option]]
/// name = "port"
/// type = "u16"
/// default = "8080"
///
/// [[option]]
/// name = "servers"
/// list = true
///
///   [[option.option]]
///   name = "host"
///   type = "string"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDescription {
    /// Enumerations referenced by option types, keyed by name
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,

    /// Top-level options
    #[serde(default, rename = "option")]
    pub options: Vec<OptionDescription>,
}

/// One option of a schema description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionDescription {
    /// Option name
    pub name: String,

    /// Value type identifier, or the name of a declared enum
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Whether the option may be absent
    #[serde(default)]
    pub optional: bool,

    /// Whether the option is repeated
    #[serde(default)]
    pub list: bool,

    /// Default value used when the option is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Nested options; a non-empty list makes this a nested option
    #[serde(default, rename = "option", skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionDescription>,
}

impl SchemaDescription {
    /// Validates the description
    ///
    /// # Errors
    ///
    /// Returns an error if any option combines incompatible settings or an enum
    /// declares no variants
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, variants) in &self.enums {
            if variants.is_empty() {
                return Err(format!("enum '{name}' declares no variants"));
            }
        }
        for option in &self.options {
            option.validate("")?;
        }
        Ok(())
    }

    /// Converts the validated description into a [`Schema`]
    pub fn into_schema(self) -> Result<Schema> {
        self.validate().map_err(ConfigurationError::Schema)?;
        let enums = self.enums;
        build_schema(&self.options, &enums)
    }
}

impl OptionDescription {
    fn validate(&self, prefix: &str) -> std::result::Result<(), String> {
        let qualified = if prefix.is_empty() {
            self.name.clone()
        } else {
            format!("{prefix}.{}", self.name)
        };

        if self.name.trim().is_empty() {
            return Err(format!("option without a name below '{prefix}'"));
        }

        if self.options.is_empty() {
            if self.value_type.is_none() {
                return Err(format!(
                    "option '{qualified}' needs a type or nested options"
                ));
            }
        } else {
            if self.value_type.is_some() {
                return Err(format!(
                    "option '{qualified}' declares both a type and nested options"
                ));
            }
            if self.optional {
                return Err(format!(
                    "nested option '{qualified}' can not be optional"
                ));
            }
            for child in &self.options {
                child.validate(&qualified)?;
            }
        }

        if self.list && self.optional {
            return Err(format!(
                "list option '{qualified}' can not also be optional"
            ));
        }
        if self.default.is_some() && (self.list || self.optional || !self.options.is_empty()) {
            return Err(format!(
                "option '{qualified}' can only declare a default if it is a required scalar"
            ));
        }
        Ok(())
    }

    fn value_type(&self, enums: &BTreeMap<String, Vec<String>>) -> ValueType {
        let type_id = self.value_type.clone().unwrap_or_default();
        match enums.get(&type_id) {
            Some(variants) => ValueType::Enum(EnumType::new(type_id, variants.iter().cloned())),
            None => ValueType::Named(type_id),
        }
    }

    fn to_node(&self, enums: &BTreeMap<String, Vec<String>>) -> Result<SchemaNode> {
        let kind = if !self.options.is_empty() {
            let nested = build_schema(&self.options, enums)?;
            if self.list {
                OptionKind::List(ItemKind::Nested(nested))
            } else {
                OptionKind::Nested(nested)
            }
        } else if self.list {
            OptionKind::List(ItemKind::Scalar(self.value_type(enums)))
        } else if self.optional {
            OptionKind::Optional(self.value_type(enums))
        } else {
            OptionKind::Scalar(self.value_type(enums))
        };

        let mut node = SchemaNode::new(self.name.clone(), kind);
        if let Some(default) = &self.default {
            node = node.with_default(default.clone());
        }
        if let Some(description) = &self.description {
            node = node.with_description(description.clone());
        }
        Ok(node)
    }
}

fn build_schema(
    options: &[OptionDescription],
    enums: &BTreeMap<String, Vec<String>>,
) -> Result<Schema> {
    options
        .iter()
        .try_fold(Schema::builder(), |builder, option| {
            Ok::<_, ConfigurationError>(builder.node(option.to_node(enums)?))
        })?
        .build()
}
