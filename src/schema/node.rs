//! Schema model
//!
//! A [`Schema`] is the normalized description of a configuration: a set of
//! uniquely-named [`SchemaNode`]s plus any derived options computed from them.

use crate::binding::{BoundConfig, Scalar, Value};
use crate::domain::{ConfigurationError, Result};
use std::any::Any;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// The declared type of a scalar option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    /// A type resolved by name through the value parser registry
    Named(String),
    /// An enumeration, parsed by variant name unless a parser is registered
    /// under the enum's name
    Enum(EnumType),
}

impl ValueType {
    /// A registry-resolved type, e.g. `ValueType::named("i32")`
    pub fn named(type_id: impl Into<String>) -> Self {
        Self::Named(type_id.into())
    }

    /// An enumeration with the given variant names
    pub fn enumeration<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum(EnumType::new(name, variants))
    }

    /// The identifier the registry is consulted with
    pub fn type_id(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Enum(enum_type) => &enum_type.name,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Enum(enum_type) => write!(f, "enum {}", enum_type.name),
        }
    }
}

/// An enumeration type: a name and its variant names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub variants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(name: impl Into<String>, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    /// Looks a variant up by its exact name, returning its ordinal
    pub fn ordinal_of(&self, variant: &str) -> Option<usize> {
        self.variants.iter().position(|v| v == variant)
    }
}

/// The shape of an option
#[derive(Debug, Clone)]
pub enum OptionKind {
    /// A required single value
    Scalar(ValueType),
    /// A value that may be absent
    Optional(ValueType),
    /// A nested group of options
    Nested(Schema),
    /// A repeated option; items are scanned from index 0 until the first gap
    List(ItemKind),
}

/// The shape of each item of a repeated option
#[derive(Debug, Clone)]
pub enum ItemKind {
    Scalar(ValueType),
    Nested(Schema),
}

/// One declared option
#[derive(Debug, Clone)]
pub struct SchemaNode {
    name: String,
    kind: OptionKind,
    default_value: Option<String>,
    description: Option<String>,
}

impl SchemaNode {
    /// Creates a node without default or description
    pub fn new(name: impl Into<String>, kind: OptionKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_value: None,
            description: None,
        }
    }

    /// Sets the default used when the store holds no value
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Sets a human-readable description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &OptionKind {
        &self.kind
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Whether binding fails when the store has no value for this option
    ///
    /// Only plain scalars without a default are required. Nested options defer
    /// to their children, lists may be empty.
    pub fn is_required(&self) -> bool {
        matches!(self.kind, OptionKind::Scalar(_)) && self.default_value.is_none()
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigurationError::Schema(
                "option names must not be empty".to_string(),
            ));
        }
        if self.default_value.is_some() && !matches!(self.kind, OptionKind::Scalar(_)) {
            return Err(ConfigurationError::Schema(format!(
                "option '{}' declares a default but only scalar options may have one",
                self.name
            )));
        }
        Ok(())
    }
}

/// Signature of a derived option: computed from the bound configuration it belongs to
pub type DeriveFn = dyn Fn(&BoundConfig) -> Result<Value> + Send + Sync;

/// A named derived option
#[derive(Clone)]
pub struct DerivedOption {
    name: String,
    derive: Arc<DeriveFn>,
}

impl DerivedOption {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the derivation against `config`
    pub fn evaluate(&self, config: &BoundConfig) -> Result<Value> {
        (self.derive)(config)
    }
}

impl fmt::Debug for DerivedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedOption")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Derived options of one schema level, shared with every configuration bound from it
pub type DerivedOptions = Arc<BTreeMap<String, DerivedOption>>;

/// A declared configuration shape
///
/// # Examples
///
/// ```
/// use confbind::schema::{Schema, ValueType};
///
/// let server = Schema::builder()
///     .scalar("host", ValueType::named("string"))
///     .with_default("port", ValueType::named("u16"), "8080")
///     .build()
///     .unwrap();
///
/// let schema = Schema::builder()
///     .nested("server", server)
///     .optional("banner", ValueType::named("string"))
///     .build()
///     .unwrap();
/// assert_eq!(schema.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    nodes: Vec<SchemaNode>,
    derived: DerivedOptions,
}

impl Schema {
    /// Returns a builder for constructing a Schema
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// The declared options, in declaration order
    pub fn nodes(&self) -> &[SchemaNode] {
        &self.nodes
    }

    /// Looks a declared option up by name
    pub fn node(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn derived_options(&self) -> &DerivedOptions {
        &self.derived
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builder for [`Schema`]
///
/// Validation happens in [`SchemaBuilder::build`]: option names must be non-empty
/// and unique, defaults are only allowed on scalars, and derived options must
/// not shadow declared ones.
#[derive(Default)]
pub struct SchemaBuilder {
    nodes: Vec<SchemaNode>,
    derived: BTreeMap<String, DerivedOption>,
    errors: Vec<String>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a prepared node
    pub fn node(mut self, node: SchemaNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Adds a required scalar option
    pub fn scalar(self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.node(SchemaNode::new(name, OptionKind::Scalar(value_type)))
    }

    /// Adds an optional scalar option
    pub fn optional(self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.node(SchemaNode::new(name, OptionKind::Optional(value_type)))
    }

    /// Adds a scalar option falling back to `default_value` when absent
    pub fn with_default(
        self,
        name: impl Into<String>,
        value_type: ValueType,
        default_value: impl Into<String>,
    ) -> Self {
        self.node(SchemaNode::new(name, OptionKind::Scalar(value_type)).with_default(default_value))
    }

    /// Adds a nested group of options
    pub fn nested(self, name: impl Into<String>, schema: Schema) -> Self {
        self.node(SchemaNode::new(name, OptionKind::Nested(schema)))
    }

    /// Adds a repeated option
    pub fn list(self, name: impl Into<String>, item: ItemKind) -> Self {
        self.node(SchemaNode::new(name, OptionKind::List(item)))
    }

    /// Attaches a description to the most recently added option
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        match self.nodes.pop() {
            Some(node) => self.nodes.push(node.with_description(description)),
            None => self
                .errors
                .push("describe() called before any option was added".to_string()),
        }
        self
    }

    /// Adds a derived option computed from the bound configuration on every read
    pub fn derive<T, F>(mut self, name: impl Into<String>, derive: F) -> Self
    where
        T: Any + fmt::Debug + Send + Sync,
        F: Fn(&BoundConfig) -> Result<T> + Send + Sync + 'static,
    {
        let name = name.into();
        let option = DerivedOption {
            name: name.clone(),
            derive: Arc::new(move |config: &BoundConfig| {
                derive(config).map(|value| Value::Scalar(Scalar::new(value)))
            }),
        };
        if self.derived.insert(name.clone(), option).is_some() {
            self.errors
                .push(format!("derived option '{name}' is declared more than once"));
        }
        self
    }

    /// Adds a derived option producing any kind of [`Value`]
    pub fn derive_value<F>(mut self, name: impl Into<String>, derive: F) -> Self
    where
        F: Fn(&BoundConfig) -> Result<Value> + Send + Sync + 'static,
    {
        let name = name.into();
        let option = DerivedOption {
            name: name.clone(),
            derive: Arc::new(derive),
        };
        if self.derived.insert(name.clone(), option).is_some() {
            self.errors
                .push(format!("derived option '{name}' is declared more than once"));
        }
        self
    }

    /// Validates and builds the schema
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::Schema`] for empty or duplicate names,
    /// misplaced defaults, or derived options shadowing declared options.
    pub fn build(self) -> Result<Schema> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(ConfigurationError::Schema(error));
        }

        let mut seen = HashSet::new();
        for node in &self.nodes {
            node.validate()?;
            if !seen.insert(node.name.as_str()) {
                return Err(ConfigurationError::Schema(format!(
                    "option '{}' is declared more than once",
                    node.name
                )));
            }
        }

        for name in self.derived.keys() {
            if name.trim().is_empty() {
                return Err(ConfigurationError::Schema(
                    "derived option names must not be empty".to_string(),
                ));
            }
            if seen.contains(name.as_str()) {
                return Err(ConfigurationError::Schema(format!(
                    "derived option '{name}' shadows a declared option"
                )));
            }
        }

        Ok(Schema {
            nodes: self.nodes,
            derived: Arc::new(self.derived),
        })
    }
}
