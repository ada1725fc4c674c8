//! Option paths
//!
//! A [`Path`] addresses one option inside a (possibly nested, possibly repeated)
//! schema tree. Paths are immutable values: every recursion step of the binding
//! engine creates a fresh child path, sharing its ancestors.

use std::fmt;
use std::sync::Arc;

/// The location of an option within a schema tree
///
/// A path is a chain of option names from the root, where each segment may carry
/// the index of an item within a repeated option.
///
/// # Examples
///
/// ```
/// use confbind::domain::Path;
///
/// let path = Path::root("top")
///     .indexed_child("second", 2)
///     .indexed_child("third", 5)
///     .child("opt");
/// assert_eq!(path.render(), "top.second[2].third[5].opt");
/// assert_eq!(path.to_flat_key(), "top.second.2.third.5.opt");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    parent: Option<Arc<Path>>,
    option_name: String,
    position: Option<usize>,
}

impl Path {
    fn new(parent: Option<Arc<Path>>, option_name: impl Into<String>, position: Option<usize>) -> Self {
        let option_name = option_name.into();
        debug_assert!(!option_name.is_empty(), "option names must not be empty");
        Self {
            parent,
            option_name,
            position,
        }
    }

    /// Creates a top-level path for a non-repeated option
    pub fn root(option_name: impl Into<String>) -> Self {
        Self::new(None, option_name, None)
    }

    /// Creates a top-level path for one item of a repeated option
    pub fn indexed_root(option_name: impl Into<String>, position: usize) -> Self {
        Self::new(None, option_name, Some(position))
    }

    /// Returns the path of a non-repeated option nested below this one
    pub fn child(&self, option_name: impl Into<String>) -> Self {
        Self::new(Some(Arc::new(self.clone())), option_name, None)
    }

    /// Returns the path of one item of a repeated option nested below this one
    pub fn indexed_child(&self, option_name: impl Into<String>, position: usize) -> Self {
        Self::new(Some(Arc::new(self.clone())), option_name, Some(position))
    }

    /// Resolves a child path relative to an optional context
    ///
    /// A `None` context denotes the schema root.
    pub fn under(context: Option<&Path>, option_name: &str) -> Self {
        match context {
            Some(parent) => parent.child(option_name),
            None => Self::root(option_name),
        }
    }

    /// Resolves an indexed child path relative to an optional context
    pub fn indexed_under(context: Option<&Path>, option_name: &str, position: usize) -> Self {
        match context {
            Some(parent) => parent.indexed_child(option_name, position),
            None => Self::indexed_root(option_name, position),
        }
    }

    /// The enclosing path, `None` for top-level options
    pub fn parent(&self) -> Option<&Path> {
        self.parent.as_deref()
    }

    /// The name of the option this path points at
    pub fn option_name(&self) -> &str {
        &self.option_name
    }

    /// The item index within a repeated option, if any
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_indexed(&self) -> bool {
        self.position.is_some()
    }

    /// The same location with the item index dropped from the last segment
    pub fn without_position(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            option_name: self.option_name.clone(),
            position: None,
        }
    }

    /// Iterates the segments from the root down to this path
    pub fn segments(&self) -> impl Iterator<Item = &Path> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(segment) = current {
            chain.push(segment);
            current = segment.parent();
        }
        chain.into_iter().rev()
    }

    /// Number of segments in the chain
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Renders the human-readable form used in diagnostics, e.g. `top.second[2].opt`
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Renders the flat key-value form, e.g. `top.second.2.opt`
    pub fn to_flat_key(&self) -> String {
        let mut key = String::new();
        for segment in self.segments() {
            if !key.is_empty() {
                key.push('.');
            }
            key.push_str(&segment.option_name);
            if let Some(position) = segment.position {
                key.push('.');
                key.push_str(&position.to_string());
            }
        }
        key
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = &self.parent {
            write!(f, "{parent}.")?;
        }
        f.write_str(&self.option_name)?;
        if let Some(position) = self.position {
            write!(f, "[{position}]")?;
        }
        Ok(())
    }
}
