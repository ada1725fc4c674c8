//! Document-tree stores
//!
//! JSON, YAML and TOML sources share one lookup algorithm: descend through
//! objects by option name, take the indexed element of an array for list items,
//! and render the leaf as a string. The format-specific part is the
//! [`DocumentNode`] implementation of each parser's value type.

use super::traits::Store;
use crate::domain::{Path, StoreError};
use std::fmt;
use std::fs;

/// A node of a parsed document tree
pub trait DocumentNode: Send + Sync + Sized {
    /// Format name used in error messages
    const FORMAT: &'static str;

    fn parse_document(source: &str) -> Result<Self, String>;

    fn is_null(&self) -> bool;

    /// The member `name` of this node
    fn member(&self, name: &str) -> Member<'_, Self>;

    /// The element at `index` if this node is an array
    fn element(&self, index: usize) -> Option<&Self>;

    /// The leaf rendered as a string; `None` for null, arrays and objects
    fn scalar(&self) -> Option<String>;
}

/// Outcome of looking a member up in a node
pub enum Member<'a, N> {
    Found(&'a N),
    Absent,
    /// The node is a leaf or an array
    NotAnObject,
}

/// A store over a parsed document
#[derive(Clone)]
pub struct DocumentStore<N> {
    root: N,
}

impl<N: DocumentNode> DocumentStore<N> {
    pub fn from_value(root: N) -> Self {
        Self { root }
    }

    /// Parses document text
    pub fn parse(source: &str) -> Result<Self, StoreError> {
        N::parse_document(source)
            .map(Self::from_value)
            .map_err(|e| StoreError::malformed(N::FORMAT, e))
    }

    /// Reads and parses a document file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), format = N::FORMAT, "Loading document store");
        Self::parse(&source)
    }

    pub fn root(&self) -> &N {
        &self.root
    }
}

impl<N: DocumentNode> Store for DocumentStore<N> {
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError> {
        if self.root.is_null() {
            return Ok(None);
        }

        let mut node = &self.root;
        let mut parent: Option<&Path> = None;
        for segment in path.segments() {
            let member = match node.member(segment.option_name()) {
                Member::Found(member) => member,
                Member::Absent => return Ok(None),
                Member::NotAnObject => {
                    let name = parent.map_or_else(|| "document root".to_string(), Path::render);
                    return Err(StoreError::NotAnObject(format!("{name} is not an object")));
                }
            };
            let child = match segment.position() {
                Some(index) => match member.element(index) {
                    Some(element) => element,
                    None => return Ok(None),
                },
                None => member,
            };
            if child.is_null() {
                return Ok(None);
            }
            node = child;
            parent = Some(segment);
        }
        Ok(node.scalar())
    }
}

impl<N: DocumentNode> fmt::Debug for DocumentStore<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentStore")
            .field("format", &N::FORMAT)
            .finish_non_exhaustive()
    }
}
