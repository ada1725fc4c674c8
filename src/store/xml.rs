//! XML documents
//!
//! Options are child elements of the document element, nested options are
//! nested elements, and list items are repeated elements of the same name.
//! A final path step with no matching element falls back to an attribute of
//! the parent element:
//!
//! ```xml
//! <config name="demo">
//!     <server><host>a</host></server>
//!     <server host="b"/>
//! </config>
//! ```

use super::traits::Store;
use crate::domain::{Path, StoreError};
use roxmltree::{Document, Node};
use std::fs;

#[derive(Debug, Clone, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn from_node(node: Node<'_, '_>) -> Self {
        let mut element = Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|attribute| (attribute.name().to_string(), attribute.value().to_string()))
                .collect(),
            ..Self::default()
        };
        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                element.text.push_str(child.text().unwrap_or_default());
            }
        }
        element
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// A store over an XML document
#[derive(Debug, Clone)]
pub struct XmlStore {
    root: Element,
}

impl XmlStore {
    /// Parses XML text
    pub fn parse(source: &str) -> Result<Self, StoreError> {
        let document = Document::parse(source).map_err(|e| StoreError::malformed("XML", e))?;
        Ok(Self {
            root: Element::from_node(document.root_element()),
        })
    }

    /// Reads and parses an XML file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loading XML store");
        Self::parse(&source)
    }
}

impl Store for XmlStore {
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError> {
        let depth = path.depth();
        let mut element = &self.root;

        for (step, segment) in path.segments().enumerate() {
            let name = segment.option_name();
            let found: Vec<&Element> = element.children_named(name).collect();
            let next = match segment.position() {
                Some(index) => found.get(index).copied(),
                None if found.len() > 1 => {
                    return Err(StoreError::NotAnObject(format!(
                        "More than one node matches {segment}"
                    )))
                }
                None => found.first().copied(),
            };

            element = match next {
                Some(next) => next,
                None if step + 1 == depth && segment.position().is_none() => {
                    return Ok(element.attribute(name).map(str::to_string));
                }
                None => return Ok(None),
            };
        }

        if element.children.is_empty() {
            Ok(Some(element.text.clone()))
        } else {
            Ok(None)
        }
    }
}
