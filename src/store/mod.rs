//! Configuration stores
//!
//! A [`Store`] answers one question: what string is stored at this option
//! path? Backends:
//!
//! - [`PropertiesStore`] - flat dotted keys (`servers.1.port`)
//! - [`JsonStore`], [`YamlStore`], [`TomlStore`] - document trees
//! - [`XmlStore`] - element trees with attribute fallback
//!
//! [`open_store`] picks the backend from a file extension.

pub mod document;
pub mod factory;
pub mod json;
pub mod properties;
pub mod toml;
pub mod traits;
pub mod xml;
pub mod yaml;

pub use document::{DocumentNode, DocumentStore};
pub use factory::{open_store, open_store_as, StoreFormat};
pub use json::JsonStore;
pub use properties::PropertiesStore;
pub use self::toml::TomlStore;
pub use traits::Store;
pub use xml::XmlStore;
pub use yaml::YamlStore;
