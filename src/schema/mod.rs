//! Configuration schemas
//!
//! A schema declares the options a configuration consists of: their names,
//! whether they are required, optional, nested or repeated, their value types
//! and defaults. Schemas are built either programmatically with
//! [`Schema::builder`] or from a TOML description file with [`load_schema`].
//!
//! # Quick Start
//!
//! ```rust
//! use confbind::schema::{ItemKind, Schema, ValueType};
//!
//! # fn example() -> confbind::domain::Result<()> {
//! let endpoint = Schema::builder()
//!     .scalar("host", ValueType::named("string"))
//!     .with_default("port", ValueType::named("u16"), "443")
//!     .build()?;
//!
//! let schema = Schema::builder()
//!     .scalar("name", ValueType::named("string"))
//!     .optional("timeout", ValueType::named("duration"))
//!     .list("endpoints", ItemKind::Nested(endpoint))
//!     .build()?;
//! # Ok(())
//! # }
//! ```

pub mod description;
pub mod loader;
pub mod node;

pub use description::{OptionDescription, SchemaDescription};
pub use loader::{load_schema, parse_schema};
pub use node::{
    DeriveFn, DerivedOption, DerivedOptions, EnumType, ItemKind, OptionKind, Schema,
    SchemaBuilder, SchemaNode, ValueType,
};
