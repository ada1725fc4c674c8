// confbind - Configuration schema binding
// Copyright (c) 2025 confbind Contributors
// Licensed under the MIT License

//! # confbind - configuration schema binding
//!
//! confbind binds a declared configuration **schema** (named, possibly nested,
//! possibly repeated, typed options) to the values held in a hierarchical
//! key-value **store**, producing a validated, strongly-typed configuration.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Declaring** schemas programmatically or from a TOML description file
//! - **Reading** values from properties, JSON, YAML, TOML and XML sources
//! - **Parsing** raw strings into numbers, colours, durations, dates, zones and enums
//! - **Binding** a schema against a store with defaults, optional values and lists
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`binding`] - Binding engine and bound configurations
//! - [`schema`] - Schema model and description files
//! - [`parser`] - Value parser registry and built-in value types
//! - [`store`] - Store trait and backends
//! - [`domain`] - Option paths and error types
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust
//! use confbind::binding::Binder;
//! use confbind::schema::{ItemKind, Schema, ValueType};
//! use confbind::store::JsonStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let server = Schema::builder()
//!     .scalar("host", ValueType::named("string"))
//!     .with_default("port", ValueType::named("u16"), "80")
//!     .build()?;
//! let schema = Schema::builder()
//!     .scalar("name", ValueType::named("string"))
//!     .optional("timeout", ValueType::named("duration"))
//!     .list("servers", ItemKind::Nested(server))
//!     .build()?;
//!
//! let store = JsonStore::parse(
//!     r#"{"name": "demo", "servers": [{"host": "a"}, {"host": "b", "port": 8080}]}"#,
//! )?;
//!
//! let config = Binder::new(&schema).bind(&store)?;
//! assert_eq!(config.value::<String>("name")?, "demo");
//! assert_eq!(config.optional::<chrono::Duration>("timeout")?, None);
//!
//! let servers = config.list("servers")?;
//! assert_eq!(servers.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Binding failures are reported as [`domain::ConfigurationError`], qualified with
//! the path of the option that failed:
//!
//! ```rust
//! use confbind::binding::Binder;
//! use confbind::schema::{Schema, ValueType};
//! use confbind::store::PropertiesStore;
//!
//! let inner = Schema::builder().scalar("leaf", ValueType::named("i32")).build().unwrap();
//! let schema = Schema::builder().nested("nested", inner).build().unwrap();
//!
//! let err = Binder::new(&schema).bind(&PropertiesStore::default()).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "No value provided for mandatory option leaf in nested.leaf"
//! );
//! ```
//!
//! ## Logging
//!
//! confbind uses structured logging with the `tracing` crate; see [`logging`].

pub mod binding;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod parser;
pub mod schema;
pub mod store;
