//! Core domain types for confbind.
//!
//! The domain layer holds the values every other layer shares:
//! - **Option paths** ([`Path`]) addressing one value inside a schema tree
//! - **Error types** ([`ConfigurationError`], [`StoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible binding operations return [`Result<T, ConfigurationError>`]. Errors
//! raised while resolving an option are qualified with its path:
//!
//! ```rust
//! use confbind::domain::{ConfigurationError, Path};
//!
//! let err = ConfigurationError::missing_value(&Path::root("server").child("port"));
//! assert_eq!(
//!     err.to_string(),
//!     "No value provided for mandatory option port in server.port"
//! );
//! ```

pub mod errors;
pub mod path;
pub mod result;

pub use errors::{ConfigurationError, StoreError};
pub use path::Path;
pub use result::Result;
