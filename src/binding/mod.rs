//! Schema binding
//!
//! Resolves a [`Schema`](crate::schema::Schema) against a
//! [`Store`](crate::store::Store) into an immutable [`BoundConfig`].
//!
//! - [`engine`] - the recursive binding algorithm
//! - [`bound`] - the bound configuration and its typed accessors
//! - [`value`] - type-erased bound values
//! - [`binder`] - fluent entry point with caller-supplied value parsers

pub mod binder;
pub mod bound;
pub mod engine;
pub mod value;

pub use binder::{bind_file, Binder};
pub use bound::BoundConfig;
pub use engine::bind;
pub use value::{Scalar, ScalarValue, Value};
