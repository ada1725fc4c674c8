//! Store abstraction
//!
//! This module defines the trait every configuration source implements to be
//! bound against a schema.

use crate::domain::{Path, StoreError};
use std::sync::Arc;

/// A read-only source of raw option values
///
/// Implementations map a [`Path`] to the string stored there. They must be
/// deterministic: asking for the same path twice yields the same answer.
pub trait Store: Send + Sync {
    /// Looks the value at `path` up
    ///
    /// Returns `Ok(None)` when nothing is stored at `path`, including when any
    /// ancestor of `path` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAnObject`] when an ancestor exists but is not a
    /// container, or when the lookup is ambiguous. Other backend failures are
    /// reported as [`StoreError::Backend`].
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError>;
}

impl<S: Store + ?Sized> Store for &S {
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError> {
        (**self).get(path)
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError> {
        (**self).get(path)
    }
}

impl<S: Store + ?Sized> Store for Arc<S> {
    fn get(&self, path: &Path) -> Result<Option<String>, StoreError> {
        (**self).get(path)
    }
}
