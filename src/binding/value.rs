//! Bound values
//!
//! Parsed option values are type-erased into [`Scalar`] so one configuration can
//! hold integers, durations, enum variants and caller-defined types side by side.
//! Readers recover the concrete type with [`Scalar::downcast_ref`].

use super::bound::BoundConfig;
use std::any::{self, Any};
use std::fmt;
use std::sync::Arc;

/// Object-safe view of a parsed value
pub trait ScalarValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> ScalarValue for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A single parsed value of any type
#[derive(Clone)]
pub struct Scalar {
    type_name: &'static str,
    inner: Arc<dyn ScalarValue>,
}

impl Scalar {
    pub fn new<T: Any + fmt::Debug + Send + Sync>(value: T) -> Self {
        Self {
            type_name: any::type_name::<T>(),
            inner: Arc::new(value),
        }
    }

    /// The value as `T`, or `None` if it holds another type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.inner).as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.inner).as_any().is::<T>()
    }

    /// Name of the concrete type, for diagnostics
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.inner, f)
    }
}

/// The bound value of one option
#[derive(Debug, Clone)]
pub enum Value {
    Scalar(Scalar),
    Optional(Option<Scalar>),
    Nested(BoundConfig),
    List(Vec<Value>),
}

impl Value {
    /// The scalar held by a `Scalar`, or by a populated `Optional`
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Optional(scalar) => scalar.as_ref(),
            Self::Nested(_) | Self::List(_) => None,
        }
    }

    /// The scalar as `T`
    pub fn downcast<T: Any>(&self) -> Option<&T> {
        self.as_scalar().and_then(Scalar::downcast_ref)
    }

    pub fn as_optional(&self) -> Option<Option<&Scalar>> {
        match self {
            Self::Optional(scalar) => Some(scalar.as_ref()),
            _ => None,
        }
    }

    pub fn as_nested(&self) -> Option<&BoundConfig> {
        match self {
            Self::Nested(config) => Some(config),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Optional(_) => "optional",
            Self::Nested(_) => "nested",
            Self::List(_) => "list",
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Self::Scalar(scalar)
    }
}

impl From<BoundConfig> for Value {
    fn from(config: BoundConfig) -> Self {
        Self::Nested(config)
    }
}
