//! Value parsing
//!
//! Every scalar option declares a value type. The [`ValueParsers`] registry maps
//! the type identifier to a parser producing a type-erased [`Scalar`](crate::binding::Scalar);
//! enumerations fall back to exact variant-name lookup yielding an [`EnumVariant`].
//!
//! ```rust
//! use confbind::parser::ValueParsers;
//! use confbind::schema::ValueType;
//!
//! let value_type = ValueType::named("duration");
//! let scalar = ValueParsers::builtin()
//!     .resolve(&value_type)
//!     .unwrap()
//!     .parse("PT15M")
//!     .unwrap();
//! assert_eq!(
//!     scalar.downcast_ref::<chrono::Duration>(),
//!     Some(&chrono::Duration::minutes(15))
//! );
//! ```

mod builtin;
pub mod registry;
pub mod temporal;

pub use registry::{EnumVariant, ParseFn, Resolved, ValueParsers};
pub use temporal::{MonthDay, OffsetTime, Period, Year, YearMonth};
