//! Result type alias for confbind
//!
//! This module provides a convenient Result type alias that uses
//! [`ConfigurationError`] as the error type.

use super::errors::ConfigurationError;

/// Result type alias for confbind operations
///
/// # Examples
///
/// ```
/// use confbind::domain::result::Result;
/// use confbind::domain::errors::ConfigurationError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ConfigurationError::Schema("duplicate option".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConfigurationError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ConfigurationError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ConfigurationError::Access("unknown".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
