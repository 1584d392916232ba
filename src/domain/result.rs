//! Result type alias for pii-curator
//!
//! This module provides a convenient Result type alias that uses CuratorError
//! as the error type.

use super::errors::CuratorError;

/// Result type alias for pii-curator operations
///
/// # Examples
///
/// ```
/// use pii_curator::domain::result::Result;
/// use pii_curator::domain::errors::CuratorError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CuratorError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CuratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(CuratorError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
