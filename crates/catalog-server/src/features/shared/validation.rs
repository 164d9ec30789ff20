//! Shared validation utilities
//!
//! Explicit field validators invoked from payload extraction, before
//! anything touches the database. Each validator returns a typed error so
//! callers can decide how to surface it.

use thiserror::Error;

/// Maximum length of a product name, in characters.
pub const PRODUCT_NAME_MAX_CHARS: usize = 50;

/// Errors that can occur during product name validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NameValidationError {
    #[error("[name] expected length between 1-{max} characters, got {len}")]
    TooLong { len: usize, max: usize },
}

/// Errors that can occur during rating validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RatingValidationError {
    #[error("[rating] expected a non-negative value, got {0}")]
    Negative(f64),
}

/// Errors that can occur during stock count validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockValidationError {
    #[error("[items_in_stock] expected a non-negative value, got {0}")]
    Negative(i64),
}

/// Validate a product name
///
/// Only the 50-character cap is enforced. There is deliberately no lower
/// bound: the service never rejected short or empty names, and stored rows
/// may rely on that.
pub fn validate_name(name: &str) -> Result<(), NameValidationError> {
    let len = name.chars().count();
    if len > PRODUCT_NAME_MAX_CHARS {
        return Err(NameValidationError::TooLong {
            len,
            max: PRODUCT_NAME_MAX_CHARS,
        });
    }
    Ok(())
}

/// Validate a product rating (must be >= 0)
pub fn validate_rating(rating: f64) -> Result<(), RatingValidationError> {
    if rating < 0.0 {
        return Err(RatingValidationError::Negative(rating));
    }
    Ok(())
}

/// Validate a stock count (must be >= 0)
pub fn validate_items_in_stock(items_in_stock: i64) -> Result<(), StockValidationError> {
    if items_in_stock < 0 {
        return Err(StockValidationError::Negative(items_in_stock));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Apple Juice").is_ok());
        assert!(validate_name(&"a".repeat(50)).is_ok());
    }

    #[test]
    fn test_validate_name_empty_passes() {
        // No lower bound on name length.
        assert!(validate_name("").is_ok());
    }

    #[test]
    fn test_validate_name_too_long() {
        let result = validate_name(&"a".repeat(51));
        assert_eq!(result, Err(NameValidationError::TooLong { len: 51, max: 50 }));
    }

    #[test]
    fn test_validate_name_counts_chars_not_bytes() {
        // 50 multi-byte characters are still within the cap.
        assert!(validate_name(&"é".repeat(50)).is_ok());
        assert!(validate_name(&"é".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert_eq!(validate_rating(-1.0), Err(RatingValidationError::Negative(-1.0)));
    }

    #[test]
    fn test_validate_items_in_stock() {
        assert!(validate_items_in_stock(0).is_ok());
        assert!(validate_items_in_stock(120).is_ok());
        assert_eq!(
            validate_items_in_stock(-3),
            Err(StockValidationError::Negative(-3))
        );
    }
}
