//! # Error Types
//!
//! Domain error types for basket-core.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, field)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Reasons a decoded snapshot entry is rejected during normalization.
///
/// These never abort hydration - a rejected entry is dropped and the
/// reason logged, so a partially damaged snapshot still loads its valid
/// lines (a corrupted local cache must not block the user from shopping).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Entry has an empty or whitespace-only id.
    #[error("item has an empty id")]
    EmptyId,

    /// Entry quantity is below the cart floor of 1.
    #[error("item '{id}' has non-positive quantity {quantity}")]
    NonPositiveQuantity { id: String, quantity: i64 },

    /// Entry duplicates an id seen earlier in the sequence.
    #[error("item '{id}' duplicates an earlier entry")]
    DuplicateId { id: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::NonPositiveQuantity {
            id: "coffee".to_string(),
            quantity: 0,
        };
        assert_eq!(err.to_string(), "item 'coffee' has non-positive quantity 0");

        let err = ValidationError::DuplicateId {
            id: "coffee".to_string(),
        };
        assert_eq!(err.to_string(), "item 'coffee' duplicates an earlier entry");
    }
}
