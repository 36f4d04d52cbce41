//! # Store Error Types
//!
//! Error types for the cart store and its provider scope.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  KvError (basket-kv)                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError::Persistence ← the mutation is NOT published               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller decides: surface it, retry, or drop it (fire-and-forget UI)    │
//! │                                                                         │
//! │  ProviderError is separate: it is a programmer-error guard raised      │
//! │  by the lookup, never by the store itself.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use basket_kv::KvError;

/// Cart store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persistence write or read failed.
    ///
    /// ## When This Occurs
    /// - The blob store rejected a get/set
    /// - On a mutation this means the new sequence was NOT published:
    ///   memory stays aligned with durable state
    #[error("persistence failed: {0}")]
    Persistence(#[from] KvError),

    /// The cart sequence could not be encoded for persistence.
    ///
    /// Should not happen for plain item data; kept typed rather than
    /// panicking at the serialization boundary.
    #[error("snapshot encode failed: {0}")]
    Encode(#[from] serde_json::Error),

    /// A command was sent to a writer queue that has shut down.
    #[error("cart writer is not running")]
    WriterClosed,
}

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

/// Provider scope lookup errors.
///
/// A configuration fault in the calling code, not a runtime condition:
/// a handle was requested where no scope was ever activated (or after it
/// ended). Propagated immediately, never recoverable by the store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Lookup invoked outside an active provider scope.
    #[error("cart store must be used within an active CartProvider scope")]
    OutsideScope,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ProviderError::OutsideScope.to_string(),
            "cart store must be used within an active CartProvider scope"
        );

        let err = StoreError::Persistence(KvError::QueryFailed("disk full".to_string()));
        assert_eq!(err.to_string(), "persistence failed: query failed: disk full");
    }
}
