//! # Storage Error Types
//!
//! Error types for blob store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (basket-store) ← Decides publish vs rollback               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Blob store operation errors.
#[derive(Debug, Error)]
pub enum KvError {
    /// Store could not be opened.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema bootstrap failed.
    #[error("schema setup failed: {0}")]
    SchemaFailed(String),

    /// A get/set query failed.
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for KvError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                KvError::ConnectionFailed(err.to_string())
            }
            other => KvError::QueryFailed(other.to_string()),
        }
    }
}

/// Convenience type alias for Results with KvError.
pub type KvResult<T> = Result<T, KvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = KvError::ConnectionFailed("no such directory".to_string());
        assert_eq!(err.to_string(), "connection failed: no such directory");
    }

    #[test]
    fn test_sqlx_error_maps_to_query_failed() {
        let err: KvError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, KvError::QueryFailed(_)));
    }
}
