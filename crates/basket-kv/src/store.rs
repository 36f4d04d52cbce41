//! # BlobStore Trait
//!
//! The seam between the cart store and durable storage: an async
//! key-value interface over opaque string blobs.
//!
//! ## Contract
//! - `get` returns `None` for an absent key (absence is not an error)
//! - `set` is a full replacement of the value under the key
//! - Each individual call is consistent on its own - no partial writes
//! - No delete/clear: the cart core never removes its key, it only
//!   replaces the snapshot wholesale

use async_trait::async_trait;

use crate::error::KvResult;

/// Async key-value blob storage.
///
/// Implementations must be cheap to share behind an `Arc` - the cart
/// store and the writer queue both hold handles.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`, or `None` if the key is absent.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;
}
