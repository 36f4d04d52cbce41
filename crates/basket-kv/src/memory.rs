//! # In-Memory Blob Store
//!
//! HashMap-backed [`BlobStore`] implementation. The default test double,
//! and a real option for ephemeral sessions that should not touch disk.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{KvError, KvResult};
use crate::store::BlobStore;

/// In-memory blob store.
///
/// The map lives behind a std `Mutex` - operations are synchronous under
/// the hood and the lock is never held across an await point.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-seeded with the given entries.
    ///
    /// Handy for hydration tests: seed the snapshot key, then open a
    /// cart store against it.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let blobs = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        MemoryStore {
            blobs: Mutex::new(blobs),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map means a panic mid-insert on a plain HashMap;
        // the data itself is still coherent
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        if key.is_empty() {
            return Err(KvError::QueryFailed("empty key".to_string()));
        }
        Ok(self.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if key.is_empty() {
            return Err(KvError::QueryFailed("empty key".to_string()));
        }
        debug!(key = %key, bytes = value.len(), "memory store set");
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_absent_key_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("basket/cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("basket/cart", "[]").await.unwrap();

        assert_eq!(
            store.get("basket/cart").await.unwrap(),
            Some("[]".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_replaces_wholesale() {
        let store = MemoryStore::new();
        store.set("basket/cart", "old").await.unwrap();
        store.set("basket/cart", "new").await.unwrap();

        assert_eq!(
            store.get("basket/cart").await.unwrap(),
            Some("new".to_string())
        );
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_with_entries_seeds_data() {
        let store = MemoryStore::with_entries([("basket/cart", "[1]")]);
        assert_eq!(
            store.get("basket/cart").await.unwrap(),
            Some("[1]".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let store = MemoryStore::new();
        assert!(store.get("").await.is_err());
        assert!(store.set("", "x").await.is_err());
    }
}
