//! # SQLite Blob Store
//!
//! Pool creation, configuration, and the durable [`BlobStore`]
//! implementation over a single blob table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Blob Store                                  │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvConfig::new(path) ← Configure pool settings                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::open(config).await ← Create pool + bootstrap schema       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │            SqlitePool                   │                            │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐               │  (max_connections)          │
//! │  │  │Conn1│ │Conn2│ │Conn3│ ...           │                            │
//! │  │  └─────┘ └─────┘ └─────┘               │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  blobs (key TEXT PRIMARY KEY, value TEXT NOT NULL, updated_at TEXT)     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery
//!
//! ## Why No Migrations Directory
//! The schema is one table and never evolves independently of this crate,
//! so bootstrap is a `CREATE TABLE IF NOT EXISTS` at open time rather than
//! an embedded migrator.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use crate::error::{KvError, KvResult};
use crate::store::BlobStore;

// =============================================================================
// Configuration
// =============================================================================

/// Blob store configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = KvConfig::new("/path/to/basket.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct KvConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (sufficient for a local single-process store)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl KvConfig {
    /// Creates a new configuration with the given database path.
    ///
    /// The file is created on open if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        KvConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Creates a configuration for an in-memory database.
    ///
    /// ## When To Use
    /// - Tests that want real SQL without touching disk
    /// - Ephemeral sessions
    pub fn in_memory() -> Self {
        KvConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1, // In-memory requires single connection
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }
}

// =============================================================================
// SQLite Store
// =============================================================================

/// Durable blob store backed by a SQLite connection pool.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens the blob store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite (WAL journal, NORMAL synchronous)
    /// 3. Creates the connection pool
    /// 4. Bootstraps the blob table
    ///
    /// ## Returns
    /// * `Ok(SqliteStore)` - Ready-to-use store
    /// * `Err(KvError)` - Connection or schema bootstrap failed
    pub async fn open(config: KvConfig) -> KvResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening SQLite blob store"
        );

        // sqlite://path?mode=rwc creates the file if not exists
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| KvError::ConnectionFailed(e.to_string()))?
            // WAL mode: readers don't block writers and vice versa
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose the last
            // transaction on power loss - acceptable for a local cache
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| KvError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Blob store pool created"
        );

        let store = SqliteStore { pool };
        store.bootstrap_schema().await?;

        Ok(store)
    }

    /// Creates the blob table if it doesn't exist.
    ///
    /// Idempotent: safe to run on every open.
    async fn bootstrap_schema(&self) -> KvResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS blobs (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| KvError::SchemaFailed(e.to_string()))?;

        debug!("Blob table ready");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    ///
    /// For diagnostics and tests; prefer the [`BlobStore`] methods.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Checks if the store is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the connection pool.
    ///
    /// After calling close, all blob operations will fail.
    pub async fn close(&self) {
        info!("Closing blob store pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl BlobStore for SqliteStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        debug!(key = %key, "blob get");

        let row = sqlx::query("SELECT value FROM blobs WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        debug!(key = %key, bytes = value.len(), "blob set");

        sqlx::query(
            r#"
            INSERT INTO blobs (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

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
    async fn test_in_memory_store_opens() {
        let store = SqliteStore::open(KvConfig::in_memory()).await.unwrap();
        assert!(store.health_check().await);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = KvConfig::new("/tmp/test.db")
            .max_connections(10)
            .min_connections(2);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
    }

    #[tokio::test]
    async fn test_get_absent_key_returns_none() {
        let store = SqliteStore::open(KvConfig::in_memory()).await.unwrap();
        assert_eq!(store.get("basket/cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let store = SqliteStore::open(KvConfig::in_memory()).await.unwrap();

        store.set("basket/cart", r#"[{"id":"a"}]"#).await.unwrap();

        assert_eq!(
            store.get("basket/cart").await.unwrap(),
            Some(r#"[{"id":"a"}]"#.to_string())
        );
    }

    #[tokio::test]
    async fn test_set_is_full_replacement() {
        let store = SqliteStore::open(KvConfig::in_memory()).await.unwrap();

        store.set("basket/cart", "first").await.unwrap();
        store.set("basket/cart", "second").await.unwrap();

        assert_eq!(
            store.get("basket/cart").await.unwrap(),
            Some("second".to_string())
        );
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = SqliteStore::open(KvConfig::in_memory()).await.unwrap();

        store.set("basket/cart", "cart").await.unwrap();
        store.set("basket/other", "other").await.unwrap();

        assert_eq!(
            store.get("basket/cart").await.unwrap(),
            Some("cart".to_string())
        );
        assert_eq!(
            store.get("basket/other").await.unwrap(),
            Some("other".to_string())
        );
    }
}
