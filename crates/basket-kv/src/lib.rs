//! # basket-kv: Persistence Layer for Basket
//!
//! This crate provides durable storage for the cart store: an async
//! key-value blob interface with a SQLite implementation for disk and an
//! in-memory implementation for tests and ephemeral sessions.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Data Flow                                 │
//! │                                                                         │
//! │  CartStore mutation (basket-store)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     basket-kv (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   BlobStore   │    │  SqliteStore  │    │ MemoryStore  │  │   │
//! │  │   │   (store.rs)  │◄───│  (sqlite.rs)  │    │ (memory.rs)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ async get/set │    │ SqlitePool    │    │ HashMap +    │  │   │
//! │  │   │ by string key │◄───│ WAL, upsert   │    │ Mutex        │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  blobs table: (key TEXT PRIMARY KEY, value TEXT, updated_at TEXT)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`BlobStore`] trait (the seam the cart store depends on)
//! - [`sqlite`] - SQLite-backed implementation with pool configuration
//! - [`memory`] - In-memory implementation
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use basket_kv::{KvConfig, SqliteStore};
//!
//! let store = SqliteStore::open(KvConfig::new("path/to/basket.db")).await?;
//! store.set("basket/cart", "[]").await?;
//! let value = store.get("basket/cart").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{KvError, KvResult};
pub use memory::MemoryStore;
pub use sqlite::{KvConfig, SqliteStore};
pub use store::BlobStore;
