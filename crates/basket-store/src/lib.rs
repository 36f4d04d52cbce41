//! # basket-store: The Cart Store
//!
//! The component consumers talk to: it owns the authoritative cart,
//! mediates every read and write of durable state, and publishes the
//! current item sequence.
//!
//! ## Consistency Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  How memory and disk stay aligned                       │
//! │                                                                         │
//! │  open ──► hydrate once (read-only; absent/failed/malformed ► empty)     │
//! │                                                                         │
//! │  every mutation:                                                        │
//! │       read snapshot ► rebuild sequence ► persist (full replacement)     │
//! │            │                                   │                        │
//! │            │                          write ok │ write failed           │
//! │            │                                   ▼        ▼               │
//! │            │                               publish   keep previous      │
//! │            │                                          state, return err │
//! │                                                                         │
//! │  Memory never runs ahead of durable state.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - [`CartStore`]: hydration and the three mutations
//! - [`snapshot`] - the persisted full-replacement JSON codec
//! - [`provider`] - [`CartProvider`]: the scoped lookup consumers use
//! - [`writer`] - [`CartWriter`]: the hardened single-writer queue
//! - [`error`] - store and provider error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use basket_core::NewItem;
//! use basket_kv::{KvConfig, SqliteStore};
//! use basket_store::{CartProvider, CartStore};
//!
//! let blobs = Arc::new(SqliteStore::open(KvConfig::new("basket.db")).await?);
//! let store = Arc::new(CartStore::open(blobs).await);
//!
//! let provider = CartProvider::new();
//! let _scope = provider.provide(store);
//!
//! // anywhere inside the scope:
//! let cart = provider.cart()?;
//! cart.add(NewItem::new("coffee", "Coffee Beans 1kg", "https://img/coffee.png", 18.5)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod provider;
pub mod snapshot;
pub mod store;
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ProviderError, StoreError, StoreResult};
pub use provider::{CartProvider, CartScope};
pub use store::{CartStore, STORAGE_KEY};
pub use writer::{CartCommand, CartWriter, CartWriterHandle};
