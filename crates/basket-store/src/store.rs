//! # Cart Store
//!
//! The component that owns the authoritative cart, mediates every read and
//! write to persistence, and publishes the current item sequence to
//! consumers.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CartStore Lifecycle                                │
//! │                                                                         │
//! │  CartStore::open(blobs)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────┐   snapshot present    ┌──────────────┐               │
//! │  │  hydrating   │──────────────────────►│    ready     │               │
//! │  │              │   absent / failed /   │              │               │
//! │  │ (runs once)  │──────────────────────►│ (empty cart) │               │
//! │  └──────────────┘   malformed ► empty   └──────┬───────┘               │
//! │                                                │                        │
//! │                              add / increment / decrement                │
//! │                                                │                        │
//! │                      read snapshot ► rebuild ► persist ► publish        │
//! │                                                                         │
//! │  Hydration performs NO write-back - opening a store never mutates       │
//! │  durable state.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency Model
//! Mutations are async (they await the persistence write) but each one's
//! synchronous portion runs atomically: the in-memory cart lives behind a
//! `Mutex` that is only held to copy the snapshot out or to publish, never
//! across an await. There is NO mutual exclusion between overlapping
//! mutations - each computes from whatever snapshot was current when it
//! started. Two mutations in flight at once can lose an update (the second
//! may have read state from before the first published). This is a known
//! limitation of this faithful mode; route mutations through
//! [`CartWriter`](crate::writer::CartWriter) to serialize them.
//!
//! ## Durability Alignment
//! A mutation persists the rebuilt sequence BEFORE publishing it. If the
//! write fails, the new sequence is discarded and the error returned -
//! memory never runs ahead of durable state.

use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use basket_core::{validation, Cart, Item, NewItem};
use basket_kv::BlobStore;

use crate::error::StoreResult;
use crate::snapshot;

/// The fixed namespaced key the cart snapshot is persisted under.
///
/// An implementation constant, not user-configurable: one store, one key,
/// full replacement on every write.
pub const STORAGE_KEY: &str = "basket/cart";

/// The cart store.
///
/// Owns the authoritative item sequence. All reads and writes of durable
/// state go through this type; consumers obtain it via
/// [`CartProvider`](crate::provider::CartProvider) and observe the
/// published sequence through [`subscribe`](Self::subscribe) or
/// [`items`](Self::items).
pub struct CartStore {
    /// The persistence collaborator.
    blobs: Arc<dyn BlobStore>,

    /// The authoritative cart. Locked only for synchronous copy/replace,
    /// never across an await.
    cart: Mutex<Cart>,

    /// Publisher of the current item sequence.
    published: watch::Sender<Vec<Item>>,
}

impl CartStore {
    /// Opens the store: constructs it empty, then hydrates exactly once
    /// from the persisted snapshot.
    ///
    /// ## Hydration Behavior
    /// - Key absent: cart stays empty, nothing is written back
    /// - Snapshot present: decoded, normalized, and installed wholesale
    /// - Read failure or malformed snapshot: logged and treated as absent
    ///   (a broken local cache must not block the store from opening)
    pub async fn open(blobs: Arc<dyn BlobStore>) -> Self {
        let store = Self::empty(blobs);
        store.hydrate().await;
        store
    }

    fn empty(blobs: Arc<dyn BlobStore>) -> Self {
        let (published, _) = watch::channel(Vec::new());
        CartStore {
            blobs,
            cart: Mutex::new(Cart::new()),
            published,
        }
    }

    /// One-time load of the persisted snapshot. Not cancelable, never
    /// repeated for the lifetime of the store.
    async fn hydrate(&self) {
        match self.blobs.get(STORAGE_KEY).await {
            Ok(Some(raw)) => {
                let Some(items) = snapshot::decode(&raw) else {
                    // decode already logged the parse fault
                    return;
                };

                let (items, rejects) = validation::normalize(items);
                for reason in &rejects {
                    warn!(%reason, "dropping invalid snapshot entry");
                }

                info!(count = items.len(), dropped = rejects.len(), "cart hydrated");
                self.publish(Cart::from_items(items));
            }
            Ok(None) => {
                debug!("no cart snapshot, starting empty");
            }
            Err(err) => {
                warn!(error = %err, "cart hydration read failed, starting empty");
            }
        }
    }

    /// Adds a product to the cart.
    ///
    /// Id not in the cart: a new line with quantity 1 is appended. Id
    /// already present: the existing line's quantity is bumped instead -
    /// a duplicate add is redirected, never rejected.
    ///
    /// The store assigns the quantity; the caller's descriptor is consumed
    /// into a store-owned item, never aliased.
    pub async fn add(&self, new_item: NewItem) -> StoreResult<()> {
        debug!(id = %new_item.id, "add to cart");

        let mut next = self.current();
        next.add(new_item);
        self.persist_and_publish(next).await
    }

    /// Increments the quantity of the line with the given id by 1.
    ///
    /// An absent id leaves the sequence unchanged (no phantom line), but
    /// the snapshot is still written - the write is unconditional.
    pub async fn increment(&self, id: &str) -> StoreResult<()> {
        debug!(%id, "increment");

        let mut next = self.current();
        next.increment(id);
        self.persist_and_publish(next).await
    }

    /// Decrements the quantity of the line with the given id by 1,
    /// removing the line entirely if it reaches zero.
    ///
    /// An absent id leaves the sequence unchanged, but the snapshot is
    /// still written - the write is unconditional.
    pub async fn decrement(&self, id: &str) -> StoreResult<()> {
        debug!(%id, "decrement");

        let mut next = self.current();
        next.decrement(id);
        self.persist_and_publish(next).await
    }

    /// Returns the current item sequence.
    pub fn items(&self) -> Vec<Item> {
        self.lock().items().to_vec()
    }

    /// Subscribes to the published item sequence.
    ///
    /// The receiver yields the sequence current at subscription time and
    /// every published mutation afterward.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Item>> {
        self.published.subscribe()
    }

    /// Copies the current cart out under the lock.
    fn current(&self) -> Cart {
        self.lock().clone()
    }

    /// Persists the rebuilt sequence, then publishes it.
    ///
    /// On a write failure the rebuilt sequence is dropped: the previous
    /// in-memory state stays current and aligned with durable state.
    async fn persist_and_publish(&self, next: Cart) -> StoreResult<()> {
        let encoded = snapshot::encode(next.items())?;

        if let Err(err) = self.blobs.set(STORAGE_KEY, &encoded).await {
            warn!(error = %err, "persistence write failed, keeping previous cart state");
            return Err(err.into());
        }

        self.publish(next);
        Ok(())
    }

    /// Installs the cart as current state and notifies subscribers.
    fn publish(&self, next: Cart) {
        let items = next.items().to_vec();
        *self.lock() = next;
        self.published.send_replace(items);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        // A poisoned lock can only mean a panic between two plain moves;
        // the cart value itself is still coherent
        self.cart.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.lock().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
