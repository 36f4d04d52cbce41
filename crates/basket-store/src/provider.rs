//! # Provider Scope
//!
//! The dependency-injection boundary: consumers anywhere inside an active
//! scope can look up the cart store; a lookup outside one is a programmer
//! error, not a runtime condition.
//!
//! ## Scope Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Provider Scope Lifetime                             │
//! │                                                                         │
//! │  let provider = CartProvider::new();                                    │
//! │                                                                         │
//! │  provider.cart() ────────────────► Err(OutsideScope)                    │
//! │                                                                         │
//! │  let scope = provider.provide(store);   ← scope activates               │
//! │  │                                                                      │
//! │  │  provider.cart() ──────────────► Ok(handle)                          │
//! │  │  (any consumer holding &provider)                                    │
//! │  │                                                                      │
//! │  drop(scope);                            ← scope ends                   │
//! │                                                                         │
//! │  provider.cart() ────────────────► Err(OutsideScope)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The lookup hands out a shared handle (`Arc<CartStore>`) rather than an
//! ambient global: components that need cart access receive the provider
//! explicitly, and the configuration fault is reserved for genuine misuse.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::ProviderError;
use crate::store::CartStore;

/// Scoped registry handing out the cart store to consumers.
///
/// One provider per UI tree / session. Cheap to share by reference; the
/// slot is only written when a scope starts or ends.
#[derive(Default)]
pub struct CartProvider {
    slot: RwLock<Option<Arc<CartStore>>>,
}

impl CartProvider {
    /// Creates a provider with no active scope.
    pub fn new() -> Self {
        CartProvider::default()
    }

    /// Activates a scope serving the given store.
    ///
    /// The scope stays active until the returned guard is dropped. A new
    /// `provide` replaces any previous scope's store.
    pub fn provide(&self, store: Arc<CartStore>) -> CartScope<'_> {
        debug!("cart provider scope activated");
        *self.write() = Some(store);
        CartScope { provider: self }
    }

    /// Looks up the cart store.
    ///
    /// ## Errors
    /// [`ProviderError::OutsideScope`] when no scope is active - a
    /// configuration fault in the calling code, propagated immediately.
    pub fn cart(&self) -> Result<Arc<CartStore>, ProviderError> {
        self.read().clone().ok_or(ProviderError::OutsideScope)
    }

    /// Checks whether a scope is currently active.
    pub fn is_active(&self) -> bool {
        self.read().is_some()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<Arc<CartStore>>> {
        self.slot.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<Arc<CartStore>>> {
        self.slot.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for CartProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartProvider")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Guard marking the provider's active lifetime.
///
/// Dropping it ends the scope: subsequent lookups fail with
/// [`ProviderError::OutsideScope`].
#[must_use = "the scope ends when this guard is dropped"]
pub struct CartScope<'p> {
    provider: &'p CartProvider,
}

impl Drop for CartScope<'_> {
    fn drop(&mut self) {
        debug!("cart provider scope ended");
        *self.provider.write() = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use basket_core::NewItem;
    use basket_kv::MemoryStore;

    async fn open_store() -> Arc<CartStore> {
        Arc::new(CartStore::open(Arc::new(MemoryStore::new())).await)
    }

    #[tokio::test]
    async fn test_lookup_outside_scope_fails() {
        let provider = CartProvider::new();
        assert_eq!(provider.cart().unwrap_err(), ProviderError::OutsideScope);
        assert!(!provider.is_active());
    }

    #[tokio::test]
    async fn test_lookup_inside_scope_returns_store() {
        let provider = CartProvider::new();
        let store = open_store().await;

        let _scope = provider.provide(store);

        let handle = provider.cart().unwrap();
        handle
            .add(NewItem::new("a", "A", "https://img/a.png", 1.0))
            .await
            .unwrap();

        // Both handles see the same store
        assert_eq!(provider.cart().unwrap().items().len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_after_scope_ends_fails() {
        let provider = CartProvider::new();

        {
            let _scope = provider.provide(open_store().await);
            assert!(provider.cart().is_ok());
        }

        assert_eq!(provider.cart().unwrap_err(), ProviderError::OutsideScope);
    }
}
