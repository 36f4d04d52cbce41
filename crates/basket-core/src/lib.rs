//! # basket-core: Pure Cart Logic for Basket
//!
//! This crate is the **heart** of Basket. It contains the cart's consistency
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Basket Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (TypeScript UI)                     │   │
//! │  │     Product list ──► Cart view ──► Quantity buttons             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    basket-store (CartStore)                     │   │
//! │  │     add, increment, decrement, hydrate, publish                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ basket-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐                 │   │
//! │  │   │   types   │  │   cart    │  │ validation │                 │   │
//! │  │   │   Item    │  │   Cart    │  │  normalize │                 │   │
//! │  │   │  NewItem  │  │  rebuild  │  │  snapshot  │                 │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line-item types ([`Item`], [`NewItem`])
//! - [`cart`] - The ordered, id-unique [`Cart`] and its rebuild operations
//! - [`validation`] - Snapshot normalization for the decode boundary
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Storage, network, file system access is FORBIDDEN here
//! 3. **Id-Unique Sequences**: No two items in a cart ever share an id
//! 4. **Quantity Floor**: Every item in a cart has quantity >= 1, always
//!
//! ## Example Usage
//!
//! ```rust
//! use basket_core::{Cart, NewItem};
//!
//! let mut cart = Cart::new();
//! cart.add(NewItem::new("coffee", "Coffee Beans 1kg", "https://img/coffee.png", 18.5));
//! cart.add(NewItem::new("coffee", "Coffee Beans 1kg", "https://img/coffee.png", 18.5));
//!
//! // Adding an existing id bumps the quantity instead of duplicating
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.items()[0].quantity, 2);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use basket_core::Cart` instead of
// `use basket_core::cart::Cart`

pub use cart::Cart;
pub use error::ValidationError;
pub use types::{Item, NewItem};
