//! # Line-Item Types
//!
//! The two shapes a cart line takes: [`NewItem`] (what the UI hands us when
//! the user taps "add") and [`Item`] (what the store owns and persists).
//!
//! ## Why Two Types?
//! The quantity on a cart line is assigned by the store, never by the
//! caller. Modeling the add-descriptor as its own type makes "quantity is
//! store-owned" a compile-time fact instead of a convention, and building a
//! fresh [`Item`] from it means the caller's value is never aliased into
//! store state.
//!
//! ## Serde Field Names
//! Field names are serialized as written (`image_url` stays snake_case).
//! The persisted snapshot format predates this crate and must hydrate
//! unchanged, so no `rename_all` cosmetics here.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One cart line: a product plus the quantity currently in the cart.
///
/// ## Invariants (enforced by [`Cart`](crate::Cart), not by this type)
/// - `id` is unique within a cart
/// - `quantity` is always >= 1 inside a cart; a line that would reach 0
///   is removed from the sequence, never retained at zero
///
/// ## Trust Boundary
/// `price` is caller-supplied and stored as-is - no numeric validation.
/// Only `id` and `quantity` are checked when a snapshot is decoded
/// (see [`validation`](crate::validation)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Item {
    /// Product id - the unique key within a cart
    pub id: String,

    /// Display title
    pub title: String,

    /// Display image URL
    pub image_url: String,

    /// Unit price, trusted as supplied
    pub price: f64,

    /// Quantity in the cart (>= 1 inside a cart)
    pub quantity: i64,
}

/// An add-descriptor: an [`Item`] without a quantity.
///
/// The store assigns quantity on add (1 for a new line, or a bump of the
/// existing line). Callers never pick a starting quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewItem {
    /// Product id
    pub id: String,

    /// Display title
    pub title: String,

    /// Display image URL
    pub image_url: String,

    /// Unit price
    pub price: f64,
}

impl NewItem {
    /// Creates a new add-descriptor.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        NewItem {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }

    /// Builds a store-owned [`Item`] with the given quantity.
    ///
    /// This is an explicit copy into the store's ownership - the caller's
    /// descriptor is consumed, never aliased into cart state.
    pub fn into_item(self, quantity: i64) -> Item {
        Item {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

impl Item {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_item_assigns_quantity() {
        let item = NewItem::new("a", "Apple", "https://img/a.png", 2.5).into_item(1);
        assert_eq!(item.id, "a");
        assert_eq!(item.quantity, 1);
        assert_eq!(item.price, 2.5);
    }

    #[test]
    fn test_line_total() {
        let item = NewItem::new("a", "Apple", "https://img/a.png", 2.5).into_item(3);
        assert_eq!(item.line_total(), 7.5);
    }

    #[test]
    fn test_serde_field_names_round_trip() {
        let item = NewItem::new("a", "Apple", "https://img/a.png", 2.5).into_item(1);
        let json = serde_json::to_value(&item).unwrap();

        // The persisted format uses these exact names; they must not drift
        assert!(json.get("image_url").is_some());
        assert!(json.get("quantity").is_some());

        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }
}
