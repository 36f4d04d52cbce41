//! # Cart
//!
//! The ordered, id-unique collection of cart lines and its three rebuild
//! operations.
//!
//! ## Operation Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Rebuild Operations                             │
//! │                                                                         │
//! │  add(desc)          id absent ──► append with quantity = 1             │
//! │                     id present ─► delegate to increment (no duplicate, │
//! │                                   no quantity reset)                   │
//! │                                                                         │
//! │  increment(id)      copy every line in order, +1 on the match          │
//! │                     no match ───► sequence unchanged (no phantom line) │
//! │                                                                         │
//! │  decrement(id)      copy every line in order, -1 on the match,         │
//! │                     then drop any line with quantity <= 0              │
//! │                     no match ───► sequence unchanged                   │
//! │                                                                         │
//! │  Insertion order is preserved across all three - no re-sorting.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share an `id` (add-is-bump keeps this by construction)
//! - Every line has `quantity >= 1` (the decrement floor removes at 0)
//! - No quantity upper bound

use crate::types::{Item, NewItem};

/// The cart: an insertion-ordered sequence of id-unique lines.
///
/// Every operation rebuilds the full sequence rather than patching in
/// place. The sequence is small (a human-scale shopping cart) and the full
/// rebuild is what gets snapshotted to storage, so there is nothing to
/// gain from deltas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<Item>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Creates a cart from an already-validated item sequence.
    ///
    /// Used by hydration after [`validation::normalize`] has enforced the
    /// id-unique and quantity-floor invariants on the decoded snapshot.
    ///
    /// [`validation::normalize`]: crate::validation::normalize
    pub fn from_items(items: Vec<Item>) -> Self {
        Cart { items }
    }

    /// Adds a product to the cart, or bumps its quantity if already present.
    ///
    /// ## Behavior
    /// - Id not in cart: the descriptor becomes a new line with quantity 1,
    ///   appended at the end
    /// - Id already in cart: delegates to [`increment`](Self::increment) -
    ///   a duplicate add is redirected, never rejected and never a reset
    pub fn add(&mut self, new_item: NewItem) {
        if self.items.iter().any(|item| item.id == new_item.id) {
            self.increment(&new_item.id);
            return;
        }

        self.items.push(new_item.into_item(1));
    }

    /// Increments the quantity of the line with the given id by 1.
    ///
    /// Rebuilds the sequence copying every line in order. An absent id
    /// leaves the sequence unchanged - a no-op increment must not create
    /// a phantom line. No upper bound on quantity.
    pub fn increment(&mut self, id: &str) {
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(|mut item| {
                if item.id == id {
                    item.quantity += 1;
                }
                item
            })
            .collect();
    }

    /// Decrements the quantity of the line with the given id by 1.
    ///
    /// Rebuilds the sequence copying every line in order, then drops any
    /// line whose quantity reached 0 or below - a quantity-1 line being
    /// decremented disappears entirely, it is never retained at zero.
    /// An absent id leaves the sequence unchanged.
    pub fn decrement(&mut self, id: &str) {
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(|mut item| {
                if item.id == id {
                    item.quantity -= 1;
                }
                item
            })
            .filter(|item| item.quantity > 0)
            .collect();
    }

    /// Returns the current item sequence.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the line with the given id, if present.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Number of unique lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Cart subtotal (sum of line totals).
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Item::line_total).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(id: &str) -> NewItem {
        NewItem::new(id, format!("Product {}", id), format!("https://img/{}.png", id), 10.0)
    }

    #[test]
    fn test_add_to_empty_cart() {
        let mut cart = Cart::new();
        cart.add(desc("a"));

        assert_eq!(cart.len(), 1);
        let item = cart.get("a").unwrap();
        assert_eq!(item.title, "Product a");
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_add_existing_id_bumps_instead_of_duplicating() {
        let mut cart = Cart::new();
        cart.add(desc("a"));
        cart.add(desc("a"));

        // Still one line, quantity bumped - never two entries, never a reset
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("a").unwrap().quantity, 2);
    }

    #[test]
    fn test_add_is_equivalent_to_increment() {
        let mut via_add = Cart::new();
        via_add.add(desc("a"));
        via_add.add(desc("a"));

        let mut via_increment = Cart::new();
        via_increment.add(desc("a"));
        via_increment.increment("a");

        assert_eq!(via_add, via_increment);
    }

    #[test]
    fn test_increment_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(desc("a"));
        let before = cart.clone();

        cart.increment("ghost");

        // No phantom line, nothing changed
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_removes_line_at_quantity_one() {
        let mut cart = Cart::new();
        cart.add(desc("a"));

        cart.decrement("a");

        assert!(cart.is_empty());
        assert!(cart.get("a").is_none());
    }

    #[test]
    fn test_decrement_preserves_order_and_other_lines() {
        let mut cart = Cart::new();
        cart.add(desc("a"));
        cart.add(desc("a")); // a: 2
        cart.add(desc("b")); // b: 1

        cart.decrement("a");

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(cart.get("a").unwrap().quantity, 1);
        assert_eq!(cart.get("b").unwrap().quantity, 1);
    }

    #[test]
    fn test_decrement_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(desc("a"));
        let before = cart.clone();

        cart.decrement("ghost");

        assert_eq!(cart, before);
    }

    #[test]
    fn test_insertion_order_preserved_across_mutations() {
        let mut cart = Cart::new();
        for id in ["c", "a", "b"] {
            cart.add(desc(id));
        }
        cart.increment("a");
        cart.decrement("c");
        cart.increment("b");

        let ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_no_duplicate_ids_under_mixed_operations() {
        let mut cart = Cart::new();
        cart.add(desc("a"));
        cart.add(desc("b"));
        cart.add(desc("a"));
        cart.increment("b");
        cart.decrement("a");
        cart.add(desc("a"));

        let mut ids: Vec<&str> = cart.items().iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), cart.len());
    }

    #[test]
    fn test_quantity_floor_holds_everywhere() {
        let mut cart = Cart::new();
        cart.add(desc("a"));
        cart.add(desc("b"));
        cart.decrement("a");
        cart.decrement("a"); // already gone, no-op
        cart.decrement("b");

        assert!(cart.items().iter().all(|item| item.quantity >= 1));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(NewItem::new("a", "A", "https://img/a.png", 2.5));
        cart.add(NewItem::new("a", "A", "https://img/a.png", 2.5));
        cart.add(NewItem::new("b", "B", "https://img/b.png", 1.0));

        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.subtotal(), 6.0);
    }
}
