//! # Validation Module
//!
//! Normalization for the snapshot decode boundary.
//!
//! ## Why Normalize?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    The Decode Trust Boundary                            │
//! │                                                                         │
//! │  Persisted snapshot (local key-value store)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  serde_json decode ──► Vec<Item>   ← structurally valid, but...        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  THIS MODULE: normalize()                                              │
//! │  ├── drop entries with an empty id                                     │
//! │  ├── drop entries with quantity < 1                                    │
//! │  └── drop entries duplicating an earlier id (first wins)               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Item> satisfying the Cart invariants, order preserved             │
//! │                                                                         │
//! │  A snapshot written by any earlier or foreign writer is data, not      │
//! │  code - the cart invariants are re-established here, not assumed.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only `id` and `quantity` are checked. `price` and the display fields
//! are trusted as-is.

use crate::error::ValidationError;
use crate::types::Item;

/// Checks a single decoded entry against the cart invariants.
///
/// `seen` holds the ids accepted earlier in the sequence.
///
/// ## Example
/// ```rust
/// use basket_core::validation::validate_entry;
/// use basket_core::NewItem;
///
/// let item = NewItem::new("a", "A", "https://img/a.png", 1.0).into_item(1);
/// assert!(validate_entry(&item, &[]).is_ok());
/// assert!(validate_entry(&item, &["a".to_string()]).is_err());
/// ```
pub fn validate_entry(item: &Item, seen: &[String]) -> Result<(), ValidationError> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::EmptyId);
    }

    if item.quantity < 1 {
        return Err(ValidationError::NonPositiveQuantity {
            id: item.id.clone(),
            quantity: item.quantity,
        });
    }

    if seen.iter().any(|id| *id == item.id) {
        return Err(ValidationError::DuplicateId {
            id: item.id.clone(),
        });
    }

    Ok(())
}

/// Normalizes a decoded snapshot into a sequence satisfying the cart
/// invariants.
///
/// Invalid entries are dropped, not repaired; valid entries keep their
/// original order. Returns the surviving sequence and the rejects (for
/// the caller to log).
pub fn normalize(items: Vec<Item>) -> (Vec<Item>, Vec<ValidationError>) {
    let mut accepted: Vec<Item> = Vec::with_capacity(items.len());
    let mut seen: Vec<String> = Vec::with_capacity(items.len());
    let mut rejects: Vec<ValidationError> = Vec::new();

    for item in items {
        match validate_entry(&item, &seen) {
            Ok(()) => {
                seen.push(item.id.clone());
                accepted.push(item);
            }
            Err(reason) => rejects.push(reason),
        }
    }

    (accepted, rejects)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NewItem;

    fn item(id: &str, quantity: i64) -> Item {
        Item {
            quantity,
            ..NewItem::new(id, format!("P{}", id), format!("https://img/{}.png", id), 1.0)
                .into_item(1)
        }
    }

    #[test]
    fn test_valid_sequence_passes_through_in_order() {
        let (kept, rejects) = normalize(vec![item("b", 2), item("a", 1)]);
        let ids: Vec<&str> = kept.iter().map(|i| i.id.as_str()).collect();

        assert_eq!(ids, vec!["b", "a"]);
        assert!(rejects.is_empty());
    }

    #[test]
    fn test_drops_empty_id() {
        let (kept, rejects) = normalize(vec![item("", 1), item("a", 1)]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "a");
        assert_eq!(rejects, vec![ValidationError::EmptyId]);
    }

    #[test]
    fn test_drops_non_positive_quantity() {
        let (kept, rejects) = normalize(vec![item("a", 0), item("b", -3), item("c", 1)]);

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "c");
        assert_eq!(rejects.len(), 2);
    }

    #[test]
    fn test_drops_duplicate_id_first_wins() {
        let first = item("a", 2);
        let (kept, rejects) = normalize(vec![first.clone(), item("a", 5)]);

        assert_eq!(kept, vec![first]);
        assert_eq!(
            rejects,
            vec![ValidationError::DuplicateId { id: "a".to_string() }]
        );
    }
}
