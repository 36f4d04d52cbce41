//! # Snapshot Codec
//!
//! The serialized form of the full cart sequence, persisted under one
//! fixed key and always replaced wholesale - there is no delta encoding.
//!
//! ## Format
//! A JSON array of items. Array order is significant and must round-trip
//! (it is the cart's insertion order); field order within an item is not.
//! The format predates this crate - snapshots written by earlier writers
//! must decode unchanged.

use basket_core::Item;
use tracing::warn;

/// Encodes the full item sequence for persistence.
pub fn encode(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Decodes a persisted snapshot.
///
/// A malformed snapshot yields `None` - the caller treats it exactly like
/// an absent key and starts empty, because a corrupted local cache must
/// not block the user from shopping. The parse fault is logged here, once.
pub fn decode(raw: &str) -> Option<Vec<Item>> {
    match serde_json::from_str(raw) {
        Ok(items) => Some(items),
        Err(err) => {
            warn!(error = %err, "malformed cart snapshot, treating as absent");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
