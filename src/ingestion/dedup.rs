//! Identity-based deduplication.
//!
//! Two records share an identity iff their [`TripKey`] triples are equal;
//! every other field is ignored for membership even though duplicates keep
//! their own full field values. Insertion is first-write-wins.

use std::collections::HashMap;

use crate::types::TripKey;

/// Outcome of an identity test-and-set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// First record seen with this identity; it becomes canonical.
    Canonical,
    /// The identity was already claimed by the record at the given canonical
    /// position.
    Duplicate { canonical_pos: usize },
}

/// Map from identity key to the first-seen record's canonical position.
///
/// Lookup and insert are a single operation, so no record can ever be counted
/// as both canonical and duplicate.
#[derive(Debug, Default)]
pub struct TripIndex {
    first_seen: HashMap<TripKey, usize>,
}

impl TripIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-and-set: claim `key` for the record that would land at canonical
    /// position `pos`, or report the position that already holds it.
    pub fn insert(&mut self, key: TripKey, pos: usize) -> Membership {
        match self.first_seen.entry(key) {
            std::collections::hash_map::Entry::Vacant(e) => {
                e.insert(pos);
                Membership::Canonical
            }
            std::collections::hash_map::Entry::Occupied(e) => Membership::Duplicate {
                canonical_pos: *e.get(),
            },
        }
    }

    /// Number of distinct identities seen.
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}
