//! Three-way partitioning of a processing run.
//!
//! [`Partitions`] owns the canonical / duplicate / error collections for one
//! pass over one input file. Exactly one collection receives each physical
//! row, so the partitions are disjoint and exhaustive. All three are
//! append-only during the pass and read-only afterward.

use std::fmt;

use crate::error::RowError;
use crate::ingestion::dedup::{Membership, TripIndex};
use crate::types::TripRecord;

/// A rejected row: its 1-based data line number and the reason.
///
/// Renders as `Line {n}: {reason}`, the exact form written to the error
/// output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub line: u64,
    pub reason: RowError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line, self.reason)
    }
}

/// The three disjoint outputs of a single pass.
#[derive(Debug, Default)]
pub struct Partitions {
    canonical: Vec<TripRecord>,
    duplicates: Vec<TripRecord>,
    errors: Vec<Rejection>,
    index: TripIndex,
}

impl Partitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one row outcome to the collection it belongs to.
    pub fn apply(&mut self, line: u64, outcome: Result<TripRecord, RowError>) {
        match outcome {
            Ok(record) => {
                self.record_valid(record);
            }
            Err(reason) => self.record_error(line, reason),
        }
    }

    /// Route a valid record: first record with a given identity becomes
    /// canonical, every later one lands in the duplicate list with its own
    /// full field values.
    pub fn record_valid(&mut self, record: TripRecord) -> Membership {
        let membership = self.index.insert(record.identity(), self.canonical.len());
        match membership {
            Membership::Canonical => self.canonical.push(record),
            Membership::Duplicate { .. } => self.duplicates.push(record),
        }
        membership
    }

    /// Route a rejected row to the error list.
    pub fn record_error(&mut self, line: u64, reason: RowError) {
        self.errors.push(Rejection { line, reason });
    }

    /// Canonical records in first-seen order.
    pub fn canonical(&self) -> &[TripRecord] {
        &self.canonical
    }

    /// Duplicate records in arrival order.
    pub fn duplicates(&self) -> &[TripRecord] {
        &self.duplicates
    }

    /// Rejections in arrival order.
    pub fn errors(&self) -> &[Rejection] {
        &self.errors
    }

    /// Total number of rows routed so far.
    pub fn total_rows(&self) -> usize {
        self.canonical.len() + self.duplicates.len() + self.errors.len()
    }
}
