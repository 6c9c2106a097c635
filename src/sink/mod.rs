//! Sink writers for the three finalized partitions.
//!
//! - [`sqlite`]: bulk append of canonical records into the relational sink
//! - [`review`]: duplicates CSV and plain-text error listing for human review
//!
//! All writers consume already-finalized, read-only collections; an empty
//! collection suppresses the corresponding write entirely.

pub mod review;
pub mod sqlite;

pub use review::{write_duplicates, write_errors};
pub use sqlite::TripStore;
