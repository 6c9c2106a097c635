//! Ingestion pipeline: validation, deduplication, and partitioning.
//!
//! Most callers should use [`partition_csv_from_path`] (from [`csv`]) which:
//!
//! - reads the delimited input file (header skipped, quoted fields supported)
//! - validates and zone-normalizes each row ([`validate`])
//! - assigns identities with first-write-wins deduplication ([`dedup`])
//! - returns the three finalized partitions ([`partition`])
//! - optionally reports progress and run outcomes to an [`IngestObserver`]

pub mod csv;
pub mod dedup;
pub mod observability;
pub mod partition;
pub mod validate;

pub use csv::{IngestOptions, partition_csv_from_path, partition_csv_from_reader};
pub use observability::{
    CompositeObserver, FileObserver, IngestContext, IngestObserver, RunStats, StdErrObserver,
};
pub use partition::{Partitions, Rejection};
