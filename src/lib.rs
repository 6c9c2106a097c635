//! `trip-etl` is a single-pass batch ETL pipeline for delimited files of
//! ground-transportation trip records: each row is validated and normalized,
//! duplicates are removed by a business identity rule, the surviving
//! canonical records are bulk-loaded into a relational sink (SQLite), and
//! duplicates and rejected rows are diverted to review files.
//!
//! The primary entrypoint is [`ingestion::partition_csv_from_path`], which
//! runs the whole pass over one input file and returns the three finalized
//! partitions. The [`sink`] module then consumes them.
//!
//! ## Processing model
//!
//! - **Validation** ([`ingestion::validate`]): fixed rule sequence per row,
//!   first failure wins; timestamps are parsed in a fixed
//!   `MM/DD/YYYY hh:mm:ss AM/PM` format and converted from the configured
//!   source time zone to UTC.
//! - **Deduplication** ([`ingestion::dedup`]): identity is the
//!   (pickup, dropoff, passenger count) triple; first write wins.
//! - **Partitioning** ([`ingestion::partition`]): every row lands in exactly
//!   one of {canonical, duplicates, errors}.
//! - **Sink** ([`sink`]): batched transactional bulk append of the canonical
//!   set; duplicates/errors written as review files, suppressed when empty.
//!
//! Per-row problems never abort a run; only failures to open or read the
//! input (or to reach the sink) are fatal.
//!
//! ## Quick example
//!
//! ```no_run
//! use trip_etl::ingestion::{partition_csv_from_path, IngestOptions};
//! use trip_etl::sink::{write_duplicates, write_errors, TripStore};
//!
//! # fn main() -> Result<(), trip_etl::EtlError> {
//! let parts = partition_csv_from_path("trips.csv", &IngestOptions::default())?;
//!
//! write_errors("error_records.csv", parts.errors())?;
//! write_duplicates("duplicates.csv", parts.duplicates())?;
//!
//! let mut store = TripStore::open("trips.db")?;
//! store.bulk_insert(parts.canonical())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: the pipeline — reading, validation, dedup, partitioning
//! - [`types`]: the trip record data model and identity key
//! - [`sink`]: relational bulk load and review-file writers
//! - [`error`]: fatal and per-row error types

pub mod error;
pub mod ingestion;
pub mod sink;
pub mod types;

pub use error::{EtlError, EtlResult, RowError};
