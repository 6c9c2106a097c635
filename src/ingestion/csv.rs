//! CSV pipeline driver.
//!
//! One call to [`partition_csv_from_path`] performs the whole single pass:
//! read the delimited input (header skipped, quoted fields supported), gate
//! each row on the minimum field count, validate, deduplicate with
//! first-write-wins, and return the finalized [`Partitions`].
//!
//! Rows are consumed strictly in file order. With
//! [`IngestOptions::parallel`] set, validation (a pure per-row function) runs
//! on the rayon pool, but outcomes are re-serialized in original file order
//! before the first-write-wins pass, so partition contents and ordering are
//! identical to the serial mode.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono_tz::Tz;
use rayon::prelude::*;

use crate::error::{EtlError, EtlResult, RowError};
use crate::ingestion::observability::{IngestContext, IngestObserver, RunStats};
use crate::ingestion::partition::Partitions;
use crate::ingestion::validate::{MIN_FIELDS, parse_trip};
use crate::types::TripRecord;

/// Options controlling one processing run.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestOptions {
    /// Source time zone of the file's wall-clock timestamps.
    pub timezone: Tz,
    /// Emit a progress event every this many rows (0 disables progress).
    pub progress_every: u64,
    /// Validate rows on the rayon pool instead of inline.
    pub parallel: bool,
    /// Optional observer for progress and run outcomes.
    pub observer: Option<Arc<dyn IngestObserver>>,
}

impl fmt::Debug for IngestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestOptions")
            .field("timezone", &self.timezone)
            .field("progress_every", &self.progress_every)
            .field("parallel", &self.parallel)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::New_York,
            progress_every: 1_000,
            parallel: false,
            observer: None,
        }
    }
}

/// Run the full partition pass over a CSV file.
///
/// The file must have a header row (skipped) followed by data rows of at
/// least fourteen positional fields. Only failures to open or read the file
/// itself are fatal; every per-row problem lands in the error partition and
/// the pass continues.
///
/// # Examples
///
/// ```no_run
/// use trip_etl::ingestion::{partition_csv_from_path, IngestOptions};
///
/// # fn main() -> Result<(), trip_etl::EtlError> {
/// let parts = partition_csv_from_path("trips.csv", &IngestOptions::default())?;
/// println!(
///     "canonical={} duplicates={} errors={}",
///     parts.canonical().len(),
///     parts.duplicates().len(),
///     parts.errors().len()
/// );
/// # Ok(())
/// # }
/// ```
pub fn partition_csv_from_path(
    path: impl AsRef<Path>,
    options: &IngestOptions,
) -> EtlResult<Partitions> {
    let path = path.as_ref();
    let ctx = IngestContext {
        path: path.to_path_buf(),
    };

    let result = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(EtlError::from)
        .and_then(|mut rdr| run_pass(&mut rdr, options, &ctx));

    report(options, &ctx, &result);
    result
}

/// Run the full partition pass over an existing CSV reader.
///
/// The reader must be configured with headers enabled and flexible field
/// counts (short rows are a per-row error, not a reader error).
pub fn partition_csv_from_reader<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &IngestOptions,
) -> EtlResult<Partitions> {
    let ctx = IngestContext {
        path: PathBuf::new(),
    };
    let result = run_pass(rdr, options, &ctx);
    report(options, &ctx, &result);
    result
}

fn report(options: &IngestOptions, ctx: &IngestContext, result: &EtlResult<Partitions>) {
    if let Some(obs) = options.observer.as_ref() {
        match result {
            Ok(parts) => obs.on_complete(
                ctx,
                RunStats {
                    lines: parts.total_rows() as u64,
                    canonical: parts.canonical().len(),
                    duplicates: parts.duplicates().len(),
                    errors: parts.errors().len(),
                },
            ),
            Err(e) => obs.on_failure(ctx, e),
        }
    }
}

fn run_pass<R: io::Read>(
    rdr: &mut csv::Reader<R>,
    options: &IngestOptions,
    ctx: &IngestContext,
) -> EtlResult<Partitions> {
    // Read phase: consume rows in file order, gating on field count and
    // catching per-row reader problems. Line numbers are 1-based over data
    // rows (the header is not counted).
    let mut raw: Vec<(u64, Result<csv::StringRecord, RowError>)> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let line = idx as u64 + 1;
        let outcome = match result {
            Ok(record) if record.len() < MIN_FIELDS => Err(RowError::NotEnoughFields),
            Ok(record) => Ok(record),
            Err(e) => {
                // Losing the underlying stream is fatal; anything else is a
                // problem with this row only.
                if matches!(e.kind(), csv::ErrorKind::Io(_)) {
                    return Err(EtlError::Csv(e));
                }
                Err(RowError::Unexpected(e.to_string()))
            }
        };
        raw.push((line, outcome));

        if options.progress_every > 0 && line % options.progress_every == 0 {
            if let Some(obs) = options.observer.as_ref() {
                obs.on_progress(ctx, line);
            }
        }
    }

    // Validation phase. The indexed parallel collect preserves input order,
    // so the first-write-wins pass below sees rows exactly as the file
    // ordered them.
    let tz = options.timezone;
    let validate = |(line, outcome): (u64, Result<csv::StringRecord, RowError>)| {
        (line, outcome.and_then(|record| parse_trip(&record, tz)))
    };
    let outcomes: Vec<(u64, Result<TripRecord, RowError>)> = if options.parallel {
        raw.into_par_iter().map(validate).collect()
    } else {
        raw.into_iter().map(validate).collect()
    };

    // Partition phase: sequential, in file order.
    let mut partitions = Partitions::new();
    for (line, outcome) in outcomes {
        partitions.apply(line, outcome);
    }
    Ok(partitions)
}
