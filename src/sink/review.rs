//! Review-file writers for duplicates and rejected rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::EtlResult;
use crate::ingestion::partition::Rejection;
use crate::types::TripRecord;

/// Write the duplicate records as delimited text, in arrival order, with the
/// fixed nine-column header (`PickupDateTime,DropoffDateTime,...`).
///
/// Timestamps render as RFC 3339 UTC. An empty list suppresses the write
/// entirely; no file is created.
pub fn write_duplicates(path: impl AsRef<Path>, records: &[TripRecord]) -> EtlResult<()> {
    if records.is_empty() {
        return Ok(());
    }

    let mut wtr = csv::Writer::from_path(path)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write the rejections as plain text, one `Line {n}: {reason}` per line, in
/// arrival order.
///
/// An empty list suppresses the write entirely; no file is created.
pub fn write_errors(path: impl AsRef<Path>, rejections: &[Rejection]) -> EtlResult<()> {
    if rejections.is_empty() {
        return Ok(());
    }

    let mut out = BufWriter::new(File::create(path)?);
    for rejection in rejections {
        writeln!(out, "{rejection}")?;
    }
    out.flush()?;
    Ok(())
}
