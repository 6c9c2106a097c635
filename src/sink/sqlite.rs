//! SQLite sink: schema bootstrap and chunked bulk append.

use std::path::Path;
use std::time::Duration;

use chrono::SecondsFormat;
use rusqlite::{Connection, params};

use crate::error::EtlResult;
use crate::types::TripRecord;

/// Rows per transaction during a bulk insert.
const BATCH_SIZE: usize = 10_000;

const CREATE_TABLE: &str = "
CREATE TABLE IF NOT EXISTS trips (
    pickup_datetime     TEXT    NOT NULL,
    dropoff_datetime    TEXT    NOT NULL,
    passenger_count     INTEGER NOT NULL,
    trip_distance       REAL    NOT NULL,
    store_and_fwd_flag  TEXT    NOT NULL,
    pu_location_id      INTEGER NOT NULL,
    do_location_id      INTEGER NOT NULL,
    fare_amount         REAL    NOT NULL,
    tip_amount          REAL    NOT NULL
)";

const INSERT_TRIP: &str = "
INSERT INTO trips (
    pickup_datetime, dropoff_datetime, passenger_count, trip_distance,
    store_and_fwd_flag, pu_location_id, do_location_id, fare_amount, tip_amount
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

/// The relational sink: a `trips` table in a SQLite database.
///
/// Insert-only: no upserts, no deletes, no per-row transactions. Timestamps
/// are stored as RFC 3339 UTC text.
pub struct TripStore {
    conn: Connection,
}

impl TripStore {
    /// Open (or create) the sink database at `path` and ensure the `trips`
    /// table exists.
    pub fn open(path: impl AsRef<Path>) -> EtlResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    /// In-memory sink, mainly for tests.
    pub fn open_in_memory() -> EtlResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> EtlResult<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(CREATE_TABLE)?;
        Ok(Self { conn })
    }

    /// Append `records` in chunks of [`BATCH_SIZE`], one transaction per
    /// chunk, reusing a prepared statement across rows.
    ///
    /// An empty slice is a no-op. Returns the number of inserted rows.
    pub fn bulk_insert(&mut self, records: &[TripRecord]) -> EtlResult<usize> {
        for chunk in records.chunks(BATCH_SIZE) {
            let tx = self.conn.transaction()?;
            {
                let mut stmt = tx.prepare_cached(INSERT_TRIP)?;
                for record in chunk {
                    stmt.execute(params![
                        record.pickup_datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
                        record.dropoff_datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
                        record.passenger_count,
                        record.trip_distance,
                        record.store_and_fwd_flag.as_str(),
                        record.pu_location_id,
                        record.do_location_id,
                        record.fare_amount,
                        record.tip_amount,
                    ])?;
                }
            }
            tx.commit()?;
        }
        Ok(records.len())
    }

    /// Number of rows currently in the `trips` table.
    pub fn trip_count(&self) -> EtlResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM trips", [], |row| {
                row.get::<_, i64>(0)
            })?;
        Ok(count as u64)
    }
}
