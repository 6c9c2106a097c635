//! Field-level validation of one raw row into a [`TripRecord`].
//!
//! [`parse_trip`] is a pure function: it either constructs a fully normalized
//! record or returns the single [`RowError`] for the first rule the row
//! violates. It never touches an output collection; routing the outcome is
//! the aggregator's job.
//!
//! Rules, in evaluation order:
//!
//! 1. pickup timestamp parses in the fixed source format
//! 2. dropoff timestamp parses in the fixed source format
//! 3. dropoff is strictly after pickup
//! 4. duration is at most 24 hours
//! 5. passenger count is a positive small integer
//! 6. trip distance is a finite, non-negative number
//! 7. pickup location id is an integer
//! 8. dropoff location id is an integer
//! 9. fare amount is a finite, non-negative number
//! 10. tip amount is a finite, non-negative number
//!
//! Zone conversion and flag decoding run last; their failures belong to the
//! unexpected-error class ([`RowError::Unexpected`]) rather than the ordinary
//! field rules. The caller is responsible for the minimum-field-count gate
//! ([`MIN_FIELDS`]) before invoking the validator.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::RowError;
use crate::types::{StoreAndForward, TripRecord};

/// Fixed textual timestamp format of the source file (`MM/DD/YYYY hh:mm:ss AM/PM`).
pub const DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Minimum number of positional fields a data row must carry.
pub const MIN_FIELDS: usize = 14;

// 0-based positions in the fourteen-column source layout.
const COL_PICKUP: usize = 1;
const COL_DROPOFF: usize = 2;
const COL_PASSENGERS: usize = 3;
const COL_DISTANCE: usize = 4;
const COL_FLAG: usize = 6;
const COL_PU_LOCATION: usize = 7;
const COL_DO_LOCATION: usize = 8;
const COL_FARE: usize = 10;
const COL_TIP: usize = 13;

/// Validate one raw row and construct a [`TripRecord`].
///
/// Timestamps are parsed as wall-clock times in the source zone `tz`; the
/// ordering and duration rules compare those wall-clock values (matching the
/// source file's own frame of reference), and the surviving record stores
/// both instants converted to UTC.
pub fn parse_trip(record: &csv::StringRecord, tz: Tz) -> Result<TripRecord, RowError> {
    let pickup =
        parse_datetime(field(record, COL_PICKUP)).ok_or(RowError::InvalidPickupDateTime)?;
    let dropoff =
        parse_datetime(field(record, COL_DROPOFF)).ok_or(RowError::InvalidDropoffDateTime)?;

    if dropoff <= pickup {
        return Err(RowError::DropoffNotAfterPickup);
    }
    if dropoff - pickup > TimeDelta::hours(24) {
        return Err(RowError::DurationOver24Hours);
    }

    let passenger_count = parse_passenger_count(field(record, COL_PASSENGERS))
        .ok_or(RowError::InvalidPassengerCount)?;
    let trip_distance =
        parse_non_negative(field(record, COL_DISTANCE)).ok_or(RowError::InvalidTripDistance)?;
    let pu_location_id = parse_location_id(field(record, COL_PU_LOCATION))
        .ok_or(RowError::InvalidPuLocationId)?;
    let do_location_id = parse_location_id(field(record, COL_DO_LOCATION))
        .ok_or(RowError::InvalidDoLocationId)?;
    let fare_amount =
        parse_non_negative(field(record, COL_FARE)).ok_or(RowError::InvalidFareAmount)?;
    let tip_amount =
        parse_non_negative(field(record, COL_TIP)).ok_or(RowError::InvalidTipAmount)?;

    // Conversion and flag decoding run after every field rule has passed;
    // their failures are the unexpected class, not ordinary rejections.
    let pickup_datetime = to_utc(pickup, tz)?;
    let dropoff_datetime = to_utc(dropoff, tz)?;
    let store_and_fwd_flag =
        StoreAndForward::decode(field(record, COL_FLAG)).map_err(RowError::Unexpected)?;

    Ok(TripRecord {
        pickup_datetime,
        dropoff_datetime,
        passenger_count,
        trip_distance,
        store_and_fwd_flag,
        pu_location_id,
        do_location_id,
        fare_amount,
        tip_amount,
    })
}

fn field<'a>(record: &'a csv::StringRecord, idx: usize) -> &'a str {
    record.get(idx).unwrap_or("")
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT).ok()
}

fn parse_passenger_count(raw: &str) -> Option<i16> {
    raw.trim().parse::<i16>().ok().filter(|n| *n > 0)
}

fn parse_location_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

fn parse_non_negative(raw: &str) -> Option<f64> {
    // `f64` parsing accepts "NaN" and "inf"; neither satisfies a
    // non-negative amount.
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Resolve a wall-clock time in `tz` to a UTC instant.
///
/// A time repeated by a fall-back transition resolves to the standard-time
/// (later) instant. A time skipped by a spring-forward gap never happened,
/// which makes the row an unexpected-class rejection.
fn to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, RowError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(_, standard) => Ok(standard.with_timezone(&Utc)),
        LocalResult::None => Err(RowError::Unexpected(format!(
            "local time {local} does not exist in time zone {tz}"
        ))),
    }
}
