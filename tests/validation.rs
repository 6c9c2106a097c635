use chrono::{TimeZone, Utc};
use chrono_tz::America::New_York;
use trip_etl::RowError;
use trip_etl::ingestion::validate::parse_trip;
use trip_etl::types::StoreAndForward;

/// A well-formed fourteen-field row in the source layout, as owned strings so
/// individual positions can be overridden per test.
fn base_row() -> Vec<String> {
    [
        "1",                      // VendorID
        "07/25/2020 02:00:00 PM", // pickup
        "07/25/2020 02:30:00 PM", // dropoff
        "2",                      // passenger_count
        "3.5",                    // trip_distance
        "1",                      // RatecodeID
        "N",                      // store_and_fwd_flag
        "138",                    // PULocationID
        "236",                    // DOLocationID
        "1",                      // payment_type
        "14.5",                   // fare_amount
        "0.5",                    // extra
        "0.5",                    // mta_tax
        "2.0",                    // tip_amount
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn row_with(overrides: &[(usize, &str)]) -> csv::StringRecord {
    let mut fields = base_row();
    for &(idx, value) in overrides {
        fields[idx] = value.to_owned();
    }
    csv::StringRecord::from(fields)
}

#[test]
fn valid_row_produces_normalized_record() {
    let record = parse_trip(&row_with(&[]), New_York).unwrap();

    // July is daylight-saving time in New York (UTC-4).
    assert_eq!(
        record.pickup_datetime,
        Utc.with_ymd_and_hms(2020, 7, 25, 18, 0, 0).unwrap()
    );
    assert_eq!(
        record.dropoff_datetime,
        Utc.with_ymd_and_hms(2020, 7, 25, 18, 30, 0).unwrap()
    );
    assert_eq!(record.passenger_count, 2);
    assert_eq!(record.trip_distance, 3.5);
    assert_eq!(record.store_and_fwd_flag, StoreAndForward::No);
    assert_eq!(record.pu_location_id, 138);
    assert_eq!(record.do_location_id, 236);
    assert_eq!(record.fare_amount, 14.5);
    assert_eq!(record.tip_amount, 2.0);
}

#[test]
fn identity_triple_is_the_normalized_pickup_dropoff_passengers() {
    let record = parse_trip(&row_with(&[]), New_York).unwrap();
    let key = record.identity();
    assert_eq!(key.pickup_datetime, record.pickup_datetime);
    assert_eq!(key.dropoff_datetime, record.dropoff_datetime);
    assert_eq!(key.passenger_count, record.passenger_count);
}

#[test]
fn standard_time_offset_applies_in_winter() {
    let record = parse_trip(
        &row_with(&[
            (1, "01/15/2020 02:00:00 PM"),
            (2, "01/15/2020 02:30:00 PM"),
        ]),
        New_York,
    )
    .unwrap();
    // January is standard time in New York (UTC-5).
    assert_eq!(
        record.pickup_datetime,
        Utc.with_ymd_and_hms(2020, 1, 15, 19, 0, 0).unwrap()
    );
}

#[test]
fn unparseable_pickup_is_rejected() {
    let err = parse_trip(&row_with(&[(1, "2020-07-25 14:00:00")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidPickupDateTime);
}

#[test]
fn unparseable_dropoff_is_rejected() {
    let err = parse_trip(&row_with(&[(2, "not a date")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidDropoffDateTime);
}

#[test]
fn first_violated_rule_wins() {
    // Both an unparseable pickup and a negative fare: the pickup rule comes
    // first in the sequence, so its reason must be the one reported.
    let err = parse_trip(&row_with(&[(1, "garbage"), (10, "-5.0")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidPickupDateTime);
}

#[test]
fn dropoff_equal_to_pickup_is_rejected() {
    let err = parse_trip(&row_with(&[(2, "07/25/2020 02:00:00 PM")]), New_York).unwrap_err();
    assert_eq!(err, RowError::DropoffNotAfterPickup);
}

#[test]
fn dropoff_before_pickup_is_rejected() {
    let err = parse_trip(&row_with(&[(2, "07/25/2020 01:00:00 PM")]), New_York).unwrap_err();
    assert_eq!(err, RowError::DropoffNotAfterPickup);
}

#[test]
fn duration_of_exactly_24_hours_is_accepted() {
    let record = parse_trip(&row_with(&[(2, "07/26/2020 02:00:00 PM")]), New_York).unwrap();
    assert_eq!(
        record.dropoff_datetime - record.pickup_datetime,
        chrono::TimeDelta::hours(24)
    );
}

#[test]
fn duration_over_24_hours_is_rejected() {
    let err = parse_trip(&row_with(&[(2, "07/26/2020 02:00:01 PM")]), New_York).unwrap_err();
    assert_eq!(err, RowError::DurationOver24Hours);
}

#[test]
fn passenger_count_must_be_a_positive_integer() {
    for bad in ["0", "-1", "abc", "1.5", ""] {
        let err = parse_trip(&row_with(&[(3, bad)]), New_York).unwrap_err();
        assert_eq!(err, RowError::InvalidPassengerCount, "input {bad:?}");
    }
}

#[test]
fn trip_distance_must_be_finite_and_non_negative() {
    for bad in ["-0.1", "abc", "NaN", "inf", ""] {
        let err = parse_trip(&row_with(&[(4, bad)]), New_York).unwrap_err();
        assert_eq!(err, RowError::InvalidTripDistance, "input {bad:?}");
    }
    let record = parse_trip(&row_with(&[(4, "0")]), New_York).unwrap();
    assert_eq!(record.trip_distance, 0.0);
}

#[test]
fn location_ids_must_be_integers() {
    let err = parse_trip(&row_with(&[(7, "12.5")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidPuLocationId);
    let err = parse_trip(&row_with(&[(8, "x")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidDoLocationId);
}

#[test]
fn amounts_must_be_finite_and_non_negative() {
    let err = parse_trip(&row_with(&[(10, "-0.01")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidFareAmount);
    let err = parse_trip(&row_with(&[(13, "NaN")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidTipAmount);
}

#[test]
fn flag_codes_accept_either_case() {
    for (code, expected) in [
        ("Y", StoreAndForward::Yes),
        ("y", StoreAndForward::Yes),
        ("N", StoreAndForward::No),
        ("n", StoreAndForward::No),
    ] {
        let record = parse_trip(&row_with(&[(6, code)]), New_York).unwrap();
        assert_eq!(record.store_and_fwd_flag, expected, "code {code:?}");
    }
}

#[test]
fn unknown_flag_code_is_the_unexpected_class() {
    for bad in ["U", ""] {
        let err = parse_trip(&row_with(&[(6, bad)]), New_York).unwrap_err();
        assert_eq!(
            err,
            RowError::Unexpected(format!("Invalid store_and_fwd_flag value: {bad}")),
            "input {bad:?}"
        );
    }
}

#[test]
fn flag_is_checked_after_the_ordinary_field_rules() {
    // Bad flag AND bad tip: the tip rule runs first, so the flag failure is
    // never reached.
    let err = parse_trip(&row_with(&[(6, "U"), (13, "-1")]), New_York).unwrap_err();
    assert_eq!(err, RowError::InvalidTipAmount);
}

#[test]
fn nonexistent_local_time_is_the_unexpected_class() {
    // 2:30 AM on 2020-03-08 was skipped by the spring-forward transition in
    // New York.
    let err = parse_trip(
        &row_with(&[
            (1, "03/08/2020 02:30:00 AM"),
            (2, "03/08/2020 03:30:00 AM"),
        ]),
        New_York,
    )
    .unwrap_err();
    assert!(matches!(err, RowError::Unexpected(_)), "got {err:?}");
}

#[test]
fn ambiguous_local_time_resolves_to_standard_time() {
    // 1:30 AM on 2020-11-01 happened twice in New York; the standard-time
    // (EST, UTC-5) occurrence wins.
    let record = parse_trip(
        &row_with(&[
            (1, "11/01/2020 01:30:00 AM"),
            (2, "11/01/2020 02:30:00 AM"),
        ]),
        New_York,
    )
    .unwrap();
    assert_eq!(
        record.pickup_datetime,
        Utc.with_ymd_and_hms(2020, 11, 1, 6, 30, 0).unwrap()
    );
}
