//! Core data model for trip ingestion.
//!
//! A [`TripRecord`] is the canonical entity produced by validation: all fields
//! are set exactly once at construction and never mutated. Its business
//! identity is the [`TripKey`] triple, computed on demand via
//! [`TripRecord::identity`].

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Store-and-forward flag, decoded from a single-character Y/N source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreAndForward {
    Yes,
    No,
}

impl StoreAndForward {
    /// Decode a raw flag code ("Y"/"N", case-insensitive).
    ///
    /// Any other value is a hard failure; callers surface it through the
    /// unexpected-error rejection class rather than an ordinary field rule.
    pub fn decode(raw: &str) -> Result<Self, String> {
        match raw.to_ascii_uppercase().as_str() {
            "Y" => Ok(Self::Yes),
            "N" => Ok(Self::No),
            _ => Err(format!("Invalid store_and_fwd_flag value: {raw}")),
        }
    }

    /// Normalized textual form ("Yes"/"No"), as stored in the sink.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

impl std::fmt::Display for StoreAndForward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, zone-normalized trip record.
///
/// Timestamps are absolute UTC instants; the serde field names match the
/// nine-column header of the duplicates review file and the sink table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    #[serde(rename = "PickupDateTime")]
    pub pickup_datetime: DateTime<Utc>,
    #[serde(rename = "DropoffDateTime")]
    pub dropoff_datetime: DateTime<Utc>,
    #[serde(rename = "PassengerCount")]
    pub passenger_count: i16,
    #[serde(rename = "TripDistance")]
    pub trip_distance: f64,
    #[serde(rename = "StoreAndForwardFlag")]
    pub store_and_fwd_flag: StoreAndForward,
    #[serde(rename = "PULocationID")]
    pub pu_location_id: i32,
    #[serde(rename = "DOLocationID")]
    pub do_location_id: i32,
    #[serde(rename = "FareAmount")]
    pub fare_amount: f64,
    #[serde(rename = "TipAmount")]
    pub tip_amount: f64,
}

impl TripRecord {
    /// The business identity of this record.
    ///
    /// Two records with equal keys are duplicates regardless of every other
    /// field value.
    pub fn identity(&self) -> TripKey {
        TripKey {
            pickup_datetime: self.pickup_datetime,
            dropoff_datetime: self.dropoff_datetime,
            passenger_count: self.passenger_count,
        }
    }
}

/// Derived identity key: the (pickup, dropoff, passenger count) triple.
///
/// Computed on demand for dedup membership tests; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripKey {
    pub pickup_datetime: DateTime<Utc>,
    pub dropoff_datetime: DateTime<Utc>,
    pub passenger_count: i16,
}

#[cfg(test)]
mod tests {
    use super::StoreAndForward;

    #[test]
    fn decode_accepts_either_case() {
        assert_eq!(StoreAndForward::decode("Y"), Ok(StoreAndForward::Yes));
        assert_eq!(StoreAndForward::decode("y"), Ok(StoreAndForward::Yes));
        assert_eq!(StoreAndForward::decode("N"), Ok(StoreAndForward::No));
        assert_eq!(StoreAndForward::decode("n"), Ok(StoreAndForward::No));
    }

    #[test]
    fn decode_rejects_other_codes() {
        let err = StoreAndForward::decode("U").unwrap_err();
        assert_eq!(err, "Invalid store_and_fwd_flag value: U");
        assert!(StoreAndForward::decode("").is_err());
        assert!(StoreAndForward::decode("Yes").is_err());
    }

    #[test]
    fn normalized_form_is_yes_no() {
        assert_eq!(StoreAndForward::Yes.to_string(), "Yes");
        assert_eq!(StoreAndForward::No.to_string(), "No");
    }
}
