use thiserror::Error;

/// Convenience result type for pipeline operations.
pub type EtlResult<T> = Result<T, EtlError>;

/// Fatal, run-level error type.
///
/// Anything that surfaces as an `EtlError` aborts the whole run: an unreadable
/// input file, a broken sink connection, an unknown source time zone. Per-row
/// problems never become an `EtlError`; they are recorded as [`RowError`]s and
/// the pass continues.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader/writer error outside the per-row recovery path.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Sink database error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The configured source time zone is not a known IANA zone name.
    #[error("unknown time zone '{name}'")]
    UnknownTimeZone { name: String },
}

/// Recoverable, per-row rejection reason.
///
/// The `Display` strings are written verbatim (prefixed with the line number)
/// to the error output, so they are part of the external contract.
///
/// Rules are evaluated in a fixed order and the first failure wins, so every
/// rejected row carries exactly one reason. [`RowError::Unexpected`] is a
/// distinct class from the field rules: it covers flag-decode failures and
/// reader-level problems with a single row (e.g. broken quoting), which the
/// ordinary rules never see.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// Fewer than the required fourteen fields.
    #[error("Not enough fields")]
    NotEnoughFields,

    #[error("Invalid pickup datetime format")]
    InvalidPickupDateTime,

    #[error("Invalid dropoff datetime format")]
    InvalidDropoffDateTime,

    #[error("Dropoff time is before or equal to pickup time")]
    DropoffNotAfterPickup,

    #[error("Trip duration is more than 24 hours")]
    DurationOver24Hours,

    /// Not a positive small integer.
    #[error("Invalid passenger count")]
    InvalidPassengerCount,

    /// Not a finite, non-negative number.
    #[error("Invalid trip distance")]
    InvalidTripDistance,

    #[error("Invalid PULocationID")]
    InvalidPuLocationId,

    #[error("Invalid DOLocationID")]
    InvalidDoLocationId,

    /// Not a finite, non-negative number.
    #[error("Invalid fare amount")]
    InvalidFareAmount,

    /// Not a finite, non-negative number.
    #[error("Invalid tip amount")]
    InvalidTipAmount,

    /// Unexpected-error class: store-and-forward flag decode failures and
    /// per-row reader errors. Routed to the error output like any other
    /// rejection; never aborts the run.
    #[error("Unexpected error - {0}")]
    Unexpected(String),
}
