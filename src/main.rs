//! `trip-etl` binary: wire configuration, run the pass, write the outputs.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;

use trip_etl::error::{EtlError, EtlResult};
use trip_etl::ingestion::{
    IngestObserver, IngestOptions, StdErrObserver, partition_csv_from_path,
};
use trip_etl::sink::{TripStore, write_duplicates, write_errors};

#[derive(Debug, Parser)]
#[command(name = "trip-etl", version, about = "Validate, deduplicate, and load trip records")]
struct Cli {
    /// Input CSV file of raw trip records.
    input: PathBuf,

    /// SQLite database receiving the canonical records.
    #[arg(long, default_value = "trips.db")]
    database: PathBuf,

    /// Review file for duplicate records.
    #[arg(long, default_value = "duplicates.csv")]
    duplicates: PathBuf,

    /// Review file for rejected rows.
    #[arg(long, default_value = "error_records.csv")]
    errors: PathBuf,

    /// IANA name of the source time zone of the file's timestamps.
    #[arg(long, default_value = "America/New_York")]
    timezone: String,

    /// Print a progress line every N rows (0 disables).
    #[arg(long, default_value_t = 1_000)]
    progress_every: u64,

    /// Validate rows on a thread pool (output is identical to serial mode).
    #[arg(long)]
    parallel: bool,

    /// Suppress progress and summary output.
    #[arg(long)]
    quiet: bool,
}

fn run(cli: &Cli) -> EtlResult<()> {
    let timezone = chrono_tz::Tz::from_str(&cli.timezone).map_err(|_| EtlError::UnknownTimeZone {
        name: cli.timezone.clone(),
    })?;

    let options = IngestOptions {
        timezone,
        progress_every: cli.progress_every,
        parallel: cli.parallel,
        observer: (!cli.quiet).then(|| Arc::new(StdErrObserver) as Arc<dyn IngestObserver>),
    };

    if !cli.quiet {
        println!("Starting to read CSV file...");
    }
    let parts = partition_csv_from_path(&cli.input, &options)?;

    write_errors(&cli.errors, parts.errors())?;
    if !cli.quiet && !parts.errors().is_empty() {
        println!("Errors written to {}", cli.errors.display());
    }

    write_duplicates(&cli.duplicates, parts.duplicates())?;
    if !cli.quiet && !parts.duplicates().is_empty() {
        println!("Duplicates written to {}", cli.duplicates.display());
    }

    if !parts.canonical().is_empty() {
        let mut store = TripStore::open(&cli.database)?;
        store.bulk_insert(parts.canonical())?;
        if !cli.quiet {
            println!("Records inserted into database");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => {
            if !cli.quiet {
                println!("Data processing completed successfully!");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error processing file: {e}");
            ExitCode::FAILURE
        }
    }
}
