use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::EtlError;

/// Context about a processing run.
#[derive(Debug, Clone)]
pub struct IngestContext {
    /// The input path being processed.
    pub path: PathBuf,
}

/// Counters reported when a pass completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Physical data rows consumed.
    pub lines: u64,
    /// Canonical (first-seen) records.
    pub canonical: usize,
    /// Duplicate records.
    pub duplicates: usize,
    /// Rejected rows.
    pub errors: usize,
}

/// Observer interface for run progress and outcomes.
///
/// Progress granularity is a reporting concern, not a correctness one: the
/// driver invokes [`IngestObserver::on_progress`] every N rows (configurable)
/// and [`IngestObserver::on_complete`] once at end-of-file. Per-row
/// rejections are data (they land in the error partition) and are not
/// observer events; only a fatal run-level error reaches
/// [`IngestObserver::on_failure`].
pub trait IngestObserver: Send + Sync {
    /// Called every N consumed rows.
    fn on_progress(&self, _ctx: &IngestContext, _lines: u64) {}

    /// Called once when the pass completes.
    fn on_complete(&self, _ctx: &IngestContext, _stats: RunStats) {}

    /// Called when the run fails with a fatal error.
    fn on_failure(&self, _ctx: &IngestContext, _error: &EtlError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn IngestObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl IngestObserver for CompositeObserver {
    fn on_progress(&self, ctx: &IngestContext, lines: u64) {
        for o in &self.observers {
            o.on_progress(ctx, lines);
        }
    }

    fn on_complete(&self, ctx: &IngestContext, stats: RunStats) {
        for o in &self.observers {
            o.on_complete(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestContext, error: &EtlError) {
        for o in &self.observers {
            o.on_failure(ctx, error);
        }
    }
}

/// Logs run events to stderr in the operator-facing console form.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestObserver for StdErrObserver {
    fn on_progress(&self, _ctx: &IngestContext, lines: u64) {
        eprintln!("Processed {lines} lines...");
    }

    fn on_complete(&self, _ctx: &IngestContext, stats: RunStats) {
        eprintln!("Found {} valid records", stats.canonical);
        eprintln!("Found {} duplicate records", stats.duplicates);
        eprintln!("Found {} errors", stats.errors);
    }

    fn on_failure(&self, ctx: &IngestContext, error: &EtlError) {
        eprintln!("[etl][fail] path={} err={}", ctx.path.display(), error);
    }
}

/// Appends run events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl IngestObserver for FileObserver {
    fn on_complete(&self, ctx: &IngestContext, stats: RunStats) {
        self.append_line(&format!(
            "{} ok path={} lines={} canonical={} duplicates={} errors={}",
            unix_ts(),
            ctx.path.display(),
            stats.lines,
            stats.canonical,
            stats.duplicates,
            stats.errors
        ));
    }

    fn on_failure(&self, ctx: &IngestContext, error: &EtlError) {
        self.append_line(&format!(
            "{} fail path={} err={}",
            unix_ts(),
            ctx.path.display(),
            error
        ));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
