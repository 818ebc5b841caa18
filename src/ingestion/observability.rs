//! Observer hooks for ingestion outcomes.
//!
//! [`super::ingest_upload`] reports every attempt to [`IngestionOptions::observer`]:
//! `on_success` with row/column counts, `on_failure` with the error's [`IngestionSeverity`], and
//! `on_alert` when that severity reaches [`IngestionOptions::alert_at_or_above`].
//!
//! [`IngestionOptions::observer`]: super::IngestionOptions::observer
//! [`IngestionOptions::alert_at_or_above`]: super::IngestionOptions::alert_at_or_above

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::IngestionError;

use super::unified::IngestionFormat;

/// How serious a failed upload is, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// The user can fix it by choosing another file (unsupported extension, no file supplied).
    Warning,
    /// The file was accepted but its contents could not be parsed.
    Error,
    /// The file could not be read at all.
    Critical,
}

impl IngestionSeverity {
    /// Lower-case name used in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for IngestionSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The upload an event is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionContext {
    /// Upload file name (or path for path-based ingestion).
    pub source: String,
    /// Detected or forced format; `None` when the extension is not supported.
    pub format: Option<IngestionFormat>,
}

impl fmt::Display for IngestionContext {
    /// `sales.csv [csv]`, or `notes.txt [unknown]` when no format applies.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format = self.format.map_or("unknown", IngestionFormat::label);
        write!(f, "{} [{format}]", self.source)
    }
}

/// Shape of a successfully ingested table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    pub rows: usize,
    pub columns: usize,
}

/// Receives ingestion outcomes. Every callback has a no-op default.
pub trait IngestionObserver: Send + Sync {
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called after `on_failure` when the severity meets the alert threshold.
    ///
    /// Defaults to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every callback to each inner observer, in order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn IngestionObserver>>) -> Self {
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

impl IngestionObserver for CompositeObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.observers.iter().for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.observers.iter().for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// One line of text per event, shared by [`StdErrObserver`] and [`FileObserver`].
enum Event<'a> {
    Loaded(IngestionStats),
    Failed(IngestionSeverity, &'a IngestionError),
    Alert(IngestionSeverity, &'a IngestionError),
}

impl Event<'_> {
    fn line(&self, ctx: &IngestionContext) -> String {
        match self {
            Self::Loaded(stats) => format!("ok {ctx} rows={} columns={}", stats.rows, stats.columns),
            Self::Failed(severity, error) => format!("fail[{severity}] {ctx}: {error}"),
            Self::Alert(severity, error) => format!("ALERT[{severity}] {ctx}: {error}"),
        }
    }
}

/// Prints events to stderr, prefixed with `[upload]`.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl StdErrObserver {
    fn emit(&self, ctx: &IngestionContext, event: Event<'_>) {
        eprintln!("[upload] {}", event.line(ctx));
    }
}

impl IngestionObserver for StdErrObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.emit(ctx, Event::Loaded(stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(ctx, Event::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(ctx, Event::Alert(severity, error));
    }
}

/// Forwards ingestion events to the [`log`] facade under the `upload_insights::ingest` target.
///
/// Successes log at `info`, failures at `warn` (or `error` for [`IngestionSeverity::Critical`]),
/// alerts at `error`.
#[derive(Debug, Default)]
pub struct LogObserver;

const LOG_TARGET: &str = "upload_insights::ingest";

impl IngestionObserver for LogObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        log::info!(target: LOG_TARGET, "{}", Event::Loaded(stats).line(ctx));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        let level = match severity {
            IngestionSeverity::Critical => log::Level::Error,
            IngestionSeverity::Error | IngestionSeverity::Warning => log::Level::Warn,
        };
        log::log!(target: LOG_TARGET, level, "{}", Event::Failed(severity, error).line(ctx));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        log::error!(target: LOG_TARGET, "{}", Event::Alert(severity, error).line(ctx));
    }
}

/// Appends one timestamped line per event to a log file.
///
/// Writes are best-effort: a log file that cannot be opened or written is skipped silently.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn emit(&self, ctx: &IngestionContext, event: Event<'_>) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {}", unix_ts(), event.line(ctx));
        }
    }
}

impl IngestionObserver for FileObserver {
    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        self.emit(ctx, Event::Loaded(stats));
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(ctx, Event::Failed(severity, error));
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.emit(ctx, Event::Alert(severity, error));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
