use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

use crate::error::IngestionError;
use crate::types::RowRejection;

use super::encoding::TextEncoding;

/// Default location of the append-only error log.
pub const DEFAULT_ERROR_LOG: &str = "erros.log";

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IngestionSeverity {
    /// Error-level event (operation failed).
    Error,
    /// Critical error (missing file or other I/O failures).
    Critical,
}

/// Context about an ingestion attempt.
#[derive(Debug, Clone)]
pub struct IngestionContext {
    /// The input path used for ingestion.
    pub path: PathBuf,
    /// Encoding used to decode the input.
    pub encoding: TextEncoding,
}

/// Stats reported on successful ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionStats {
    /// Number of valid records.
    pub records: usize,
    /// Number of rejected data rows.
    pub rejected_rows: usize,
}

/// Observer interface for ingestion outcomes.
///
/// [`Self::on_row_rejected`] is the error sink of the pipeline: it is called exactly once per
/// invalid data row and never for valid or blank rows. The other hooks report the outcome of the
/// whole ingestion.
pub trait IngestionObserver: Send + Sync {
    /// Called once for each data row that failed validation.
    fn on_row_rejected(&self, _ctx: &IngestionContext, _rejection: &RowRejection) {}

    /// Called when ingestion completes.
    fn on_success(&self, _ctx: &IngestionContext, _stats: IngestionStats) {}

    /// Called when ingestion fails with a fatal error.
    fn on_failure(&self, _ctx: &IngestionContext, _severity: IngestionSeverity, _error: &IngestionError) {}

    /// Called when a fatal failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl IngestionObserver for NoopObserver {}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn IngestionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
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
    fn on_row_rejected(&self, ctx: &IngestionContext, rejection: &RowRejection) {
        for o in &self.observers {
            o.on_row_rejected(ctx, rejection);
        }
    }

    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Logs ingestion events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl IngestionObserver for StdErrObserver {
    fn on_row_rejected(&self, ctx: &IngestionContext, rejection: &RowRejection) {
        eprintln!(
            "[ingest][rejected] path={} line={} reason={} row='{}'",
            ctx.path.display(),
            rejection.line,
            rejection.reason,
            rejection.raw_content()
        );
    }

    fn on_success(&self, ctx: &IngestionContext, stats: IngestionStats) {
        eprintln!(
            "[ingest][ok] encoding={} path={} records={} rejected={}",
            ctx.encoding,
            ctx.path.display(),
            stats.records,
            stats.rejected_rows
        );
    }

    fn on_failure(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        eprintln!(
            "[ingest][{:?}] encoding={} path={} err={}",
            severity,
            ctx.encoding,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &IngestionContext, severity: IngestionSeverity, error: &IngestionError) {
        eprintln!(
            "[ALERT][ingest][{:?}] encoding={} path={} err={}",
            severity,
            ctx.encoding,
            ctx.path.display(),
            error
        );
    }
}

/// Collects rejections and failures in memory.
#[derive(Debug, Default)]
pub struct MemoryObserver {
    rejections: Mutex<Vec<RowRejection>>,
    failures: Mutex<Vec<IngestionSeverity>>,
}

impl MemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejections seen so far, in the order they were reported.
    pub fn rejections(&self) -> Vec<RowRejection> {
        self.rejections
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// Severities of the fatal failures seen so far.
    pub fn failures(&self) -> Vec<IngestionSeverity> {
        self.failures.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

impl IngestionObserver for MemoryObserver {
    fn on_row_rejected(&self, _ctx: &IngestionContext, rejection: &RowRejection) {
        if let Ok(mut g) = self.rejections.lock() {
            g.push(rejection.clone());
        }
    }

    fn on_failure(&self, _ctx: &IngestionContext, severity: IngestionSeverity, _error: &IngestionError) {
        if let Ok(mut g) = self.failures.lock() {
            g.push(severity);
        }
    }
}

/// Append-only error log on disk.
///
/// Every rejected row opens the file, appends one line and closes it again; no handle is held
/// between rows. Lines look like:
///
/// ```text
/// [2024-05-01 14:03:22] Erro na linha 3: ',3,10.0'. Detalhe: empty name
/// ```
///
/// Writes are best-effort: a failure to open or write the log is reported through `log::warn!`
/// and ingestion carries on.
#[derive(Debug)]
pub struct ErrorLogObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ErrorLogObserver {
    /// Create an error log that appends to `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the log file if it exists.
    pub fn clear(&self) -> io::Result<()> {
        let _guard = self.lock.lock().ok();
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    /// Full log contents, or `None` when nothing has been logged yet.
    pub fn read_to_string(&self) -> io::Result<Option<String>> {
        let _guard = self.lock.lock().ok();
        match fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut f| writeln!(f, "{line}"));
        if let Err(e) = result {
            log::warn!("failed to append to error log {}: {e}", self.path.display());
        }
    }
}

impl Default for ErrorLogObserver {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_LOG)
    }
}

impl IngestionObserver for ErrorLogObserver {
    fn on_row_rejected(&self, _ctx: &IngestionContext, rejection: &RowRejection) {
        self.append_line(&format_rejection_line(&Local::now(), rejection));
    }
}

/// Render one error log line for `rejection`, stamped with `at`.
pub fn format_rejection_line(at: &DateTime<Local>, rejection: &RowRejection) -> String {
    format!(
        "[{}] Erro na linha {}: '{}'. Detalhe: {}",
        at.format("%Y-%m-%d %H:%M:%S"),
        rejection.line,
        rejection.raw_content(),
        rejection.reason
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::format_rejection_line;
    use crate::types::{RejectionReason, RowRejection};

    #[test]
    fn rejection_line_matches_log_format() {
        let at = Local.with_ymd_and_hms(2024, 5, 1, 14, 3, 22).unwrap();
        let rejection = RowRejection {
            line: 3,
            fields: vec!["".to_string(), "3".to_string(), "10.0".to_string()],
            reason: RejectionReason::EmptyName,
        };
        assert_eq!(
            format_rejection_line(&at, &rejection),
            "[2024-05-01 14:03:22] Erro na linha 3: ',3,10.0'. Detalhe: empty name"
        );
    }
}
