//! Unified ingestion entrypoint.
//!
//! Most callers should use [`ingest_from_path`], which ingests a player CSV file into an
//! [`IngestionReport`].
//!
//! - [`IngestionOptions::encoding`] selects how the file bytes are decoded.
//! - If an [`IngestionObserver`] is provided, it receives every rejected row plus the
//!   success/failure/alert outcome of the run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::types::IngestionReport;

use super::csv;
use super::encoding::TextEncoding;
use super::observability::{
    IngestionContext, IngestionObserver, IngestionSeverity, IngestionStats, NoopObserver,
};

/// Options controlling ingestion behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct IngestionOptions {
    /// Encoding used to decode the input file.
    pub encoding: TextEncoding,
    /// Optional observer: the error sink for rejected rows, plus outcome reporting.
    pub observer: Option<Arc<dyn IngestionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: IngestionSeverity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("encoding", &self.encoding)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            observer: None,
            alert_at_or_above: IngestionSeverity::Critical,
        }
    }
}

/// Ingest a player CSV file.
///
/// When an observer is configured, this function reports:
///
/// - `on_row_rejected` once per invalid data row
/// - `on_success` on success, with record/rejection counts
/// - `on_failure` on a fatal error, with a computed severity
/// - `on_alert` on a fatal error when the computed severity is >= `options.alert_at_or_above`
///
/// A missing file is reported as [`IngestionError::FileNotFound`] with
/// [`IngestionSeverity::Critical`]; no row is ever reported in that case.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use player_ranking::ingestion::{
///     ingest_from_path, ErrorLogObserver, IngestionOptions, TextEncoding,
/// };
///
/// # fn main() -> Result<(), player_ranking::IngestionError> {
/// let opts = IngestionOptions {
///     encoding: TextEncoding::Utf8,
///     observer: Some(Arc::new(ErrorLogObserver::new("erros.log"))),
///     ..Default::default()
/// };
///
/// let report = ingest_from_path("jogadores.csv", &opts)?;
/// println!("records={} rejected={}", report.record_count(), report.rejected_rows);
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    path: impl AsRef<Path>,
    options: &IngestionOptions,
) -> IngestionResult<IngestionReport> {
    let path = path.as_ref();
    let ctx = IngestionContext {
        path: path.to_path_buf(),
        encoding: options.encoding,
    };

    log::debug!(
        "ingesting {} (encoding={})",
        path.display(),
        options.encoding
    );

    let sink: &dyn IngestionObserver = match options.observer.as_deref() {
        Some(obs) => obs,
        None => &NoopObserver,
    };
    let result = csv::ingest_players_from_path(path, options.encoding, sink);

    match &result {
        Ok(report) => {
            log::info!(
                "ingested {}: {} records, {} rejected rows",
                path.display(),
                report.record_count(),
                report.rejected_rows
            );
            sink.on_success(
                &ctx,
                IngestionStats {
                    records: report.record_count(),
                    rejected_rows: report.rejected_rows,
                },
            );
        }
        Err(e) => {
            let sev = severity_for_error(e);
            log::debug!("ingestion of {} failed ({sev:?}): {e}", path.display());
            sink.on_failure(&ctx, sev, e);
            if sev >= options.alert_at_or_above {
                sink.on_alert(&ctx, sev, e);
            }
        }
    }

    result
}

fn severity_for_error(e: &IngestionError) -> IngestionSeverity {
    match e {
        IngestionError::FileNotFound { .. } | IngestionError::Io(_) => IngestionSeverity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => IngestionSeverity::Critical,
            _ => IngestionSeverity::Error,
        },
        IngestionError::Decode { .. } => IngestionSeverity::Error,
    }
}

/// Convenience helper for callers that want an owned request object.
///
/// Useful when a load is queued before it runs (e.g. behind a file picker).
#[derive(Debug, Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> IngestionResult<IngestionReport> {
        ingest_from_path(&self.path, &self.options)
    }
}
