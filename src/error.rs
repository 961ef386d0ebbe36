use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Fatal, pipeline-level error returned by ingestion functions.
///
/// Row-level validation failures are never reported through this type: they are routed to the
/// configured [`crate::ingestion::IngestionObserver`] and counted in the
/// [`crate::types::IngestionReport`].
#[derive(Debug, Error)]
pub enum IngestionError {
    /// The input path does not refer to an existing file. Nothing was opened or logged.
    #[error("file not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    /// Underlying I/O error (e.g. permission denied while reading).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not valid in the selected text encoding.
    #[error("cannot decode input as {encoding}: {message}")]
    Decode {
        encoding: &'static str,
        message: String,
    },

    /// CSV reader error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
