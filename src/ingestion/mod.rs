//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`ingest_from_path`] (from [`unified`]) which:
//!
//! - decodes the file with the configured [`TextEncoding`]
//! - turns valid rows into [`crate::types::Record`]s, in source order
//! - reports each rejected row, and the overall outcome, to an optional [`IngestionObserver`]
//!
//! The row-level pipeline lives in [`csv`].

pub mod csv;
pub mod encoding;
pub mod observability;
pub mod unified;

pub use encoding::TextEncoding;
pub use observability::{
    format_rejection_line, CompositeObserver, ErrorLogObserver, IngestionContext, IngestionObserver,
    IngestionSeverity, IngestionStats, MemoryObserver, NoopObserver, StdErrObserver, DEFAULT_ERROR_LOG,
};
pub use unified::{ingest_from_path, IngestionOptions, IngestionRequest};
