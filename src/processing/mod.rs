//! Downstream transformations over ingested records.
//!
//! Processing never feeds back into ingestion: the [`crate::types::IngestionReport`] keeps its
//! source order and ranking works on borrowed views of it.
//!
//! Currently implemented:
//!
//! - [`rank()`]: sort by score (highest first) with podium medals
//!
//! ## Example
//!
//! ```no_run
//! use player_ranking::ingestion::{ingest_from_path, IngestionOptions};
//! use player_ranking::processing::rank;
//!
//! # fn main() -> Result<(), player_ranking::IngestionError> {
//! let report = ingest_from_path("jogadores.csv", &IngestionOptions::default())?;
//! for entry in rank(&report.records) {
//!     println!("{} {} {}", entry.position_label(), entry.record.name(), entry.score_label());
//! }
//! # Ok(())
//! # }
//! ```

pub mod rank;

pub use rank::{rank, Medal, RankedEntry};
