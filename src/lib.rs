//! `player-ranking` reads CSV files of player records (name, level, score), validates every row,
//! logs the malformed ones, and ranks the valid players by score.
//!
//! The primary entrypoint is [`ingestion::ingest_from_path`]. It never stops at a bad row: each
//! rejected row is reported to an [`ingestion::IngestionObserver`] (typically the on-disk
//! [`ingestion::ErrorLogObserver`]) and counted in the returned [`types::IngestionReport`].
//!
//! ## Input format
//!
//! - The first row is a header and is always skipped.
//! - Each data row has exactly three fields: `name,level,score`.
//! - Blank lines are ignored.
//! - Files are decoded as Latin-1 by default; UTF-8 is available via
//!   [`ingestion::TextEncoding::Utf8`].
//!
//! Row checks run in order and the first failure wins:
//!
//! | check | reason logged |
//! |---|---|
//! | exactly 3 fields | `wrong column count` |
//! | trimmed name is non-empty | `empty name` |
//! | level is an integer | `invalid level` |
//! | score is a number | `invalid score` |
//!
//! ## Quick example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use player_ranking::ingestion::{ingest_from_path, ErrorLogObserver, IngestionOptions};
//! use player_ranking::processing::rank;
//!
//! # fn main() -> Result<(), player_ranking::IngestionError> {
//! let opts = IngestionOptions {
//!     observer: Some(Arc::new(ErrorLogObserver::new("erros.log"))),
//!     ..Default::default()
//! };
//! let report = ingest_from_path("jogadores.csv", &opts)?;
//! println!("loaded={} rejected={}", report.record_count(), report.rejected_rows);
//!
//! for entry in rank(&report.records) {
//!     println!("{} {} {}", entry.position_label(), entry.record.name(), entry.score_label());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: CSV pipeline, text encodings, observers / error log
//! - [`types`]: records, rejections and ingestion reports
//! - [`processing`]: ranking by score
//! - [`history`]: caller-owned history of loaded rankings
//! - [`session`]: load controller for front ends
//! - [`error`]: fatal error type

pub mod error;
pub mod history;
pub mod ingestion;
pub mod processing;
pub mod session;
pub mod types;

pub use error::{IngestionError, IngestionResult};
