//! Core data model for player ingestion.
//!
//! A [`Record`] is only ever produced by [`crate::ingestion::csv::validate_row`]; rows that fail
//! validation become a [`RowRejection`] instead.

use std::fmt;

use serde::Serialize;

/// A validated player entry.
///
/// Fields are private and there is no mutating API: once built, a record never changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    name: String,
    level: i64,
    score: f64,
}

impl Record {
    pub(crate) fn new(name: String, level: i64, score: f64) -> Self {
        Self { name, level, score }
    }

    /// Player name, trimmed and non-empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> i64 {
        self.level
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (level {}, score {:.2})",
            self.name, self.level, self.score
        )
    }
}

/// Why a data row was rejected.
///
/// Variants are listed in the order the checks run; the first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectionReason {
    /// The row did not have exactly three fields.
    WrongColumnCount,
    /// The name field was empty after trimming.
    EmptyName,
    /// The level field is not an integer.
    InvalidLevel,
    /// The score field is not a number.
    InvalidScore,
}

impl RejectionReason {
    /// Short machine-readable reason, as written to the error log.
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::WrongColumnCount => "wrong column count",
            RejectionReason::EmptyName => "empty name",
            RejectionReason::InvalidLevel => "invalid level",
            RejectionReason::InvalidScore => "invalid score",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A data row that failed validation, with enough context to log it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    /// 1-based source line the row starts on (the header is line 1).
    pub line: u64,
    /// Raw field values, untrimmed.
    pub fields: Vec<String>,
    pub reason: RejectionReason,
}

impl RowRejection {
    /// Raw row content with fields rejoined by a comma.
    pub fn raw_content(&self) -> String {
        self.fields.join(",")
    }
}

/// Result of ingesting one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestionReport {
    /// Valid records in source-row order. Never sorted by the pipeline.
    pub records: Vec<Record>,
    /// Number of data rows that failed validation (blank lines are not counted).
    pub rejected_rows: usize,
}

impl IngestionReport {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// `true` when no valid record was found.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
