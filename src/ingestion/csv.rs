//! CSV ingestion of player rows.

use std::fs;
use std::path::Path;

use crate::error::{IngestionError, IngestionResult};
use crate::types::{IngestionReport, Record, RejectionReason, RowRejection};

use super::encoding::TextEncoding;
use super::observability::{IngestionContext, IngestionObserver};

/// Ingest a player CSV file.
///
/// Rules:
///
/// - The path must be an existing file; otherwise [`IngestionError::FileNotFound`] is returned
///   before anything is opened and the observer is not called.
/// - The whole file is read in one pass and decoded with `encoding`.
/// - See [`ingest_players_from_str`] for the row rules.
pub fn ingest_players_from_path(
    path: impl AsRef<Path>,
    encoding: TextEncoding,
    observer: &dyn IngestionObserver,
) -> IngestionResult<IngestionReport> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(IngestionError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path)?;
    let text = encoding.decode(&bytes)?;
    let ctx = IngestionContext {
        path: path.to_path_buf(),
        encoding,
    };
    ingest_players_from_str(&text, &ctx, observer)
}

/// Ingest player rows from decoded CSV text.
///
/// Rules:
///
/// - Physical line 1 is the header and is skipped without validation, even when it is blank.
/// - Blank lines are skipped silently but still count towards line numbers.
/// - Every other row goes through [`validate_row`]. Valid rows become [`Record`]s in source
///   order; invalid rows are reported to `observer` once each, with the 1-based source line the
///   row starts on.
pub fn ingest_players_from_str(
    text: &str,
    ctx: &IngestionContext,
    observer: &dyn IngestionObserver,
) -> IngestionResult<IngestionReport> {
    // Ragged rows must reach the validator instead of failing the reader.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut lines = LineTracker::new(text.as_bytes());
    let mut rows = rdr.records();
    let mut report = IngestionReport::default();

    // The reader drops leading blank lines, so a blank line 1 has already been consumed as the
    // header and the next row is data.
    let blank_header = matches!(text.as_bytes().first(), Some(b'\r' | b'\n'));
    if !blank_header {
        match rows.next() {
            None => return Ok(report),
            Some(header) => {
                header?;
            }
        }
    }

    for result in rows {
        let row = result?;
        if row.is_empty() {
            continue;
        }

        let fields: Vec<&str> = row.iter().collect();
        match validate_row(&fields) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                let offset = row.position().map(|p| p.byte()).unwrap_or_default();
                let rejection = RowRejection {
                    line: lines.line_at(offset as usize),
                    fields: fields.iter().map(|f| (*f).to_owned()).collect(),
                    reason,
                };
                observer.on_row_rejected(ctx, &rejection);
                report.rejected_rows += 1;
            }
        }
    }

    Ok(report)
}

/// Maps byte offsets of the input to 1-based line numbers.
///
/// The reader reports the offset where it started looking for a record, which can sit before
/// skipped blank lines; line terminators at that offset are stepped over so the line returned
/// is the one the row's content starts on. Offsets must be queried in increasing order.
struct LineTracker<'a> {
    text: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineTracker<'a> {
    fn new(text: &'a [u8]) -> Self {
        Self {
            text,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, from: usize) -> u64 {
        let mut start = from.min(self.text.len());
        while matches!(self.text.get(start), Some(b'\r' | b'\n')) {
            start += 1;
        }

        while self.offset < start {
            match self.text[self.offset] {
                b'\n' => self.line += 1,
                b'\r' if self.text.get(self.offset + 1) != Some(&b'\n') => self.line += 1,
                _ => {}
            }
            self.offset += 1;
        }
        self.line
    }
}

/// Validate one data row.
///
/// Checks run in this order and the first failure wins:
///
/// 1. exactly three fields
/// 2. non-empty name after trimming
/// 3. level is an integer (a decimal point is rejected, never truncated)
/// 4. score is a floating-point number
///
/// Surrounding whitespace is ignored for all three fields.
pub fn validate_row(fields: &[&str]) -> Result<Record, RejectionReason> {
    let [name, level, score] = fields else {
        return Err(RejectionReason::WrongColumnCount);
    };

    let name = name.trim();
    if name.is_empty() {
        return Err(RejectionReason::EmptyName);
    }

    let level = level
        .trim()
        .parse::<i64>()
        .map_err(|_| RejectionReason::InvalidLevel)?;
    let score = score
        .trim()
        .parse::<f64>()
        .map_err(|_| RejectionReason::InvalidScore)?;

    Ok(Record::new(name.to_owned(), level, score))
}
