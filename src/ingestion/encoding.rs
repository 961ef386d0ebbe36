//! Text decoding for CSV input.

use std::fmt;
use std::str::FromStr;

use crate::error::{IngestionError, IngestionResult};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding used to decode an input file before CSV parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Strict UTF-8. A leading byte-order mark is dropped.
    Utf8,
    /// ISO-8859-1. Each byte maps to the code point with the same value, so decoding never fails.
    ///
    /// This is the default: spreadsheet exports from Western-European locales commonly use it.
    #[default]
    Latin1,
}

impl TextEncoding {
    /// Canonical name of the encoding.
    pub fn label(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Decode raw file contents into a string.
    pub fn decode(&self, bytes: &[u8]) -> IngestionResult<String> {
        match self {
            TextEncoding::Utf8 => {
                let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(body)
                    .map(str::to_owned)
                    .map_err(|e| IngestionError::Decode {
                        encoding: self.label(),
                        message: e.to_string(),
                    })
            }
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TextEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" | "iso8859-1" => Ok(TextEncoding::Latin1),
            other => Err(format!(
                "unsupported encoding '{other}' (expected utf-8 or latin-1)"
            )),
        }
    }
}
