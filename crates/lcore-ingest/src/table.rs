use std::fs;
use std::path::Path;
use std::sync::Arc;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{IngestError, Result};

/// Text encoding detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// Bytes that were not valid UTF-8, decoded one byte per code point.
    Latin1,
}

/// One input row: an ordered mapping of column name to untyped text cell.
#[derive(Debug, Clone)]
pub struct RawRecord {
    /// Zero-based position of the row in its source (after blank rows are skipped).
    pub index: usize,
    headers: Arc<[String]>,
    cells: Vec<String>,
}

impl RawRecord {
    pub fn new(index: usize, headers: Arc<[String]>, cells: Vec<String>) -> Self {
        Self {
            index,
            headers,
            cells,
        }
    }

    /// Look up a cell by column name (whitespace-normalized, case-insensitive).
    ///
    /// Empty cells are returned as `Some("")`; `None` means the column does not exist.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .position(|header| headers_match(header, column))
            .map(|idx| self.cells.get(idx).map(String::as_str).unwrap_or(""))
    }

    /// Non-empty trimmed cell value.
    pub fn value(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers
            .iter()
            .zip(self.cells.iter())
            .map(|(header, cell)| (header.as_str(), cell.as_str()))
    }
}

/// A loaded source dataset.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Source name (file name) used in logs and errors.
    pub source: String,
    pub headers: Arc<[String]>,
    pub records: Vec<RawRecord>,
    pub encoding: TextEncoding,
}

impl RawTable {
    /// Parse delimited text into a table. The first non-blank row is the header.
    pub fn from_csv_str(source: &str, text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());
        let mut header_row: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|error| IngestError::CsvParse {
                source_name: source.to_string(),
                message: error.to_string(),
            })?;
            let row: Vec<String> = record.iter().map(normalize_cell).collect();
            if row.iter().all(|value| value.is_empty()) {
                continue;
            }
            if header_row.is_none() {
                header_row = Some(row.iter().map(|value| normalize_header(value)).collect());
            } else {
                rows.push(row);
            }
        }
        let Some(headers) = header_row else {
            return Err(IngestError::EmptyCsv {
                source_name: source.to_string(),
            });
        };
        let headers: Arc<[String]> = headers.into();
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut cells)| {
                cells.resize(headers.len(), String::new());
                RawRecord::new(index, Arc::clone(&headers), cells)
            })
            .collect();
        Ok(Self {
            source: source.to_string(),
            headers,
            records,
            encoding: TextEncoding::Utf8,
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.find_column(column).is_some()
    }

    /// Returns the header as it appears in the source for a logical column name.
    pub fn find_column(&self, column: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|header| headers_match(header, column))
            .map(String::as_str)
    }
}

/// Read a delimited file, falling back to Latin-1 when the bytes are not UTF-8.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let (text, encoding) = decode_text(&bytes);
    let source = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("unknown")
        .to_string();
    if encoding == TextEncoding::Latin1 {
        debug!(source = %source, "source is not UTF-8, decoded as latin-1");
    }
    let mut table = RawTable::from_csv_str(&source, &text)?;
    table.encoding = encoding;
    Ok(table)
}

/// Decode raw bytes as UTF-8, or as Latin-1 when they are not valid UTF-8.
pub fn decode_text(bytes: &[u8]) -> (String, TextEncoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), TextEncoding::Utf8),
        Err(_) => (
            bytes.iter().map(|&byte| char::from(byte)).collect(),
            TextEncoding::Latin1,
        ),
    }
}

/// Collapse internal whitespace runs and trim BOM/outer whitespace.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Compare column names after whitespace normalization, ignoring case.
pub fn headers_match(left: &str, right: &str) -> bool {
    normalize_header(left).eq_ignore_ascii_case(&normalize_header(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_header_collapses_whitespace() {
        assert_eq!(
            normalize_header("\u{feff}Average  of chlorophyll in the plant (ACHP) "),
            "Average of chlorophyll in the plant (ACHP)"
        );
    }

    #[test]
    fn headers_match_ignores_case_and_spacing() {
        assert!(headers_match("User_ID", "user_id"));
        assert!(headers_match("Average  of chlorophyll", "average of chlorophyll"));
        assert!(!headers_match("Location", "Locations"));
    }

    #[test]
    fn decode_falls_back_to_latin1() {
        let bytes = b"Temperature (\xb0C)\n21\n";
        let (text, encoding) = decode_text(bytes);
        assert_eq!(encoding, TextEncoding::Latin1);
        assert!(text.starts_with("Temperature (\u{b0}C)"));

        let (_, utf8) = decode_text("pH\n7.1\n".as_bytes());
        assert_eq!(utf8, TextEncoding::Utf8);
    }

    #[test]
    fn short_rows_are_padded_and_blank_rows_skipped() {
        let table = RawTable::from_csv_str("t.csv", "A,B,C\n1,2\n,,\n4,5,6\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[0].get("C"), Some(""));
        assert_eq!(table.records[0].value("C"), None);
        assert_eq!(table.records[1].index, 1);
        assert_eq!(table.records[1].value("c"), Some("6"));
        assert_eq!(table.records[1].get("D"), None);
    }

    #[test]
    fn empty_source_is_an_error() {
        let err = RawTable::from_csv_str("empty.csv", "\n\n").unwrap_err();
        assert!(matches!(err, IngestError::EmptyCsv { .. }));
    }
}
