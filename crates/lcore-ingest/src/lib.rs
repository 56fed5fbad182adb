//! Raw dataset ingestion.
//!
//! Loads delimited text files into [`RawTable`]s of untyped [`RawRecord`]s and
//! provides the scalar parsing helpers (numbers, timestamps) that domain
//! transformers build on.

pub mod discovery;
pub mod error;
pub mod parse;
pub mod table;

pub use discovery::{list_csv_files, resolve_source_file};
pub use error::{IngestError, Result};
pub use parse::{parse_f64, parse_i64, parse_timestamp, round_to};
pub use table::{
    RawRecord, RawTable, TextEncoding, decode_text, headers_match, normalize_header,
    read_raw_table,
};
