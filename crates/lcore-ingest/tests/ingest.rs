//! Tests for loading source files from disk.

use std::fs;

use lcore_ingest::{TextEncoding, parse_timestamp, read_raw_table, resolve_source_file};
use tempfile::TempDir;

#[test]
fn reads_table_with_quoted_fields() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("retail.csv");
    fs::write(
        &path,
        "ORDERNUMBER,CUSTOMERNAME,ORDERDATE\n10107,\"Land of Toys, Inc.\",2/24/2003 0:00\n",
    )
    .expect("write csv");

    let table = read_raw_table(&path).expect("read table");
    assert_eq!(table.source, "retail.csv");
    assert_eq!(table.encoding, TextEncoding::Utf8);
    assert_eq!(table.len(), 1);
    let row = &table.records[0];
    assert_eq!(row.value("CustomerName"), Some("Land of Toys, Inc."));
    assert_eq!(
        row.value("ORDERDATE").and_then(parse_timestamp),
        Some(1_046_044_800)
    );
}

#[test]
fn reads_latin1_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("sales.csv");
    fs::write(&path, b"CITY,SALES\nMontr\xe9al,10\n").expect("write csv");

    let table = read_raw_table(&path).expect("read table");
    assert_eq!(table.encoding, TextEncoding::Latin1);
    assert_eq!(table.records[0].value("CITY"), Some("Montr\u{e9}al"));
}

#[test]
fn header_only_file_has_no_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("network.csv");
    fs::write(&path, "Timestamp,Signal_Strength\n").expect("write csv");

    let table = read_raw_table(&path).expect("read table");
    assert!(table.is_empty());
    assert!(table.has_column("signal_strength"));
}

#[test]
fn missing_file_is_reported() {
    let dir = TempDir::new().expect("temp dir");
    assert!(read_raw_table(&dir.path().join("absent.csv")).is_err());
    assert!(resolve_source_file(dir.path(), "absent.csv").is_err());
}
