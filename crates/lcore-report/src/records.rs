//! Per-domain normalized tables.
//!
//! Fixed leading columns (`device_id`, `timestamp`, `domain`,
//! `data_quality`) followed by the union of payload fields in name order.
//! A field whose values are all numbers becomes a float column; anything
//! else is written as text.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use lcore_model::{Domain, NormalizedRecord, PayloadValue};
use polars::prelude::{Column, CsvWriter, DataFrame, NamedFrom, PolarsResult, SerWriter, Series};
use tracing::info;

use crate::common::{create_file, domain_file_name};
use crate::error::{ReportError, Result};

pub const LEADING_COLUMNS: [&str; 4] = ["device_id", "timestamp", "domain", "data_quality"];

pub fn records_frame(records: &[NormalizedRecord]) -> PolarsResult<DataFrame> {
    let fields: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.payload.keys().map(String::as_str))
        .collect();

    let mut columns: Vec<Column> = Vec::with_capacity(LEADING_COLUMNS.len() + fields.len());
    let device_ids: Vec<&str> = records.iter().map(|r| r.device_id.as_str()).collect();
    let timestamps: Vec<i64> = records.iter().map(|r| r.timestamp).collect();
    let domains: Vec<&str> = records.iter().map(|r| r.domain.as_str()).collect();
    let quality: Vec<Option<f64>> = records.iter().map(|r| r.data_quality).collect();
    columns.push(Series::new("device_id".into(), device_ids).into());
    columns.push(Series::new("timestamp".into(), timestamps).into());
    columns.push(Series::new("domain".into(), domains).into());
    columns.push(Series::new("data_quality".into(), quality).into());

    for field in fields {
        let numeric = records
            .iter()
            .filter_map(|record| record.payload.get(field))
            .all(PayloadValue::is_number);
        let series = if numeric {
            let values: Vec<Option<f64>> = records
                .iter()
                .map(|record| record.payload.get(field).and_then(PayloadValue::as_f64))
                .collect();
            Series::new(field.into(), values)
        } else {
            let values: Vec<Option<String>> = records
                .iter()
                .map(|record| record.payload.get(field).map(ToString::to_string))
                .collect();
            Series::new(field.into(), values)
        };
        columns.push(series.into());
    }
    DataFrame::new(columns)
}

/// Write one domain's records to its table in `dir`.
pub fn write_domain_records(
    dir: &Path,
    domain: Domain,
    records: &[NormalizedRecord],
) -> Result<PathBuf> {
    let path = dir.join(domain_file_name(domain));
    let polars_error = |source| ReportError::Polars {
        path: path.clone(),
        source,
    };
    let mut frame = records_frame(records).map_err(polars_error)?;
    let mut file = create_file(&path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .map_err(polars_error)?;
    info!(
        domain = %domain,
        rows = frame.height(),
        columns = frame.width(),
        path = %path.display(),
        "domain table written"
    );
    Ok(path)
}
