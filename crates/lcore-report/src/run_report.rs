use std::io::{BufWriter, Write};
use std::path::Path;

use lcore_model::RunReport;

use crate::common::create_file;
use crate::error::{ReportError, Result};

/// Pretty-printed JSON run report.
pub fn write_run_report(path: &Path, report: &RunReport) -> Result<()> {
    let mut writer = BufWriter::new(create_file(path)?);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| ReportError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })
}
