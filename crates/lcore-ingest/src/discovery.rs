//! Source file discovery in a data directory.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all CSV files in a directory.
///
/// Returns files sorted by filename.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if is_csv {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Finds a configured source file in the data directory.
///
/// An exact name match wins; otherwise the file names are compared
/// case-insensitively so `Weather.csv` satisfies `weather.csv`.
pub fn resolve_source_file(dir: &Path, file_name: &str) -> Result<PathBuf> {
    let exact = dir.join(file_name);
    if exact.is_file() {
        return Ok(exact);
    }
    list_csv_files(dir)?
        .into_iter()
        .find(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.eq_ignore_ascii_case(file_name))
                .unwrap_or(false)
        })
        .ok_or(IngestError::FileNotFound { path: exact })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in &["weather.csv", "Retail_Sales.CSV", "notes.txt"] {
            std::fs::write(dir.path().join(name), "header\ndata").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();
        dir
    }

    #[test]
    fn test_list_csv_files() {
        let dir = create_test_dir();
        let files = list_csv_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Retail_Sales.CSV", "weather.csv"]);
    }

    #[test]
    fn test_resolve_case_insensitive() {
        let dir = create_test_dir();
        let path = resolve_source_file(dir.path(), "retail_sales.csv").unwrap();
        assert!(path.ends_with("Retail_Sales.CSV"));
        assert!(resolve_source_file(dir.path(), "network.csv").is_err());
    }

    #[test]
    fn test_missing_directory() {
        let err = list_csv_files(Path::new("/nonexistent/lcore/data")).unwrap_err();
        assert!(matches!(err, IngestError::DirectoryNotFound { .. }));
    }
}
