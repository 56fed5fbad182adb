//! Artifact names and shared file helpers.

use std::fs;
use std::path::{Path, PathBuf};

use lcore_model::Domain;

use crate::error::{ReportError, Result};

pub const RUN_REPORT_FILE: &str = "run_report.json";
pub const DEVICE_CATALOG_FILE: &str = "device_catalog.csv";
pub const WALLETS_FILE: &str = "wallets.csv";
pub const MAPPING_FILE: &str = "wallet_device_mapping.csv";
pub const SUMMARY_FILE: &str = "wallet_device_mapping_summary.csv";

/// File name of a domain's normalized table.
pub fn domain_file_name(domain: Domain) -> &'static str {
    match domain {
        Domain::Environmental => "environmental_sensors_combined.csv",
        Domain::Agricultural => "agricultural_sensors_transformed.csv",
        Domain::Health => "health_sensors_privacy_protected.csv",
        Domain::Network => "network_sensors_parsed.csv",
        Domain::Retail => "retail_sensors_anonymized.csv",
        Domain::Weather => "weather_sensors_converted.csv",
    }
}

/// Create `dir` (and parents) if needed.
pub fn ensure_output_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| ReportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    Ok(dir.to_path_buf())
}

pub(crate) fn create_file(path: &Path) -> Result<fs::File> {
    fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}
