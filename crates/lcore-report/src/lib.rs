//! Output artifacts.
//!
//! Normalized per-domain tables are written with polars; the catalog,
//! wallet pool and ownership tables with the `csv` crate; the run report as
//! JSON.

#![deny(unsafe_code)]

pub mod common;
pub mod error;
pub mod records;
pub mod run_report;
pub mod tables;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lcore_model::{DeviceCatalogEntry, Domain, NormalizedRecord, RunReport, Wallet};
use lcore_wallet::{OwnershipAssignment, WalletSummary};

pub use common::{
    DEVICE_CATALOG_FILE, MAPPING_FILE, RUN_REPORT_FILE, SUMMARY_FILE, WALLETS_FILE,
    domain_file_name, ensure_output_dir,
};
pub use error::{ReportError, Result};
pub use records::{records_frame, write_domain_records};
pub use run_report::write_run_report;
pub use tables::{write_catalog, write_mapping, write_summary, write_wallets};

/// Files written for a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct RunArtifacts {
    pub domain_tables: Vec<(Domain, PathBuf)>,
    pub run_report: PathBuf,
    pub device_catalog: PathBuf,
}

/// Files written for the ownership step.
#[derive(Debug, Clone, Default)]
pub struct OwnershipArtifacts {
    pub wallets: PathBuf,
    pub mapping: PathBuf,
    pub summary: PathBuf,
}

/// Write the accepted domain tables, the device catalog and the run report.
pub fn write_run_artifacts(
    dir: &Path,
    report: &RunReport,
    accepted: &BTreeMap<Domain, Vec<NormalizedRecord>>,
    catalog: &[DeviceCatalogEntry],
) -> Result<RunArtifacts> {
    let dir = ensure_output_dir(dir)?;
    let mut domain_tables = Vec::with_capacity(accepted.len());
    for (domain, records) in accepted {
        let path = write_domain_records(&dir, *domain, records)?;
        domain_tables.push((*domain, path));
    }
    let device_catalog = dir.join(DEVICE_CATALOG_FILE);
    write_catalog(&device_catalog, catalog)?;
    let run_report = dir.join(RUN_REPORT_FILE);
    write_run_report(&run_report, report)?;
    Ok(RunArtifacts {
        domain_tables,
        run_report,
        device_catalog,
    })
}

/// Write the wallet pool, the detailed mapping and the per-wallet summary.
pub fn write_ownership_artifacts(
    dir: &Path,
    wallets: &[Wallet],
    assignment: &OwnershipAssignment,
    summary: &[WalletSummary],
) -> Result<OwnershipArtifacts> {
    let dir = ensure_output_dir(dir)?;
    let artifacts = OwnershipArtifacts {
        wallets: dir.join(WALLETS_FILE),
        mapping: dir.join(MAPPING_FILE),
        summary: dir.join(SUMMARY_FILE),
    };
    write_wallets(&artifacts.wallets, wallets)?;
    write_mapping(&artifacts.mapping, wallets, assignment)?;
    write_summary(&artifacts.summary, summary)?;
    Ok(artifacts)
}
