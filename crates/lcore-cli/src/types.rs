use std::collections::BTreeMap;
use std::path::PathBuf;

use lcore_model::{Category, RunReport};
use lcore_report::{OwnershipArtifacts, RunArtifacts};

#[derive(Debug)]
pub struct RunOutcome {
    pub output_dir: PathBuf,
    pub report: RunReport,
    /// Catalog devices per category.
    pub categories: BTreeMap<Category, usize>,
    /// `None` on a dry run.
    pub artifacts: Option<RunArtifacts>,
    /// `None` when the ownership step was skipped or failed.
    pub ownership: Option<OwnershipOutcome>,
    pub errors: Vec<String>,
}

impl RunOutcome {
    pub fn has_errors(&self) -> bool {
        !self.report.success || !self.errors.is_empty()
    }
}

#[derive(Debug)]
pub struct OwnershipOutcome {
    pub wallets: usize,
    pub wallets_used: usize,
    /// Rendered distribution plan.
    pub plan: String,
    /// Devices per wallet to number of wallets.
    pub shape: BTreeMap<usize, usize>,
    pub artifacts: Option<OwnershipArtifacts>,
}
