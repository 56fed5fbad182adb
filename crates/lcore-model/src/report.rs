use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Domain, Violation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainStatus {
    Passed,
    Failed,
}

/// Pipeline stage at which a domain failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Load,
    Transform,
    Validate,
}

impl FailureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureStage::Load => "load",
            FailureStage::Transform => "transform",
            FailureStage::Validate => "validate",
        }
    }
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainFailure {
    pub stage: FailureStage,
    pub message: String,
}

/// Per-domain counts and compliance metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainReport {
    pub domain: Domain,
    pub status: DomainStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<DomainFailure>,
    pub input_rows: usize,
    /// Records the transformer emitted, whether or not they validated.
    pub output_rows: usize,
    /// Rows dropped because they could not be parsed.
    pub dropped_rows: usize,
    /// Distinct PII/location columns removed from the sources.
    pub pii_columns_removed: Vec<String>,
    /// Exact number of non-empty PII cell values suppressed.
    pub pii_values_removed: u64,
    pub device_count: usize,
    #[serde(default)]
    pub violations: Vec<Violation>,
}

impl DomainReport {
    /// A report for a domain that has not produced any output yet.
    pub fn pending(domain: Domain) -> Self {
        Self {
            domain,
            status: DomainStatus::Passed,
            failure: None,
            input_rows: 0,
            output_rows: 0,
            dropped_rows: 0,
            pii_columns_removed: Vec::new(),
            pii_values_removed: 0,
            device_count: 0,
            violations: Vec::new(),
        }
    }

    pub fn fail(&mut self, stage: FailureStage, message: impl Into<String>) {
        self.status = DomainStatus::Failed;
        self.failure = Some(DomainFailure {
            stage,
            message: message.into(),
        });
    }

    pub fn passed(&self) -> bool {
        self.status == DomainStatus::Passed
    }
}

/// Consolidated report for one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// RFC 3339 run timestamp.
    pub generated_at: String,
    pub generated_at_unix: i64,
    pub success: bool,
    /// Records of domains that passed validation.
    pub total_records: usize,
    pub total_dropped_rows: usize,
    /// Sum over domains of distinct PII/location columns removed.
    pub total_pii_columns_removed: usize,
    pub total_pii_values_removed: u64,
    /// SHA-256 of the configuration table the run used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_sha256: Option<String>,
    pub domains: Vec<DomainReport>,
}

impl RunReport {
    pub fn new(generated_at: String, generated_at_unix: i64, domains: Vec<DomainReport>) -> Self {
        let success = domains.iter().all(DomainReport::passed);
        let total_records = domains
            .iter()
            .filter(|report| report.passed())
            .map(|report| report.output_rows)
            .sum();
        let total_dropped_rows = domains.iter().map(|report| report.dropped_rows).sum();
        let total_pii_columns_removed = domains
            .iter()
            .map(|report| report.pii_columns_removed.len())
            .sum();
        let total_pii_values_removed = domains.iter().map(|report| report.pii_values_removed).sum();
        Self {
            generated_at,
            generated_at_unix,
            success,
            total_records,
            total_dropped_rows,
            total_pii_columns_removed,
            total_pii_values_removed,
            config_sha256: None,
            domains,
        }
    }

    pub fn with_config_sha256(mut self, sha256: impl Into<String>) -> Self {
        self.config_sha256 = Some(sha256.into());
        self
    }

    pub fn domain(&self, domain: Domain) -> Option<&DomainReport> {
        self.domains.iter().find(|report| report.domain == domain)
    }

    pub fn failed_domains(&self) -> Vec<Domain> {
        self.domains
            .iter()
            .filter(|report| !report.passed())
            .map(|report| report.domain)
            .collect()
    }
}
