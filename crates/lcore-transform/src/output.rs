use std::collections::{BTreeSet, HashSet};

use lcore_model::{DeviceId, Domain, NormalizedRecord};

/// Row and privacy counters for one domain run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformStats {
    pub input_rows: usize,
    pub dropped_rows: usize,
    /// Source headers removed as PII or location data.
    pub pii_columns_removed: BTreeSet<String>,
    /// Non-empty cells in those columns.
    pub pii_values_removed: u64,
    /// Source headers dropped as technically redundant.
    pub discarded_columns: BTreeSet<String>,
}

/// Normalized records of one domain plus its counters.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    pub domain: Domain,
    /// Sorted by timestamp; ties keep emission order.
    pub records: Vec<NormalizedRecord>,
    pub stats: TransformStats,
}

impl TransformOutput {
    /// Distinct device ids in first-seen order.
    pub fn device_ids(&self) -> Vec<DeviceId> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| seen.insert(&record.device_id))
            .map(|record| record.device_id.clone())
            .collect()
    }

    pub fn device_count(&self) -> usize {
        self.records
            .iter()
            .map(|record| &record.device_id)
            .collect::<HashSet<_>>()
            .len()
    }
}
