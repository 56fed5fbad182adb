use std::collections::BTreeMap;

use lcore_ingest::RawTable;
use lcore_standards::DEFAULT_DROP_CEILING;

/// Loaded source tables of one domain, keyed by source role.
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    tables: BTreeMap<String, RawTable>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: &str, table: RawTable) {
        self.tables.insert(role.to_ascii_lowercase(), table);
    }

    pub fn with(mut self, role: &str, table: RawTable) -> Self {
        self.insert(role, table);
        self
    }

    pub fn get(&self, role: &str) -> Option<&RawTable> {
        self.tables.get(&role.to_ascii_lowercase())
    }

    /// Total data rows across all sources.
    pub fn row_count(&self) -> usize {
        self.tables.values().map(RawTable::len).sum()
    }
}

/// Run-wide settings a transformer needs besides its domain configuration.
#[derive(Debug, Clone, Copy)]
pub struct TransformContext {
    /// Maximum dropped/input ratio before the domain fails.
    pub drop_ceiling: f64,
    /// Include raw cell values in debug logs.
    pub log_data: bool,
}

impl TransformContext {
    pub fn new(drop_ceiling: f64) -> Self {
        Self {
            drop_ceiling,
            log_data: false,
        }
    }

    pub fn with_log_data(mut self, enable: bool) -> Self {
        self.log_data = enable;
        self
    }
}

impl Default for TransformContext {
    fn default() -> Self {
        Self::new(DEFAULT_DROP_CEILING)
    }
}
