//! Configuration table types.
//!
//! One [`PipelineConfig`] drives the whole run: global pipeline settings,
//! one [`DomainConfig`] per domain describing its sources, privacy rules and
//! field rules, and the ownership plan.

use std::collections::{BTreeMap, BTreeSet};

use lcore_model::Domain;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

pub const DEFAULT_DROP_CEILING: f64 = 0.05;
pub const DEFAULT_TIMESTAMP_TOLERANCE_SECS: i64 = 86_400;

fn default_drop_ceiling() -> f64 {
    DEFAULT_DROP_CEILING
}

fn default_timestamp_tolerance() -> i64 {
    DEFAULT_TIMESTAMP_TOLERANCE_SECS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    #[serde(default)]
    pub pipeline: PipelineSettings,
    #[serde(rename = "domain")]
    pub domains: Vec<DomainConfig>,
    pub ownership: OwnershipConfig,
}

impl PipelineConfig {
    pub fn domain(&self, domain: Domain) -> Option<&DomainConfig> {
        self.domains.iter().find(|config| config.name == domain)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineSettings {
    /// Maximum fraction of input rows a domain may drop before it fails.
    #[serde(default = "default_drop_ceiling")]
    pub drop_ceiling: f64,
    /// How far past the run time a record timestamp may lie.
    #[serde(default = "default_timestamp_tolerance")]
    pub timestamp_tolerance_secs: i64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            drop_ceiling: DEFAULT_DROP_CEILING,
            timestamp_tolerance_secs: DEFAULT_TIMESTAMP_TOLERANCE_SECS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DomainConfig {
    pub name: Domain,
    /// Start of every device path this domain emits (`env-`, `cell-tower-`).
    pub device_prefix: String,
    #[serde(default)]
    pub drop_ceiling: Option<f64>,
    #[serde(rename = "source")]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub params: StrategyParams,
}

impl DomainConfig {
    /// This domain's drop ceiling, or `default` when it sets none.
    pub fn drop_ceiling_or(&self, default: f64) -> f64 {
        self.drop_ceiling.unwrap_or(default)
    }

    pub fn source(&self, role: &str) -> Option<&SourceConfig> {
        self.sources
            .iter()
            .find(|source| source.role.eq_ignore_ascii_case(role))
    }

    /// Lowercased column names that must never reach a payload.
    pub fn denied_keys(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|source| source.pii_columns.iter().chain(&source.location_columns))
            .map(|column| column.to_lowercase())
            .collect()
    }

    /// Regex patterns for column names that must never reach a payload.
    pub fn denied_patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self
            .sources
            .iter()
            .flat_map(|source| source.pii_patterns.iter().chain(&source.location_patterns))
            .cloned()
            .collect();
        patterns.sort();
        patterns.dedup();
        patterns
    }

    /// Payload fields every record of the domain must carry: the required
    /// targets shared by all sources.
    pub fn required_fields(&self) -> BTreeSet<String> {
        let mut sources = self.sources.iter();
        let Some(first) = sources.next() else {
            return BTreeSet::new();
        };
        let mut required = first.required_targets();
        for source in sources {
            let other = source.required_targets();
            required.retain(|field| other.contains(field));
        }
        required
    }

    /// Payload fields declared with a numeric kind in any source.
    pub fn numeric_fields(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|source| source.fields.iter())
            .filter(|rule| rule.kind.is_numeric())
            .map(|rule| rule.target.clone())
            .collect()
    }

    /// Payload fields declared as text in any source, constants included.
    pub fn text_fields(&self) -> BTreeSet<String> {
        self.sources
            .iter()
            .flat_map(|source| {
                source
                    .fields
                    .iter()
                    .filter(|rule| !rule.kind.is_numeric())
                    .map(|rule| rule.target.clone())
                    .chain(source.constants.keys().cloned())
            })
            .collect()
    }
}

/// One delimited input file of a domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Role name the domain strategy looks the source up by (`air`, `water`, `primary`).
    pub role: String,
    pub file: String,
    #[serde(default)]
    pub timestamp_column: Option<String>,
    /// Column identifying the physical device or location behind a row.
    #[serde(default)]
    pub identity_column: Option<String>,
    #[serde(default)]
    pub required_columns: Vec<String>,
    #[serde(default)]
    pub pii_columns: Vec<String>,
    #[serde(default)]
    pub pii_patterns: Vec<String>,
    /// Location columns removed before emission.
    #[serde(default)]
    pub location_columns: Vec<String>,
    /// Any header matching one of these must be listed in `location_columns`.
    #[serde(default)]
    pub location_patterns: Vec<String>,
    /// Columns dropped without counting as PII.
    #[serde(default)]
    pub discard_columns: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldRule>,
    #[serde(default)]
    pub constants: BTreeMap<String, String>,
}

impl SourceConfig {
    pub fn required_targets(&self) -> BTreeSet<String> {
        self.fields
            .iter()
            .filter(|rule| rule.required)
            .map(|rule| rule.target.clone())
            .collect()
    }

    /// Every column name this source removes for privacy reasons.
    pub fn privacy_columns(&self) -> impl Iterator<Item = &String> {
        self.pii_columns.iter().chain(&self.location_columns)
    }
}

/// Maps one source column onto one payload field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRule {
    pub source: String,
    /// Alternate spellings of the source header (encoding variants).
    #[serde(default)]
    pub aliases: Vec<String>,
    pub target: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Rows without a usable value for this field are dropped.
    #[serde(default)]
    pub required: bool,
    /// Accepted unit suffixes for [`FieldKind::Unit`], tried in order.
    #[serde(default)]
    pub units: Vec<UnitRule>,
    #[serde(default)]
    pub decimals: Option<u32>,
}

impl FieldRule {
    /// Source header followed by its aliases.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.source.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Number,
    Integer,
    Text,
    /// Unit-suffixed string such as `"-75 dBm"`.
    Unit,
    /// Fahrenheit reading emitted as Celsius.
    Fahrenheit,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        !matches!(self, FieldKind::Text)
    }
}

/// A recognised unit suffix and the factor converting it to the target unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitRule {
    pub suffix: String,
    #[serde(default = "unit_factor")]
    pub factor: f64,
}

fn unit_factor() -> f64 {
    1.0
}

/// Per-domain strategy knobs. Each strategy reads the subset it needs and
/// falls back to its own defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StrategyParams {
    pub start_epoch: Option<i64>,
    pub interval_secs: Option<i64>,
    pub station_city: Option<String>,
    pub station_count: Option<usize>,
    pub neighborhoods: Option<Vec<String>>,
    pub stores_per_neighborhood: Option<usize>,
    pub strong_signal_dbm: Option<f64>,
    pub medium_signal_dbm: Option<f64>,
    pub towers_per_band: Option<usize>,
}

/// Wallet pool size and the distribution plan of the ownership step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnershipConfig {
    pub wallet_count: usize,
    #[serde(default)]
    pub expected_devices: Option<usize>,
    /// Bucket size (devices per wallet) to number of wallets.
    pub plan: BTreeMap<String, usize>,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl OwnershipConfig {
    /// Plan entries as `(devices_per_wallet, wallet_count)` pairs.
    pub fn plan_entries(&self) -> Result<Vec<(usize, usize)>> {
        self.plan
            .iter()
            .map(|(key, count)| match key.trim().parse::<usize>() {
                Ok(size) if size >= 1 => Ok((size, *count)),
                _ => Err(ConfigError::invalid(
                    "ownership.plan",
                    format!("bucket size {key:?} must be an integer >= 1"),
                )),
            })
            .collect()
    }
}
