//! Generic executor shared by all domain strategies.
//!
//! The executor owns everything the configuration table describes: required
//! column checks, PII and location removal with exact audit counts, field
//! rules with unit parsing, device-id collision detection and the drop
//! ceiling. Strategies only decide timestamps and device paths.

use std::collections::{BTreeMap, HashMap};

use lcore_ingest::{RawRecord, RawTable, headers_match, parse_f64, parse_timestamp, round_to};
use lcore_model::{DeviceId, Domain, NormalizedRecord, Payload, PayloadValue};
use lcore_standards::{DomainConfig, FieldKind, FieldRule, SourceConfig};
use regex::Regex;
use tracing::{debug, info, warn};

use crate::context::{SourceSet, TransformContext};
use crate::error::{Result, RowParseError, TransformError};
use crate::output::{TransformOutput, TransformStats};
use crate::units::{UnitParser, fahrenheit_to_celsius};

const DEFAULT_FAHRENHEIT_DECIMALS: u32 = 1;

fn redact(value: &str, log_data: bool) -> &str {
    if log_data { value } else { "[REDACTED]" }
}

/// Accumulates the records and counters of one domain run.
pub struct DomainRun<'c> {
    domain: Domain,
    config: &'c DomainConfig,
    drop_ceiling: f64,
    log_data: bool,
    records: Vec<NormalizedRecord>,
    owners: HashMap<DeviceId, String>,
    stats: TransformStats,
}

impl<'c> DomainRun<'c> {
    pub fn new(config: &'c DomainConfig, context: &TransformContext) -> Self {
        Self {
            domain: config.name,
            config,
            drop_ceiling: config.drop_ceiling_or(context.drop_ceiling),
            log_data: context.log_data,
            records: Vec::new(),
            owners: HashMap::new(),
            stats: TransformStats::default(),
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Look up a source's configuration and its loaded table by role.
    pub fn source<'t>(
        &self,
        sources: &'t SourceSet,
        role: &str,
    ) -> Result<(&'c SourceConfig, &'t RawTable)> {
        let missing = || TransformError::MissingSource {
            domain: self.domain,
            role: role.to_string(),
        };
        let source = self.config.source(role).ok_or_else(missing)?;
        let table = sources.get(&source.role).ok_or_else(missing)?;
        Ok((source, table))
    }

    /// Check a source's columns, audit its privacy columns and resolve field rules.
    pub fn prepare<'t>(
        &mut self,
        source: &'c SourceConfig,
        table: &'t RawTable,
    ) -> Result<PreparedSource<'c, 't>> {
        let domain = self.domain;
        let compile = |pattern: &String| {
            Regex::new(pattern).map_err(|error| TransformError::InvalidPattern {
                domain,
                pattern: pattern.clone(),
                message: error.to_string(),
            })
        };
        let location_patterns = source
            .location_patterns
            .iter()
            .map(&compile)
            .collect::<Result<Vec<_>>>()?;
        let pii_patterns = source
            .pii_patterns
            .iter()
            .map(&compile)
            .collect::<Result<Vec<_>>>()?;

        for header in table.headers.iter() {
            let listed = source
                .location_columns
                .iter()
                .any(|column| headers_match(column, header));
            if !listed && location_patterns.iter().any(|pattern| pattern.is_match(header)) {
                return Err(TransformError::UnlistedLocationColumn {
                    domain,
                    source_name: table.source.clone(),
                    column: header.clone(),
                });
            }
        }

        for header in table.headers.iter() {
            let private = source
                .privacy_columns()
                .any(|column| headers_match(column, header))
                || pii_patterns.iter().any(|pattern| pattern.is_match(header));
            if private {
                let values = table
                    .records
                    .iter()
                    .filter(|record| record.value(header).is_some())
                    .count() as u64;
                debug!(domain = %domain, column = %header, values, "removing privacy column");
                self.stats.pii_columns_removed.insert(header.clone());
                self.stats.pii_values_removed += values;
            } else if source
                .discard_columns
                .iter()
                .any(|column| headers_match(column, header))
            {
                self.stats.discarded_columns.insert(header.clone());
            }
        }

        let require = |column: &str| -> Result<String> {
            table
                .find_column(column)
                .map(str::to_string)
                .ok_or_else(|| TransformError::MissingColumn {
                    domain,
                    source_name: table.source.clone(),
                    column: column.to_string(),
                })
        };
        for column in &source.required_columns {
            require(column)?;
        }
        let timestamp_column = source.timestamp_column.as_deref().map(&require).transpose()?;
        let identity_column = source.identity_column.as_deref().map(&require).transpose()?;

        let mut fields = Vec::with_capacity(source.fields.len());
        for rule in &source.fields {
            let column = rule
                .source_names()
                .find_map(|name| table.find_column(name))
                .map(str::to_string);
            if column.is_none() && rule.required {
                require(&rule.source)?;
            }
            let units = match rule.kind {
                FieldKind::Unit => Some(UnitParser::new(&rule.units).map_err(|error| {
                    TransformError::InvalidPattern {
                        domain,
                        pattern: rule.target.clone(),
                        message: error.to_string(),
                    }
                })?),
                _ => None,
            };
            fields.push(ResolvedField {
                rule,
                column,
                units,
            });
        }

        self.stats.input_rows += table.len();
        info!(
            domain = %domain,
            source = %table.source,
            rows = table.len(),
            pii_columns = self.stats.pii_columns_removed.len(),
            "source prepared"
        );
        Ok(PreparedSource {
            domain,
            table,
            timestamp_column,
            identity_column,
            fields,
            constants: &source.constants,
            log_data: self.log_data,
        })
    }

    /// Count a row that could not be parsed.
    pub fn drop_row(&mut self, error: &RowParseError) {
        self.stats.dropped_rows += 1;
        debug!(domain = %self.domain, column = error.column(), "dropping row: {error}");
    }

    /// Emit one normalized record for the device at `path`.
    ///
    /// `identity` names the source entity behind the device; two different
    /// identities mapping to the same device id fail the domain.
    pub fn emit(
        &mut self,
        identity: &str,
        path: &str,
        timestamp: i64,
        row: ParsedRow,
    ) -> Result<()> {
        if !path.starts_with(&self.config.device_prefix) {
            return Err(TransformError::PrefixMismatch {
                domain: self.domain,
                path: path.to_string(),
                prefix: self.config.device_prefix.clone(),
            });
        }
        let device_id =
            DeviceId::from_path(path).map_err(|error| TransformError::InvalidDeviceId {
                domain: self.domain,
                path: path.to_string(),
                reason: error.to_string(),
            })?;
        match self.owners.get(&device_id) {
            Some(owner) if owner != identity => {
                return Err(TransformError::DeviceIdCollision {
                    domain: self.domain,
                    device_id: device_id.to_string(),
                    first: owner.clone(),
                    second: identity.to_string(),
                });
            }
            Some(_) => {}
            None => {
                self.owners.insert(device_id.clone(), identity.to_string());
            }
        }
        self.records.push(
            NormalizedRecord::new(device_id, timestamp, self.domain, row.payload)
                .with_data_quality(round_to(row.data_quality, 3)),
        );
        Ok(())
    }

    /// Apply the drop ceiling and order records by timestamp.
    pub fn finish(mut self) -> Result<TransformOutput> {
        let input = self.stats.input_rows;
        let dropped = self.stats.dropped_rows;
        if input > 0 && dropped as f64 / input as f64 > self.drop_ceiling {
            return Err(TransformError::DropCeilingExceeded {
                domain: self.domain,
                dropped,
                input,
                ceiling: self.drop_ceiling,
            });
        }
        if dropped > 0 {
            warn!(domain = %self.domain, dropped, input, "dropped unparsable rows");
        }
        self.records.sort_by_key(|record| record.timestamp);
        info!(
            domain = %self.domain,
            records = self.records.len(),
            devices = self.owners.len(),
            pii_values_removed = self.stats.pii_values_removed,
            "domain transformed"
        );
        Ok(TransformOutput {
            domain: self.domain,
            records: self.records,
            stats: self.stats,
        })
    }
}

struct ResolvedField<'c> {
    rule: &'c FieldRule,
    /// Header as found in the source; `None` when an optional column is absent.
    column: Option<String>,
    units: Option<UnitParser>,
}

/// A source whose columns have been checked and resolved.
pub struct PreparedSource<'c, 't> {
    domain: Domain,
    table: &'t RawTable,
    timestamp_column: Option<String>,
    identity_column: Option<String>,
    fields: Vec<ResolvedField<'c>>,
    constants: &'c BTreeMap<String, String>,
    log_data: bool,
}

/// Payload and metadata extracted from one input row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// Zero-based position of the row in its source.
    pub index: usize,
    pub timestamp: Option<i64>,
    pub identity: Option<String>,
    pub payload: Payload,
    /// Fraction of the source's field rules that produced a value.
    pub data_quality: f64,
}

impl ParsedRow {
    pub fn timestamped(self) -> std::result::Result<(i64, ParsedRow), RowParseError> {
        match self.timestamp {
            Some(timestamp) => Ok((timestamp, self)),
            None => Err(RowParseError::MissingValue {
                row: self.index,
                column: "timestamp".to_string(),
            }),
        }
    }

    pub fn identified(self) -> std::result::Result<(String, ParsedRow), RowParseError> {
        match self.identity.clone() {
            Some(identity) => Ok((identity, self)),
            None => Err(RowParseError::MissingValue {
                row: self.index,
                column: "identity".to_string(),
            }),
        }
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.payload.get(field).and_then(PayloadValue::as_f64)
    }
}

impl<'c, 't> PreparedSource<'c, 't> {
    pub fn records(&self) -> &'t [RawRecord] {
        &self.table.records
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp_column.is_some()
    }

    /// Fail unless the source configuration names a timestamp column.
    pub fn require_timestamp(&self) -> Result<()> {
        if self.has_timestamp() {
            Ok(())
        } else {
            Err(TransformError::Strategy {
                domain: self.domain,
                message: format!("{} needs a timestamp_column", self.table.source),
            })
        }
    }

    /// Fail unless the source configuration names an identity column.
    pub fn require_identity(&self) -> Result<()> {
        if self.identity_column.is_some() {
            Ok(())
        } else {
            Err(TransformError::Strategy {
                domain: self.domain,
                message: format!("{} needs an identity_column", self.table.source),
            })
        }
    }

    /// Apply the field rules to one row.
    pub fn parse_row(&self, record: &RawRecord) -> std::result::Result<ParsedRow, RowParseError> {
        let row = record.index;
        let timestamp = match &self.timestamp_column {
            Some(column) => {
                let value = record.value(column).ok_or_else(|| RowParseError::MissingValue {
                    row,
                    column: column.clone(),
                })?;
                let parsed = parse_timestamp(value).ok_or_else(|| {
                    self.trace_value(row, column, value);
                    RowParseError::InvalidTimestamp {
                        row,
                        column: column.clone(),
                    }
                })?;
                Some(parsed)
            }
            None => None,
        };
        let identity = match &self.identity_column {
            Some(column) => Some(
                record
                    .value(column)
                    .ok_or_else(|| RowParseError::MissingValue {
                        row,
                        column: column.clone(),
                    })?
                    .to_string(),
            ),
            None => None,
        };

        let mut payload = Payload::new();
        let mut present = 0usize;
        for field in &self.fields {
            let Some(column) = &field.column else {
                continue;
            };
            let Some(raw) = record.value(column) else {
                if field.rule.required {
                    return Err(RowParseError::MissingValue {
                        row,
                        column: column.clone(),
                    });
                }
                continue;
            };
            let value = self.convert(field, column, raw, row)?;
            payload.insert(field.rule.target.clone(), value);
            present += 1;
        }
        for (key, value) in self.constants {
            payload.insert(key.clone(), PayloadValue::Text(value.clone()));
        }

        let data_quality = if self.fields.is_empty() {
            1.0
        } else {
            present as f64 / self.fields.len() as f64
        };
        Ok(ParsedRow {
            index: row,
            timestamp,
            identity,
            payload,
            data_quality,
        })
    }

    fn convert(
        &self,
        field: &ResolvedField<'_>,
        column: &str,
        raw: &str,
        row: usize,
    ) -> std::result::Result<PayloadValue, RowParseError> {
        let invalid_number = || {
            self.trace_value(row, column, raw);
            RowParseError::InvalidNumber {
                row,
                column: column.to_string(),
            }
        };
        let rounded = |value: f64| match field.rule.decimals {
            Some(decimals) => round_to(value, decimals),
            None => value,
        };
        match field.rule.kind {
            FieldKind::Text => Ok(PayloadValue::Text(raw.to_string())),
            FieldKind::Number => parse_f64(raw)
                .map(|value| PayloadValue::Number(rounded(value)))
                .ok_or_else(invalid_number),
            FieldKind::Integer => parse_f64(raw)
                .filter(|value| value.fract() == 0.0)
                .map(PayloadValue::Number)
                .ok_or_else(invalid_number),
            FieldKind::Fahrenheit => parse_f64(raw)
                .map(|value| {
                    let decimals = field.rule.decimals.unwrap_or(DEFAULT_FAHRENHEIT_DECIMALS);
                    PayloadValue::Number(fahrenheit_to_celsius(value, decimals))
                })
                .ok_or_else(invalid_number),
            FieldKind::Unit => field
                .units
                .as_ref()
                .and_then(|units| units.parse(raw))
                .map(|value| PayloadValue::Number(rounded(value)))
                .ok_or_else(|| {
                    self.trace_value(row, column, raw);
                    RowParseError::UnrecognizedUnit {
                        row,
                        column: column.to_string(),
                    }
                }),
        }
    }

    fn trace_value(&self, row: usize, column: &str, value: &str) {
        debug!(
            domain = %self.domain,
            row,
            column,
            value = redact(value, self.log_data),
            "unparsable value"
        );
    }
}

/// Sanitize a raw identifier into a device-path segment, keeping case.
///
/// Characters outside `[A-Za-z0-9-]` become `-`; runs of `-` collapse.
pub fn device_segment(raw: &str) -> String {
    let mut segment = String::with_capacity(raw.len());
    for ch in raw.trim().chars() {
        let ch = if ch.is_ascii_alphanumeric() { ch } else { '-' };
        if ch == '-' && segment.ends_with('-') {
            continue;
        }
        segment.push(ch);
    }
    segment.trim_matches('-').to_string()
}

/// Lowercase slug for names such as neighborhoods (`Power & Light District`
/// becomes `power-and-light-district`).
pub fn slug(raw: &str) -> String {
    device_segment(&raw.to_lowercase().replace('&', "and"))
}
