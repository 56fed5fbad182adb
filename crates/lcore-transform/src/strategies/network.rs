//! 5G quality-of-service samples. Unit strings are parsed by the field
//! rules; the parsed signal strength picks the tower band.

use lcore_model::Domain;
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::{Result, RowParseError};
use crate::executor::DomainRun;
use crate::output::TransformOutput;
use crate::registry::DomainTransformer;
use crate::strategies::PRIMARY;

/// Payload field holding the parsed signal strength in dBm.
pub const SIGNAL_FIELD: &str = "signal_strength_dbm";

const DEFAULT_STRONG_DBM: f64 = -70.0;
const DEFAULT_MEDIUM_DBM: f64 = -85.0;
const DEFAULT_TOWERS_PER_BAND: usize = 3;

/// Tower number for a sample: the band (strong, medium, weak) selects a
/// block of towers and the row index picks one within the block.
pub fn tower_number(
    signal_dbm: f64,
    row: usize,
    strong_dbm: f64,
    medium_dbm: f64,
    per_band: usize,
) -> usize {
    let band = if signal_dbm >= strong_dbm {
        0
    } else if signal_dbm >= medium_dbm {
        1
    } else {
        2
    };
    band * per_band + row % per_band + 1
}

pub struct NetworkTransformer;

impl DomainTransformer for NetworkTransformer {
    fn domain(&self) -> Domain {
        Domain::Network
    }

    fn transform(
        &self,
        sources: &SourceSet,
        config: &DomainConfig,
        context: &TransformContext,
    ) -> Result<TransformOutput> {
        let mut run = DomainRun::new(config, context);
        let (source, table) = run.source(sources, PRIMARY)?;
        let prepared = run.prepare(source, table)?;
        prepared.require_timestamp()?;

        let params = &config.params;
        let strong = params.strong_signal_dbm.unwrap_or(DEFAULT_STRONG_DBM);
        let medium = params.medium_signal_dbm.unwrap_or(DEFAULT_MEDIUM_DBM);
        let per_band = params.towers_per_band.unwrap_or(DEFAULT_TOWERS_PER_BAND);

        for record in prepared.records() {
            let parsed = prepared
                .parse_row(record)
                .and_then(|row| row.timestamped())
                .and_then(|(timestamp, row)| match row.number(SIGNAL_FIELD) {
                    Some(signal) => Ok((timestamp, signal, row)),
                    None => Err(RowParseError::MissingValue {
                        row: record.index,
                        column: SIGNAL_FIELD.to_string(),
                    }),
                });
            match parsed {
                Ok((timestamp, signal, row)) => {
                    let tower = tower_number(signal, record.index, strong, medium, per_band);
                    let path = format!("{}tower-{tower}", config.device_prefix);
                    run.emit(&path, &path, timestamp, row)?;
                }
                Err(error) => run.drop_row(&error),
            }
        }
        run.finish()
    }
}
