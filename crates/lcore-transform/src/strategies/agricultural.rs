//! Plant research plots. The source has no timestamps, so row `i` is placed
//! at `start + i * interval`; one device per plot.

use lcore_model::Domain;
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::Result;
use crate::executor::{DomainRun, device_segment};
use crate::output::TransformOutput;
use crate::registry::DomainTransformer;
use crate::strategies::{PRIMARY, grid_timestamp};

/// 2024-03-01T00:00:00Z
pub const DEFAULT_START_EPOCH: i64 = 1_709_251_200;
/// Six hours.
pub const DEFAULT_INTERVAL_SECS: i64 = 21_600;

pub struct AgriculturalTransformer;

impl DomainTransformer for AgriculturalTransformer {
    fn domain(&self) -> Domain {
        Domain::Agricultural
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
        prepared.require_identity()?;

        let start = config.params.start_epoch.unwrap_or(DEFAULT_START_EPOCH);
        let interval = config.params.interval_secs.unwrap_or(DEFAULT_INTERVAL_SECS);

        for record in prepared.records() {
            match prepared.parse_row(record).and_then(|row| row.identified()) {
                Ok((plot, row)) => {
                    let timestamp =
                        grid_timestamp(Domain::Agricultural, start, record.index, interval)?;
                    let path = format!("{}{}", config.device_prefix, device_segment(&plot));
                    run.emit(&plot, &path, timestamp, row)?;
                }
                Err(error) => run.drop_row(&error),
            }
        }
        run.finish()
    }
}
