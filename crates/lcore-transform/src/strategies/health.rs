//! Fitness trackers. One device per tracker id; location columns are
//! removed by the executor, which fails closed on unlisted ones.

use lcore_model::Domain;
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::Result;
use crate::executor::{DomainRun, device_segment};
use crate::output::TransformOutput;
use crate::registry::DomainTransformer;
use crate::strategies::PRIMARY;

const TRACKER_PREFIX: &str = "Device_";

/// Device path suffix for a raw tracker id (`Device_7` becomes `7`).
pub fn tracker_segment(raw: &str) -> String {
    let raw = raw.trim();
    device_segment(raw.strip_prefix(TRACKER_PREFIX).unwrap_or(raw))
}

pub struct HealthTransformer;

impl DomainTransformer for HealthTransformer {
    fn domain(&self) -> Domain {
        Domain::Health
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
        prepared.require_identity()?;

        for record in prepared.records() {
            let parsed = prepared
                .parse_row(record)
                .and_then(|row| row.timestamped())
                .and_then(|(timestamp, row)| {
                    row.identified()
                        .map(|(identity, row)| (timestamp, identity, row))
                });
            match parsed {
                Ok((timestamp, identity, row)) => {
                    let path = format!("{}{}", config.device_prefix, tracker_segment(&identity));
                    run.emit(&identity, &path, timestamp, row)?;
                }
                Err(error) => run.drop_row(&error),
            }
        }
        run.finish()
    }
}
