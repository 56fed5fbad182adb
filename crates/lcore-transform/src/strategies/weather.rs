//! Weather stations: Fahrenheit readings become Celsius through the field
//! rules; rows are dealt round-robin across a fixed set of stations.

use lcore_model::Domain;
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::Result;
use crate::executor::{DomainRun, slug};
use crate::output::TransformOutput;
use crate::registry::DomainTransformer;
use crate::strategies::PRIMARY;

const DEFAULT_CITY: &str = "oakland";
const DEFAULT_STATION_COUNT: usize = 5;

pub struct WeatherTransformer;

impl DomainTransformer for WeatherTransformer {
    fn domain(&self) -> Domain {
        Domain::Weather
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

        let city = slug(config.params.station_city.as_deref().unwrap_or(DEFAULT_CITY));
        let stations = config.params.station_count.unwrap_or(DEFAULT_STATION_COUNT);

        for record in prepared.records() {
            match prepared.parse_row(record).and_then(|row| row.timestamped()) {
                Ok((timestamp, row)) => {
                    let station = record.index % stations + 1;
                    let path = format!("{}{city}-{station}", config.device_prefix);
                    run.emit(&path, &path, timestamp, row)?;
                }
                Err(error) => run.drop_row(&error),
            }
        }
        run.finish()
    }
}
