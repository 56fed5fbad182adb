//! Retail order lines. Customer PII is stripped by the executor; each row is
//! attributed to a store in one of a fixed list of neighborhoods.

use lcore_model::{Domain, PayloadValue};
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::Result;
use crate::executor::{DomainRun, slug};
use crate::output::TransformOutput;
use crate::registry::DomainTransformer;
use crate::strategies::PRIMARY;

pub const KANSAS_CITY_NEIGHBORHOODS: [&str; 10] = [
    "Crossroads Arts District",
    "Westport",
    "Country Club Plaza",
    "Crown Center",
    "River Market",
    "Power & Light District",
    "Brookside",
    "Midtown",
    "West Bottoms",
    "39th Street District",
];

const DEFAULT_STORES_PER_NEIGHBORHOOD: usize = 3;

/// Payload field carrying the neighborhood name.
pub const REGION_FIELD: &str = "store_region";

/// Neighborhood index and 1-based store number for row `row`.
pub fn store_slot(row: usize, neighborhoods: usize, stores: usize) -> (usize, usize) {
    (row % neighborhoods, (row / neighborhoods) % stores + 1)
}

pub struct RetailTransformer;

impl DomainTransformer for RetailTransformer {
    fn domain(&self) -> Domain {
        Domain::Retail
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

        let neighborhoods: Vec<String> = match &config.params.neighborhoods {
            Some(names) => names.clone(),
            None => KANSAS_CITY_NEIGHBORHOODS
                .iter()
                .map(|name| name.to_string())
                .collect(),
        };
        let slugs: Vec<String> = neighborhoods.iter().map(|name| slug(name)).collect();
        let stores = config
            .params
            .stores_per_neighborhood
            .unwrap_or(DEFAULT_STORES_PER_NEIGHBORHOOD);

        for record in prepared.records() {
            match prepared.parse_row(record).and_then(|row| row.timestamped()) {
                Ok((timestamp, mut row)) => {
                    let (slot, store) = store_slot(record.index, neighborhoods.len(), stores);
                    let path = format!("{}{}-store-{store}", config.device_prefix, slugs[slot]);
                    let identity = format!("{}#{store}", neighborhoods[slot]);
                    row.payload.insert(
                        REGION_FIELD.to_string(),
                        PayloadValue::Text(neighborhoods[slot].clone()),
                    );
                    run.emit(&identity, &path, timestamp, row)?;
                }
                Err(error) => run.drop_row(&error),
            }
        }
        run.finish()
    }
}
