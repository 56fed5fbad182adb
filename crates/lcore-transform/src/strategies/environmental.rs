//! Air quality monitors fused with water-quality meters.
//!
//! Air rows carry their own timestamps and monitoring location. Water rows
//! carry neither: they are placed on a grid aligned with the air series and
//! dealt round-robin across the air locations, so every location ends up
//! with one air and one water device.

use std::collections::{BTreeMap, BTreeSet};

use lcore_ingest::parse_i64;
use lcore_model::{Domain, PayloadValue};
use lcore_standards::DomainConfig;

use crate::context::{SourceSet, TransformContext};
use crate::error::{Result, TransformError};
use crate::executor::{DomainRun, ParsedRow, device_segment};
use crate::output::TransformOutput;
use crate::registry::DomainTransformer;
use crate::strategies::grid_timestamp;

pub const AIR: &str = "air";
pub const WATER: &str = "water";

/// Fifteen minutes.
pub const DEFAULT_GRID_STEP_SECS: i64 = 900;

/// Payload field carrying the monitoring location.
pub const LOCATION_FIELD: &str = "location_id";

/// Most common positive gap between consecutive sorted timestamps; ties go
/// to the smaller gap.
pub fn dominant_step(timestamps: &[i64]) -> Option<i64> {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();
    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for pair in sorted.windows(2) {
        let gap = pair[1] - pair[0];
        if gap > 0 {
            *counts.entry(gap).or_default() += 1;
        }
    }
    let mut best: Option<(i64, usize)> = None;
    for (gap, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((gap, count));
        }
    }
    best.map(|(gap, _)| gap)
}

/// Sort location ids numerically when they are all integers, lexically otherwise.
pub fn sort_locations(locations: BTreeSet<String>) -> Vec<String> {
    let mut sorted: Vec<String> = locations.into_iter().collect();
    if sorted.iter().all(|location| parse_i64(location).is_some()) {
        sorted.sort_by_key(|location| parse_i64(location).unwrap_or_default());
    }
    sorted
}

pub struct EnvironmentalTransformer;

impl DomainTransformer for EnvironmentalTransformer {
    fn domain(&self) -> Domain {
        Domain::Environmental
    }

    fn transform(
        &self,
        sources: &SourceSet,
        config: &DomainConfig,
        context: &TransformContext,
    ) -> Result<TransformOutput> {
        let mut run = DomainRun::new(config, context);
        let prefix = &config.device_prefix;

        let (air_source, air_table) = run.source(sources, AIR)?;
        let air = run.prepare(air_source, air_table)?;
        air.require_timestamp()?;
        air.require_identity()?;

        let mut air_rows: Vec<(i64, String, ParsedRow)> = Vec::with_capacity(air_table.len());
        for record in air.records() {
            let parsed = air
                .parse_row(record)
                .and_then(|row| row.timestamped())
                .and_then(|(timestamp, row)| {
                    row.identified()
                        .map(|(location, row)| (timestamp, location, row))
                });
            match parsed {
                Ok(row) => air_rows.push(row),
                Err(error) => run.drop_row(&error),
            }
        }

        let (water_source, water_table) = run.source(sources, WATER)?;
        let water = run.prepare(water_source, water_table)?;

        let locations = sort_locations(
            air_rows
                .iter()
                .map(|(_, location, _)| location.clone())
                .collect(),
        );
        let air_timestamps: Vec<i64> =
            air_rows.iter().map(|(timestamp, _, _)| *timestamp).collect();
        let start = air_timestamps.iter().copied().min().unwrap_or_default();
        let step = dominant_step(&air_timestamps)
            .or(config.params.interval_secs)
            .unwrap_or(DEFAULT_GRID_STEP_SECS);

        for (timestamp, location, mut row) in air_rows {
            let path = format!("{prefix}{}-air", device_segment(&location));
            row.payload
                .insert(LOCATION_FIELD.to_string(), PayloadValue::Text(location.clone()));
            run.emit(&format!("{AIR}:{location}"), &path, timestamp, row)?;
        }

        if !water.records().is_empty() && locations.is_empty() {
            return Err(TransformError::Strategy {
                domain: Domain::Environmental,
                message: "water readings need at least one air monitoring location".to_string(),
            });
        }
        for record in water.records() {
            match water.parse_row(record) {
                Ok(mut row) => {
                    let location = &locations[record.index % locations.len()];
                    let timestamp =
                        grid_timestamp(Domain::Environmental, start, record.index, step)?;
                    let path = format!("{prefix}{}-water", device_segment(location));
                    row.payload
                        .insert(LOCATION_FIELD.to_string(), PayloadValue::Text(location.clone()));
                    run.emit(&format!("{WATER}:{location}"), &path, timestamp, row)?;
                }
                Err(error) => run.drop_row(&error),
            }
        }
        run.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominant_step_prefers_most_common_then_smallest() {
        assert_eq!(dominant_step(&[0, 900, 1800, 2700, 4500]), Some(900));
        assert_eq!(dominant_step(&[0, 600, 1200, 2100, 3000]), Some(600));
        assert_eq!(dominant_step(&[100, 100]), None);
        assert_eq!(dominant_step(&[]), None);
    }

    #[test]
    fn locations_sort_numerically() {
        let locations: BTreeSet<String> =
            ["105", "11", "101"].iter().map(|s| s.to_string()).collect();
        assert_eq!(sort_locations(locations), vec!["11", "101", "105"]);

        let mixed: BTreeSet<String> = ["b", "a", "10"].iter().map(|s| s.to_string()).collect();
        assert_eq!(sort_locations(mixed), vec!["10", "a", "b"]);
    }
}
