//! Device catalog builder.

use std::collections::{BTreeMap, HashSet};

use lcore_model::{Category, DeviceCatalogEntry, Domain, NormalizedRecord};

/// One entry per distinct device id: domains in processing order, devices
/// in first-seen order within a domain.
pub fn build_catalog(
    records_by_domain: &BTreeMap<Domain, Vec<NormalizedRecord>>,
) -> Vec<DeviceCatalogEntry> {
    let mut seen = HashSet::new();
    let mut catalog = Vec::new();
    for domain in Domain::ALL {
        let Some(records) = records_by_domain.get(&domain) else {
            continue;
        };
        for record in records {
            if seen.insert(&record.device_id) {
                catalog.push(DeviceCatalogEntry::new(record.device_id.clone(), domain));
            }
        }
    }
    catalog
}

/// Devices per category, every category listed.
pub fn category_counts(catalog: &[DeviceCatalogEntry]) -> BTreeMap<Category, usize> {
    let mut counts: BTreeMap<Category, usize> =
        Category::ALL.iter().map(|category| (*category, 0)).collect();
    for entry in catalog {
        *counts.entry(entry.category).or_default() += 1;
    }
    counts
}
