//! Device identifiers must match the domain's `did:lcore:<prefix>` pattern.

use lcore_model::{NormalizedRecord, Violation, ViolationKind};

use crate::schema::DomainSchema;

pub fn check(records: &[NormalizedRecord], schema: &DomainSchema) -> Vec<Violation> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| !schema.device_pattern.is_match(record.device_id.as_str()))
        .map(|(index, record)| {
            Violation::new(
                ViolationKind::InvalidDeviceId,
                format!("device id does not match {}", schema.device_pattern),
            )
            .at_record(index, record.device_id.as_str())
        })
        .collect()
}
