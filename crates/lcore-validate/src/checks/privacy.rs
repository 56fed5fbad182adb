//! No payload key may be denylisted or match a denylist pattern.

use lcore_model::{NormalizedRecord, Violation, ViolationKind};

use crate::schema::DomainSchema;

pub fn check(records: &[NormalizedRecord], schema: &DomainSchema) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (index, record) in records.iter().enumerate() {
        for key in record.payload.keys() {
            if schema.is_denied(key) {
                violations.push(
                    Violation::new(ViolationKind::DeniedField, "denylisted payload key")
                        .at_record(index, record.device_id.as_str())
                        .with_field(key),
                );
            }
        }
    }
    violations
}
