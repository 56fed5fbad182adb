//! Domain tag, required payload fields and value kinds.

use lcore_model::{NormalizedRecord, PayloadValue, Violation, ViolationKind};

use crate::schema::DomainSchema;

pub fn check(records: &[NormalizedRecord], schema: &DomainSchema) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let device = record.device_id.as_str();

        if record.domain != schema.domain {
            violations.push(
                Violation::new(
                    ViolationKind::DomainMismatch,
                    format!("record tagged {} in {} output", record.domain, schema.domain),
                )
                .at_record(index, device),
            );
        }

        for field in &schema.required_fields {
            if !record.payload.contains_key(field) {
                violations.push(
                    Violation::new(ViolationKind::MissingField, "required field absent")
                        .at_record(index, device)
                        .with_field(field),
                );
            }
        }

        for (key, value) in &record.payload {
            match value {
                PayloadValue::Number(number) if !number.is_finite() => violations.push(
                    Violation::new(ViolationKind::NonFiniteValue, format!("value is {number}"))
                        .at_record(index, device)
                        .with_field(key),
                ),
                PayloadValue::Text(_) if schema.numeric_fields.contains(key) => violations.push(
                    Violation::new(ViolationKind::TypeMismatch, "expected a number")
                        .at_record(index, device)
                        .with_field(key),
                ),
                PayloadValue::Number(_) if schema.text_fields.contains(key) => violations.push(
                    Violation::new(ViolationKind::TypeMismatch, "expected text")
                        .at_record(index, device)
                        .with_field(key),
                ),
                _ => {}
            }
        }

        if let Some(score) = record.data_quality
            && !(0.0..=1.0).contains(&score)
        {
            violations.push(
                Violation::new(
                    ViolationKind::TypeMismatch,
                    format!("data quality {score} outside [0, 1]"),
                )
                .at_record(index, device)
                .with_field("data_quality"),
            );
        }
    }
    violations
}
