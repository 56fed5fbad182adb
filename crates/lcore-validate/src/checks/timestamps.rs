//! Timestamp range and per-device ordering.

use std::collections::HashMap;

use lcore_model::{NormalizedRecord, Violation, ViolationKind};

use crate::context::ValidationContext;

pub fn check(records: &[NormalizedRecord], context: &ValidationContext) -> Vec<Violation> {
    let mut violations = Vec::new();
    let max = context.max_timestamp();
    let mut last_seen: HashMap<&str, i64> = HashMap::new();

    for (index, record) in records.iter().enumerate() {
        let device = record.device_id.as_str();
        let timestamp = record.timestamp;

        if timestamp < 0 || timestamp > max {
            violations.push(
                Violation::new(
                    ViolationKind::TimestampOutOfRange,
                    format!("timestamp {timestamp} outside [0, {max}]"),
                )
                .at_record(index, device),
            );
        }

        if let Some(previous) = last_seen.insert(device, timestamp)
            && timestamp < previous
        {
            violations.push(
                Violation::new(
                    ViolationKind::NonMonotonicTimestamp,
                    format!("timestamp {timestamp} precedes {previous}"),
                )
                .at_record(index, device),
            );
        }
    }
    violations
}
