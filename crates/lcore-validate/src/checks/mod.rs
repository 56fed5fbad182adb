//! Validation check modules.
//!
//! Each module inspects one aspect of the record contract and returns the
//! violations it found.

mod fields;
mod identifier;
mod privacy;
mod timestamps;

use lcore_model::{NormalizedRecord, Violation};

use crate::context::ValidationContext;
use crate::schema::DomainSchema;

/// Run all checks over one domain's records.
pub fn run_all(
    records: &[NormalizedRecord],
    schema: &DomainSchema,
    context: &ValidationContext,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    // 1. Domain tag, required fields, value kinds
    violations.extend(fields::check(records, schema));

    // 2. Device identifier pattern
    violations.extend(identifier::check(records, schema));

    // 3. Denylisted payload keys
    violations.extend(privacy::check(records, schema));

    // 4. Timestamp range and per-device ordering
    violations.extend(timestamps::check(records, context));

    violations
}
