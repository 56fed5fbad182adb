//! Schema validation of transformer output.
//!
//! Every domain's records are checked against a [`DomainSchema`] derived
//! from the configuration table. Any violation fails the domain; callers
//! decide what that means for the rest of the run.

#![deny(unsafe_code)]

mod checks;
pub mod context;
pub mod error;
pub mod schema;

pub use context::ValidationContext;
pub use error::SchemaError;
pub use schema::DomainSchema;

use lcore_model::{NormalizedRecord, ValidationResult};
use tracing::{debug, info};

/// Validate one domain's records.
pub fn validate(
    records: &[NormalizedRecord],
    schema: &DomainSchema,
    context: &ValidationContext,
) -> ValidationResult {
    let violations = checks::run_all(records, schema, context);
    for violation in &violations {
        debug!(
            domain = %schema.domain,
            kind = violation.kind.as_str(),
            record = violation.record_index,
            field = violation.field.as_deref(),
            "{}",
            violation.message
        );
    }
    let result = ValidationResult::from_violations(violations);
    info!(
        domain = %schema.domain,
        records = records.len(),
        violations = result.violation_count(),
        ok = result.ok,
        "domain validated"
    );
    result
}
