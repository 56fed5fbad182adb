use serde::{Deserialize, Serialize};

/// Category of a schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required payload field is absent.
    MissingField,
    /// A payload field holds the wrong kind of value.
    TypeMismatch,
    /// A numeric payload value is NaN or infinite.
    NonFiniteValue,
    /// The record's domain tag differs from the domain being validated.
    DomainMismatch,
    /// The device id does not match the domain's identifier pattern.
    InvalidDeviceId,
    /// A payload key is on the domain's PII/location denylist.
    DeniedField,
    /// Timestamp negative or beyond run time plus tolerance.
    TimestampOutOfRange,
    /// Timestamp decreases within one device's record sequence.
    NonMonotonicTimestamp,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "missing_field",
            ViolationKind::TypeMismatch => "type_mismatch",
            ViolationKind::NonFiniteValue => "non_finite_value",
            ViolationKind::DomainMismatch => "domain_mismatch",
            ViolationKind::InvalidDeviceId => "invalid_device_id",
            ViolationKind::DeniedField => "denied_field",
            ViolationKind::TimestampOutOfRange => "timestamp_out_of_range",
            ViolationKind::NonMonotonicTimestamp => "non_monotonic_timestamp",
        }
    }
}

/// A single schema violation found in a transformer's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Index of the offending record in the emitted sequence.
    pub record_index: Option<usize>,
    pub device_id: Option<String>,
    pub field: Option<String>,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            record_index: None,
            device_id: None,
            field: None,
            message: message.into(),
        }
    }

    pub fn at_record(mut self, index: usize, device_id: &str) -> Self {
        self.record_index = Some(index);
        self.device_id = Some(device_id.to_string());
        self
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }
}

/// Outcome of validating one domain's records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub ok: bool,
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            ok: violations.is_empty(),
            violations,
        }
    }

    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn count_of(&self, kind: ViolationKind) -> usize {
        self.violations
            .iter()
            .filter(|violation| violation.kind == kind)
            .count()
    }
}
