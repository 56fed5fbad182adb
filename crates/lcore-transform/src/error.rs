//! Error types for domain transformation.

use lcore_model::Domain;
use thiserror::Error;

/// Domain-fatal transformation failure.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{domain}: no source with role {role:?} is configured or loaded")]
    MissingSource { domain: Domain, role: String },

    #[error("{domain}: required column {column:?} is absent from {source_name}")]
    MissingColumn {
        domain: Domain,
        source_name: String,
        column: String,
    },

    #[error(
        "{domain}: column {column:?} in {source_name} looks like location data but is not configured for removal"
    )]
    UnlistedLocationColumn {
        domain: Domain,
        source_name: String,
        column: String,
    },

    #[error("{domain}: device id {device_id} produced by both {first:?} and {second:?}")]
    DeviceIdCollision {
        domain: Domain,
        device_id: String,
        first: String,
        second: String,
    },

    #[error("{domain}: device path {path:?} is invalid: {reason}")]
    InvalidDeviceId {
        domain: Domain,
        path: String,
        reason: String,
    },

    #[error("{domain}: device path {path:?} does not start with prefix {prefix:?}")]
    PrefixMismatch {
        domain: Domain,
        path: String,
        prefix: String,
    },

    #[error("{domain}: dropped {dropped} of {input} rows, above the ceiling of {ceiling}")]
    DropCeilingExceeded {
        domain: Domain,
        dropped: usize,
        input: usize,
        ceiling: f64,
    },

    #[error("{domain}: invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        domain: Domain,
        pattern: String,
        message: String,
    },

    #[error("{domain}: {message}")]
    Strategy { domain: Domain, message: String },
}

impl TransformError {
    /// Row counts carried by failures that happened after rows were read.
    pub fn drop_counts(&self) -> Option<(usize, usize)> {
        match self {
            TransformError::DropCeilingExceeded { dropped, input, .. } => Some((*dropped, *input)),
            _ => None,
        }
    }
}

/// Why a single input row could not be normalized. Rows failing this way
/// are dropped and counted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowParseError {
    #[error("row {row}: missing value for {column:?}")]
    MissingValue { row: usize, column: String },

    #[error("row {row}: {column:?} is not a number")]
    InvalidNumber { row: usize, column: String },

    #[error("row {row}: {column:?} does not carry a recognized unit")]
    UnrecognizedUnit { row: usize, column: String },

    #[error("row {row}: {column:?} is not a recognized timestamp")]
    InvalidTimestamp { row: usize, column: String },
}

impl RowParseError {
    pub fn column(&self) -> &str {
        match self {
            RowParseError::MissingValue { column, .. }
            | RowParseError::InvalidNumber { column, .. }
            | RowParseError::UnrecognizedUnit { column, .. }
            | RowParseError::InvalidTimestamp { column, .. } => column,
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
