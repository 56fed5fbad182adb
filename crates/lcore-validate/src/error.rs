use lcore_model::Domain;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("{domain}: invalid denylist pattern `{pattern}`: {message}")]
    InvalidPattern {
        domain: Domain,
        pattern: String,
        message: String,
    },
}
