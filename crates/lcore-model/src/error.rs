use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown domain tag: {0}")]
    UnknownDomain(String),
    #[error("unknown device category: {0}")]
    UnknownCategory(String),
    #[error("invalid device id {value:?}: {reason}")]
    InvalidDeviceId { value: String, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
