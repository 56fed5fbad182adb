use std::path::PathBuf;

use lcore_model::Domain;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("domain {domain} is configured more than once")]
    DuplicateDomain { domain: Domain },

    #[error("domain {domain} is not configured")]
    MissingDomain { domain: Domain },

    #[error("device prefixes overlap: {first:?} ({first_domain}) and {second:?} ({second_domain})")]
    OverlappingPrefixes {
        first: String,
        first_domain: Domain,
        second: String,
        second_domain: Domain,
    },

    #[error("invalid regex {pattern:?} in {domain}: {message}")]
    InvalidPattern {
        domain: Domain,
        pattern: String,
        message: String,
    },

    #[error("field rule {target:?} in {domain} reads denied column {column:?}")]
    RuleReadsDeniedColumn {
        domain: Domain,
        target: String,
        column: String,
    },

    #[error("payload field {field:?} in {domain} is itself on the denylist")]
    DeniedPayloadField { domain: Domain, field: String },

    #[error("payload field {field:?} in {domain} is declared with conflicting kinds")]
    ConflictingFieldKind { domain: Domain, field: String },

    #[error("invalid configuration for {scope}: {message}")]
    Invalid { scope: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(scope: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            scope: scope.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;
