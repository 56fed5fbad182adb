//! Per-domain output schema derived from the configuration table.

use std::collections::BTreeSet;

use lcore_model::{DID_PREFIX, Domain};
use lcore_standards::DomainConfig;
use regex::Regex;

use crate::error::SchemaError;

/// The contract one domain's records are checked against.
#[derive(Debug, Clone)]
pub struct DomainSchema {
    pub domain: Domain,
    /// Anchored `did:lcore:<prefix>...` pattern.
    pub device_pattern: Regex,
    pub required_fields: BTreeSet<String>,
    pub numeric_fields: BTreeSet<String>,
    pub text_fields: BTreeSet<String>,
    /// Lowercased denylisted keys.
    pub denied_keys: BTreeSet<String>,
    pub denied_patterns: Vec<Regex>,
}

impl DomainSchema {
    pub fn from_config(config: &DomainConfig) -> Result<Self, SchemaError> {
        let domain = config.name;
        let device_pattern = device_pattern(&config.device_prefix).map_err(|error| {
            SchemaError::InvalidPattern {
                domain,
                pattern: config.device_prefix.clone(),
                message: error.to_string(),
            }
        })?;
        let denied_patterns = config
            .denied_patterns()
            .into_iter()
            .map(|pattern| {
                Regex::new(&pattern).map_err(|error| SchemaError::InvalidPattern {
                    domain,
                    pattern: pattern.clone(),
                    message: error.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            domain,
            device_pattern,
            required_fields: config.required_fields(),
            numeric_fields: config.numeric_fields(),
            text_fields: config.text_fields(),
            denied_keys: config.denied_keys(),
            denied_patterns,
        })
    }

    /// Whether a payload key is on the denylist or matches a denylist pattern.
    pub fn is_denied(&self, key: &str) -> bool {
        self.denied_keys.contains(&key.to_lowercase())
            || self.denied_patterns.iter().any(|pattern| pattern.is_match(key))
    }
}

fn device_pattern(prefix: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "^{}{}[A-Za-z0-9-]+$",
        regex::escape(DID_PREFIX),
        regex::escape(prefix)
    ))
}
