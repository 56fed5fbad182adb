use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::config::PipelineConfig;
use crate::error::{ConfigError, Result};
use crate::validate::validate_config;

/// Configuration table compiled into the binary.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../standards/domains.toml");

/// A validated configuration together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: PipelineConfig,
    /// `built-in` or the path the table was read from.
    pub origin: String,
    /// SHA-256 of the raw TOML text.
    pub sha256: String,
}

/// Load the built-in configuration table.
pub fn load_default() -> Result<LoadedConfig> {
    parse_config(DEFAULT_CONFIG_TOML, "built-in")
}

/// Load a configuration table from disk, replacing the built-in one.
pub fn load_from_path(path: &Path) -> Result<LoadedConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text, &path.display().to_string())
}

/// Load `path` when given, the built-in table otherwise.
pub fn load_config(path: Option<&Path>) -> Result<LoadedConfig> {
    match path {
        Some(path) => load_from_path(path),
        None => load_default(),
    }
}

/// Parse and validate TOML text.
pub fn parse_config(text: &str, origin: &str) -> Result<LoadedConfig> {
    let config: PipelineConfig = toml::from_str(text).map_err(|source| ConfigError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    validate_config(&config)?;
    let sha256 = hex::encode(Sha256::digest(text.as_bytes()));
    debug!(origin, sha256 = %sha256, domains = config.domains.len(), "configuration loaded");
    Ok(LoadedConfig {
        config,
        origin: origin.to_string(),
        sha256,
    })
}
