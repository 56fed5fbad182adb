//! Declarative domain configuration.
//!
//! The configuration table (`standards/domains.toml`, embedded at build time)
//! lists every domain's sources, privacy denylists, field rules and strategy
//! parameters, plus the ownership distribution plan. A table supplied with
//! `--config` replaces the built-in one wholesale and goes through the same
//! validation.

#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod loader;
pub mod validate;

pub use config::{
    DEFAULT_DROP_CEILING, DEFAULT_TIMESTAMP_TOLERANCE_SECS, DomainConfig, FieldKind, FieldRule,
    OwnershipConfig, PipelineConfig, PipelineSettings, SourceConfig, StrategyParams, UnitRule,
};
pub use error::{ConfigError, Result};
pub use loader::{
    DEFAULT_CONFIG_TOML, LoadedConfig, load_config, load_default, load_from_path, parse_config,
};
pub use validate::validate_config;
