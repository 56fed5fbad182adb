//! Load-time checks on the configuration table.

use std::collections::BTreeMap;

use lcore_model::Domain;
use regex::Regex;

use crate::config::{DomainConfig, FieldKind, PipelineConfig};
use crate::error::{ConfigError, Result};

/// Reject configurations the executor could not run safely.
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    check_domain_set(config)?;
    check_prefixes(config)?;
    check_ceiling("pipeline", config.pipeline.drop_ceiling)?;
    if config.pipeline.timestamp_tolerance_secs < 0 {
        return Err(ConfigError::invalid(
            "pipeline",
            "timestamp_tolerance_secs must not be negative",
        ));
    }
    for domain in &config.domains {
        if let Some(ceiling) = domain.drop_ceiling {
            check_ceiling(domain.name.as_str(), ceiling)?;
        }
        check_domain(domain)?;
    }
    check_ownership(config)
}

fn check_domain_set(config: &PipelineConfig) -> Result<()> {
    for domain in Domain::ALL {
        match config
            .domains
            .iter()
            .filter(|entry| entry.name == domain)
            .count()
        {
            0 => return Err(ConfigError::MissingDomain { domain }),
            1 => {}
            _ => return Err(ConfigError::DuplicateDomain { domain }),
        }
    }
    Ok(())
}

fn check_prefixes(config: &PipelineConfig) -> Result<()> {
    for (idx, first) in config.domains.iter().enumerate() {
        if first.device_prefix.trim().is_empty() {
            return Err(ConfigError::invalid(
                first.name.as_str(),
                "device_prefix must not be empty",
            ));
        }
        for second in &config.domains[idx + 1..] {
            if first.device_prefix.starts_with(&second.device_prefix)
                || second.device_prefix.starts_with(&first.device_prefix)
            {
                return Err(ConfigError::OverlappingPrefixes {
                    first: first.device_prefix.clone(),
                    first_domain: first.name,
                    second: second.device_prefix.clone(),
                    second_domain: second.name,
                });
            }
        }
    }
    Ok(())
}

fn check_ceiling(scope: &str, ceiling: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&ceiling) {
        return Err(ConfigError::invalid(
            scope,
            format!("drop_ceiling {ceiling} must be within [0, 1]"),
        ));
    }
    Ok(())
}

fn compile(domain: Domain, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|error| ConfigError::InvalidPattern {
        domain,
        pattern: pattern.to_string(),
        message: error.to_string(),
    })
}

fn check_domain(domain: &DomainConfig) -> Result<()> {
    let name = domain.name;
    if domain.sources.is_empty() {
        return Err(ConfigError::invalid(name.as_str(), "no sources configured"));
    }

    let denied = domain.denied_keys();
    let patterns = domain
        .denied_patterns()
        .iter()
        .map(|pattern| compile(name, pattern))
        .collect::<Result<Vec<_>>>()?;
    let is_denied = |column: &str| {
        denied.contains(&column.to_lowercase())
            || patterns.iter().any(|pattern| pattern.is_match(column))
    };

    let mut kinds: BTreeMap<&str, bool> = BTreeMap::new();
    for source in &domain.sources {
        if source.file.trim().is_empty() {
            return Err(ConfigError::invalid(
                format!("{name}.{}", source.role),
                "file must not be empty",
            ));
        }
        for rule in &source.fields {
            if let Some(column) = rule.source_names().find(|column| is_denied(column)) {
                return Err(ConfigError::RuleReadsDeniedColumn {
                    domain: name,
                    target: rule.target.clone(),
                    column: column.to_string(),
                });
            }
            if is_denied(&rule.target) {
                return Err(ConfigError::DeniedPayloadField {
                    domain: name,
                    field: rule.target.clone(),
                });
            }
            if rule.kind == FieldKind::Unit && rule.units.is_empty() {
                return Err(ConfigError::invalid(
                    format!("{name}.{}", rule.target),
                    "unit fields need at least one unit suffix",
                ));
            }
            let numeric = rule.kind.is_numeric();
            if *kinds.entry(rule.target.as_str()).or_insert(numeric) != numeric {
                return Err(ConfigError::ConflictingFieldKind {
                    domain: name,
                    field: rule.target.clone(),
                });
            }
        }
        for key in source.constants.keys() {
            if is_denied(key) {
                return Err(ConfigError::DeniedPayloadField {
                    domain: name,
                    field: key.clone(),
                });
            }
        }
    }
    check_params(domain)
}

fn check_params(domain: &DomainConfig) -> Result<()> {
    let params = &domain.params;
    let scope = format!("{}.params", domain.name);
    if params.interval_secs.is_some_and(|secs| secs <= 0) {
        return Err(ConfigError::invalid(scope, "interval_secs must be positive"));
    }
    if params.station_count == Some(0)
        || params.stores_per_neighborhood == Some(0)
        || params.towers_per_band == Some(0)
    {
        return Err(ConfigError::invalid(scope, "counts must be at least 1"));
    }
    if params
        .neighborhoods
        .as_ref()
        .is_some_and(|neighborhoods| neighborhoods.is_empty())
    {
        return Err(ConfigError::invalid(scope, "neighborhoods must not be empty"));
    }
    if let (Some(strong), Some(medium)) = (params.strong_signal_dbm, params.medium_signal_dbm)
        && medium > strong
    {
        return Err(ConfigError::invalid(
            scope,
            "medium_signal_dbm must not exceed strong_signal_dbm",
        ));
    }
    Ok(())
}

fn check_ownership(config: &PipelineConfig) -> Result<()> {
    let ownership = &config.ownership;
    if ownership.wallet_count == 0 {
        return Err(ConfigError::invalid("ownership", "wallet_count must be at least 1"));
    }
    let entries = ownership.plan_entries()?;
    let wallets = entries
        .iter()
        .try_fold(0usize, |total, (_, count)| total.checked_add(*count))
        .ok_or_else(|| ConfigError::invalid("ownership.plan", "wallet total overflows"))?;
    if wallets > ownership.wallet_count {
        return Err(ConfigError::invalid(
            "ownership.plan",
            format!(
                "plan uses {wallets} wallets but wallet_count is {}",
                ownership.wallet_count
            ),
        ));
    }
    if let Some(expected) = ownership.expected_devices {
        let devices = entries
            .iter()
            .try_fold(0usize, |total, (size, count)| {
                size.checked_mul(*count).and_then(|devices| total.checked_add(devices))
            })
            .ok_or_else(|| ConfigError::invalid("ownership.plan", "device total overflows"))?;
        if devices != expected {
            return Err(ConfigError::invalid(
                "ownership.plan",
                format!("plan covers {devices} devices but expected_devices is {expected}"),
            ));
        }
    }
    Ok(())
}
