//! Tests for loading and validating the domain configuration table.

use lcore_model::Domain;
use lcore_standards::{
    ConfigError, DEFAULT_CONFIG_TOML, FieldKind, load_config, load_default, load_from_path,
    parse_config,
};

fn with_edit(from: &str, to: &str) -> String {
    assert!(DEFAULT_CONFIG_TOML.contains(from), "fixture text missing: {from}");
    DEFAULT_CONFIG_TOML.replacen(from, to, 1)
}

#[test]
fn built_in_table_covers_every_domain() {
    let loaded = load_default().expect("built-in config");
    let config = &loaded.config;
    assert_eq!(loaded.origin, "built-in");
    assert_eq!(loaded.sha256.len(), 64);

    for domain in Domain::ALL {
        assert!(config.domain(domain).is_some(), "{domain} missing");
    }
    assert_eq!(config.pipeline.drop_ceiling, 0.05);
    assert_eq!(config.pipeline.timestamp_tolerance_secs, 86_400);
    let network = config.domain(Domain::Network).expect("network");
    assert_eq!(network.drop_ceiling_or(config.pipeline.drop_ceiling), 0.05);
    let mut strict = network.clone();
    strict.drop_ceiling = Some(0.0);
    assert_eq!(strict.drop_ceiling_or(config.pipeline.drop_ceiling), 0.0);

    let plan = config.ownership.plan_entries().expect("plan");
    assert_eq!(plan, vec![(1, 45), (2, 8), (3, 2)]);
    assert_eq!(config.ownership.wallet_count, 100);
    assert_eq!(config.ownership.expected_devices, Some(67));
}

#[test]
fn derived_schema_sets() {
    let config = load_default().expect("config").config;

    let health = config.domain(Domain::Health).unwrap();
    assert!(health.denied_keys().contains("location"));
    assert!(health.required_fields().contains("steps_count"));

    let environmental = config.domain(Domain::Environmental).unwrap();
    let required = environmental.required_fields();
    assert!(required.contains("temperature_celsius"));
    assert!(!required.contains("ph_level"));
    assert!(environmental.text_fields().contains("sensor_type"));

    let network = config.domain(Domain::Network).unwrap();
    let signal = network.sources[0]
        .fields
        .iter()
        .find(|rule| rule.target == "signal_strength_dbm")
        .unwrap();
    assert_eq!(signal.kind, FieldKind::Unit);
    assert!(network.numeric_fields().contains("allocated_bandwidth_mbps"));
    assert!(network.denied_keys().contains("user_id"));
}

#[test]
fn duplicate_domain_is_rejected() {
    let text = with_edit("name = \"weather\"", "name = \"retail\"");
    let err = parse_config(&text, "test").unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateDomain { domain: Domain::Retail }));
}

#[test]
fn overlapping_prefixes_are_rejected() {
    let text = with_edit(
        "device_prefix = \"weather-station-\"",
        "device_prefix = \"env-weather-\"",
    );
    let err = parse_config(&text, "test").unwrap_err();
    assert!(matches!(err, ConfigError::OverlappingPrefixes { .. }));
}

#[test]
fn rule_reading_location_column_is_rejected() {
    let text = with_edit(
        "{ source = \"Temperature\", target = \"ambient_temperature\" }",
        "{ source = \"Location\", target = \"ambient_temperature\" }",
    );
    let err = parse_config(&text, "test").unwrap_err();
    match err {
        ConfigError::RuleReadsDeniedColumn { domain, column, .. } => {
            assert_eq!(domain, Domain::Health);
            assert_eq!(column, "Location");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_pattern_is_rejected() {
    let text = with_edit("\"(?i)contact\"", "\"(?i)contact(\"");
    let err = parse_config(&text, "test").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { domain: Domain::Retail, .. }));
}

#[test]
fn plan_must_match_expected_devices() {
    let text = with_edit("3 = 2", "3 = 3");
    let err = parse_config(&text, "test").unwrap_err();
    assert!(err.to_string().contains("expected_devices"));

    let text = with_edit("1 = 45", "0 = 45");
    assert!(parse_config(&text, "test").is_err());
}

#[test]
fn oversized_plan_bucket_is_rejected() {
    let text = with_edit("1 = 45\n2 = 8\n3 = 2", "4611686018427387904 = 8");
    let err = parse_config(&text, "test").unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }), "{err}");
    assert!(err.to_string().contains("overflows"));
}

#[test]
fn unknown_keys_are_rejected() {
    let text = with_edit("[pipeline]", "[pipeline]\nretries = 3");
    let err = parse_config(&text, "test").unwrap_err();
    assert!(matches!(err, ConfigError::Toml { .. }));
}

#[test]
fn config_file_replaces_built_in_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("domains.toml");
    std::fs::write(&path, with_edit("drop_ceiling = 0.05", "drop_ceiling = 0.2")).unwrap();

    let loaded = load_from_path(&path).expect("config from file");
    assert_eq!(loaded.config.pipeline.drop_ceiling, 0.2);
    assert_eq!(loaded.origin, path.display().to_string());

    let fallback = load_config(None).expect("built-in");
    assert_ne!(fallback.sha256, loaded.sha256);

    assert!(matches!(
        load_from_path(&dir.path().join("missing.toml")),
        Err(ConfigError::Io { .. })
    ));
}
