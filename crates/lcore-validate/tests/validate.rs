//! Validator tests over hand-built records and real transformer output.

use lcore_ingest::RawTable;
use lcore_model::{DeviceId, Domain, NormalizedRecord, Payload, PayloadValue, ViolationKind};
use lcore_standards::{DomainConfig, load_default};
use lcore_transform::{SourceSet, TransformContext, default_registry};
use lcore_validate::{DomainSchema, ValidationContext, validate};

const RUN_TIME: i64 = 1_760_000_000;

fn config(domain: Domain) -> DomainConfig {
    load_default()
        .unwrap()
        .config
        .domain(domain)
        .unwrap()
        .clone()
}

fn schema(domain: Domain) -> DomainSchema {
    DomainSchema::from_config(&config(domain)).unwrap()
}

fn context() -> ValidationContext {
    ValidationContext::new(RUN_TIME, 86_400)
}

fn health_record(path: &str, timestamp: i64, extra: &[(&str, PayloadValue)]) -> NormalizedRecord {
    let mut payload = Payload::new();
    payload.insert("steps_count".into(), PayloadValue::Number(1200.0));
    payload.insert("heart_rate".into(), PayloadValue::Number(72.0));
    for (key, value) in extra {
        payload.insert((*key).to_string(), value.clone());
    }
    NormalizedRecord::new(
        DeviceId::from_path(path).unwrap(),
        timestamp,
        Domain::Health,
        payload,
    )
}

#[test]
fn clean_records_pass() {
    let records = vec![
        health_record("health-tracker-1", 100, &[]),
        health_record("health-tracker-2", 100, &[]),
        health_record("health-tracker-1", 200, &[]),
    ];
    let result = validate(&records, &schema(Domain::Health), &context());
    assert!(result.ok, "{:?}", result.violations);
}

#[test]
fn empty_output_passes() {
    let result = validate(&[], &schema(Domain::Weather), &context());
    assert!(result.ok);
}

#[test]
fn reports_missing_and_mistyped_fields() {
    let mut missing = health_record("health-tracker-1", 100, &[]);
    missing.payload.remove("heart_rate");
    let mistyped = health_record(
        "health-tracker-2",
        100,
        &[
            ("steps_count", PayloadValue::Text("many".into())),
            ("activity_type", PayloadValue::Number(3.0)),
            ("calories_burned", PayloadValue::Number(f64::NAN)),
        ],
    );
    let result = validate(&[missing, mistyped], &schema(Domain::Health), &context());

    assert!(!result.ok);
    assert_eq!(result.count_of(ViolationKind::MissingField), 1);
    assert_eq!(result.count_of(ViolationKind::TypeMismatch), 2);
    assert_eq!(result.count_of(ViolationKind::NonFiniteValue), 1);
    let missing = result
        .violations
        .iter()
        .find(|violation| violation.kind == ViolationKind::MissingField)
        .unwrap();
    assert_eq!(missing.field.as_deref(), Some("heart_rate"));
    assert_eq!(missing.record_index, Some(0));
}

#[test]
fn rejects_location_keys_in_health_payloads() {
    let records = vec![
        health_record("health-tracker-1", 100, &[("Location", PayloadValue::Text("Home".into()))]),
        health_record("health-tracker-2", 100, &[("gps_lat", PayloadValue::Number(39.1))]),
    ];
    let result = validate(&records, &schema(Domain::Health), &context());
    assert_eq!(result.count_of(ViolationKind::DeniedField), 2);
}

#[test]
fn rejects_foreign_domain_and_device_ids() {
    let mut foreign = health_record("health-tracker-1", 100, &[]);
    foreign.domain = Domain::Weather;
    let wrong_prefix = health_record("env-101-air", 100, &[]);
    let result = validate(&[foreign, wrong_prefix], &schema(Domain::Health), &context());
    assert_eq!(result.count_of(ViolationKind::DomainMismatch), 1);
    assert_eq!(result.count_of(ViolationKind::InvalidDeviceId), 1);
}

#[test]
fn checks_timestamp_range_and_order() {
    let records = vec![
        health_record("health-tracker-1", 500, &[]),
        health_record("health-tracker-1", 400, &[]),
        health_record("health-tracker-2", -1, &[]),
        health_record("health-tracker-3", RUN_TIME + 86_400, &[]),
        health_record("health-tracker-3", RUN_TIME + 86_401, &[]),
    ];
    let result = validate(&records, &schema(Domain::Health), &context());
    assert_eq!(result.count_of(ViolationKind::NonMonotonicTimestamp), 1);
    assert_eq!(result.count_of(ViolationKind::TimestampOutOfRange), 2);
    let late = result
        .violations
        .iter()
        .filter(|violation| violation.kind == ViolationKind::TimestampOutOfRange)
        .map(|violation| violation.record_index)
        .collect::<Vec<_>>();
    assert_eq!(late, vec![Some(2), Some(4)]);
}

#[test]
fn retail_store_country_is_not_mistaken_for_pii() {
    let retail = schema(Domain::Retail);
    assert!(!retail.is_denied("store_country"));
    assert!(!retail.is_denied("store_region"));
    assert!(retail.is_denied("COUNTRY"));
    assert!(retail.is_denied("contact_email"));
    assert!(retail.is_denied("customername"));
}

#[test]
fn transformer_output_validates() {
    let text = "name,datetime,temp,conditions,stations\n\
                Oakland,2022-01-01T00:00:00,50,Clear,KOAK\n\
                Oakland,2022-01-01T01:00:00,51,Clear,KOAK\n\
                Oakland,2022-01-01T02:00:00,52,Rain,KOAK\n";
    let sources = SourceSet::new().with(
        "primary",
        RawTable::from_csv_str("weather.csv", text).unwrap(),
    );
    let output = default_registry()
        .get(Domain::Weather)
        .unwrap()
        .transform(&sources, &config(Domain::Weather), &TransformContext::default())
        .unwrap();
    let result = validate(&output.records, &schema(Domain::Weather), &context());
    assert!(result.ok, "{:?}", result.violations);
}
