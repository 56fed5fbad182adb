//! Tests for lcore-model types.

use lcore_model::{
    Category, DeviceCatalogEntry, DeviceId, Domain, DomainReport, FailureStage, NormalizedRecord,
    Payload, PayloadValue, RunReport, ValidationResult, Violation, ViolationKind,
};

#[test]
fn run_report_totals_and_status() {
    let mut weather = DomainReport::pending(Domain::Weather);
    weather.input_rows = 10;
    weather.output_rows = 9;
    weather.dropped_rows = 1;
    weather.pii_values_removed = 20;

    let mut network = DomainReport::pending(Domain::Network);
    network.input_rows = 4;
    network.dropped_rows = 4;
    network.fail(FailureStage::Transform, "drop ceiling exceeded");

    let report = RunReport::new(
        "2024-03-01T00:00:00+00:00".to_string(),
        1_709_251_200,
        vec![network, weather],
    );

    assert!(!report.success);
    assert_eq!(report.total_records, 9);
    assert_eq!(report.total_dropped_rows, 5);
    assert_eq!(report.total_pii_values_removed, 20);
    assert_eq!(report.failed_domains(), vec![Domain::Network]);
    assert!(report.domain(Domain::Weather).unwrap().passed());
}

#[test]
fn run_report_serializes_every_domain() {
    let domains = Domain::ALL.iter().map(|d| DomainReport::pending(*d)).collect();
    let report = RunReport::new("now".to_string(), 0, domains);
    let json = serde_json::to_value(&report).expect("serialize report");

    let listed: Vec<&str> = json["domains"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["domain"].as_str().unwrap())
        .collect();
    assert_eq!(
        listed,
        vec!["environmental", "agricultural", "health", "network", "retail", "weather"]
    );
    assert_eq!(json["success"], true);
}

#[test]
fn normalized_record_round_trips_through_json() {
    let mut payload = Payload::new();
    payload.insert("temperature_celsius".to_string(), PayloadValue::Number(21.5));
    payload.insert("conditions".to_string(), PayloadValue::Text("Clear".to_string()));
    let record = NormalizedRecord::new(
        DeviceId::from_path("weather-station-oakland-1").unwrap(),
        1_640_995_200,
        Domain::Weather,
        payload,
    )
    .with_data_quality(1.0);

    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"domain\":\"weather\""));
    assert!(json.contains("\"device_id\":\"did:lcore:weather-station-oakland-1\""));
    let back: NormalizedRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}

#[test]
fn invalid_device_id_is_rejected_on_deserialize() {
    let json = r#"{"device_id":"tower-1","timestamp":0,"domain":"network","payload":{}}"#;
    assert!(serde_json::from_str::<NormalizedRecord>(json).is_err());
}

#[test]
fn catalog_entry_derives_category_from_domain() {
    let entry = DeviceCatalogEntry::new(
        DeviceId::from_path("env-101-water").unwrap(),
        Domain::Environmental,
    );
    assert_eq!(entry.category, Category::Environmental);
}

#[test]
fn validation_result_counts_by_kind() {
    let result = ValidationResult::from_violations(vec![
        Violation::new(ViolationKind::DeniedField, "Location present").with_field("Location"),
        Violation::new(ViolationKind::MissingField, "steps_count missing").at_record(3, "x"),
        Violation::new(ViolationKind::DeniedField, "latitude present"),
    ]);
    assert!(!result.ok);
    assert_eq!(result.violation_count(), 3);
    assert_eq!(result.count_of(ViolationKind::DeniedField), 2);
    assert_eq!(result.violations[1].record_index, Some(3));

    assert!(ValidationResult::from_violations(Vec::new()).ok);
}
