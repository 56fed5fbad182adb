//! Runs every domain through load, transform and validate.
//!
//! Domains are processed in their fixed order. A failing domain is recorded
//! in the run report and never stops its siblings.

use std::collections::BTreeMap;
use std::time::Instant;

use lcore_model::{
    DeviceCatalogEntry, Domain, DomainReport, FailureStage, NormalizedRecord, RunReport,
};
use lcore_transform::TransformerRegistry;
use lcore_validate::{DomainSchema, validate};
use tracing::{info, info_span, warn};

use crate::catalog::build_catalog;
use crate::pipeline_context::PipelineContext;
use crate::sources::load_sources;

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub report: RunReport,
    /// Records of the domains that passed validation.
    pub accepted: BTreeMap<Domain, Vec<NormalizedRecord>>,
    /// Devices of the accepted domains.
    pub catalog: Vec<DeviceCatalogEntry>,
}

impl PipelineRun {
    pub fn success(&self) -> bool {
        self.report.success
    }
}

pub fn run_pipeline(context: &PipelineContext, registry: &TransformerRegistry) -> PipelineRun {
    let run_span = info_span!("run", data_dir = %context.data_dir().display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let mut reports = Vec::with_capacity(Domain::ALL.len());
    let mut accepted = BTreeMap::new();
    for domain in Domain::ALL {
        let (report, records) = process_domain(context, registry, domain);
        if let Some(records) = records {
            accepted.insert(domain, records);
        }
        reports.push(report);
    }

    let catalog = build_catalog(&accepted);
    let mut report = RunReport::new(
        context.run_time.to_rfc3339(),
        context.run_time.timestamp(),
        reports,
    );
    if let Some(sha256) = &context.config_sha256 {
        report = report.with_config_sha256(sha256.clone());
    }
    info!(
        success = report.success,
        records = report.total_records,
        dropped = report.total_dropped_rows,
        pii_values_removed = report.total_pii_values_removed,
        devices = catalog.len(),
        duration_ms = start.elapsed().as_millis(),
        "pipeline complete"
    );
    PipelineRun {
        report,
        accepted,
        catalog,
    }
}

/// Load, transform and validate one domain. Records are returned only when
/// the domain passed every stage.
pub fn process_domain(
    context: &PipelineContext,
    registry: &TransformerRegistry,
    domain: Domain,
) -> (DomainReport, Option<Vec<NormalizedRecord>>) {
    let domain_span = info_span!("domain", domain = %domain);
    let _domain_guard = domain_span.enter();
    let start = Instant::now();
    let mut report = DomainReport::pending(domain);

    let Some(config) = context.config.domain(domain) else {
        report.fail(FailureStage::Load, "domain missing from configuration");
        return (report, None);
    };

    let sources = match load_sources(context.data_dir(), config) {
        Ok(sources) => sources,
        Err(error) => {
            warn!(error = %format!("{error:#}"), "domain failed to load");
            report.fail(FailureStage::Load, format!("{error:#}"));
            return (report, None);
        }
    };
    report.input_rows = sources.row_count();

    let Some(transformer) = registry.get(domain) else {
        report.fail(FailureStage::Transform, "no transformer registered");
        return (report, None);
    };
    let output = match transformer.transform(&sources, config, &context.transform_context()) {
        Ok(output) => output,
        Err(error) => {
            if let Some((dropped, _)) = error.drop_counts() {
                report.dropped_rows = dropped;
            }
            warn!(error = %error, "domain failed to transform");
            report.fail(FailureStage::Transform, error.to_string());
            return (report, None);
        }
    };
    report.input_rows = output.stats.input_rows;
    report.output_rows = output.records.len();
    report.dropped_rows = output.stats.dropped_rows;
    report.pii_columns_removed = output.stats.pii_columns_removed.iter().cloned().collect();
    report.pii_values_removed = output.stats.pii_values_removed;
    report.device_count = output.device_count();

    let schema = match DomainSchema::from_config(config) {
        Ok(schema) => schema,
        Err(error) => {
            report.fail(FailureStage::Validate, error.to_string());
            return (report, None);
        }
    };
    let result = validate(&output.records, &schema, &context.validation_context());
    let violation_count = result.violation_count();
    report.violations = result.violations;
    if !result.ok {
        warn!(violations = violation_count, "domain failed validation");
        report.fail(
            FailureStage::Validate,
            format!("{violation_count} schema violations"),
        );
        return (report, None);
    }

    info!(
        input_rows = report.input_rows,
        output_rows = report.output_rows,
        dropped_rows = report.dropped_rows,
        devices = report.device_count,
        duration_ms = start.elapsed().as_millis(),
        "domain complete"
    );
    (report, Some(output.records))
}
