use std::path::Path;

use anyhow::{Context, Result};
use lcore_core::{OwnershipRun, PipelineContext, category_counts, run_ownership, run_pipeline};
use lcore_report::{write_ownership_artifacts, write_run_artifacts};
use lcore_standards::load_config;
use lcore_transform::default_registry;
use lcore_wallet::DistributionPlan;
use tracing::{info, info_span, warn};

use crate::cli::{ConfigArgs, RunArgs};
use crate::summary::domains_table;
use crate::types::{OwnershipOutcome, RunOutcome};

/// Output directory name used when `--output-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

pub fn run_domains(args: &ConfigArgs) -> Result<()> {
    let loaded = load_config(args.config.as_deref()).context("load configuration")?;
    println!("{}", domains_table(&loaded.config));
    Ok(())
}

pub fn run_check_config(args: &ConfigArgs) -> Result<()> {
    let loaded = load_config(args.config.as_deref()).context("load configuration")?;
    let plan = DistributionPlan::from_config(&loaded.config.ownership)
        .context("read distribution plan")?;
    let ownership = &loaded.config.ownership;
    println!("Configuration: {}", loaded.origin);
    println!("SHA-256: {}", loaded.sha256);
    println!("Domains: {}", loaded.config.domains.len());
    println!(
        "Ownership plan: {plan} ({} devices on {} of {} wallets)",
        plan.devices_required(),
        plan.wallets_required(),
        ownership.wallet_count
    );
    if let Some(expected) = ownership.expected_devices {
        println!("Expected devices: {expected}");
    }
    println!("OK");
    Ok(())
}

pub fn run(args: &RunArgs, log_data: bool) -> Result<RunOutcome> {
    let loaded = load_config(args.config.config.as_deref()).context("load configuration")?;
    let span = info_span!("pipeline", config = %loaded.origin);
    let _guard = span.enter();
    info!(sha256 = %loaded.sha256, data_dir = %args.data_dir.display(), "configuration ready");

    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.data_dir.join(DEFAULT_OUTPUT_DIR));
    let context = PipelineContext::new(loaded.config, args.data_dir.clone())
        .with_config_sha256(loaded.sha256)
        .with_log_data(log_data);
    let run = run_pipeline(&context, default_registry());

    let mut errors: Vec<String> = run
        .report
        .domains
        .iter()
        .filter_map(|domain| {
            domain.failure.as_ref().map(|failure| {
                format!("{}: {} failed: {}", domain.domain, failure.stage, failure.message)
            })
        })
        .collect();

    let artifacts = if args.dry_run {
        info!("dry run, no files written");
        None
    } else {
        let artifacts =
            write_run_artifacts(&output_dir, &run.report, &run.accepted, &run.catalog)
                .with_context(|| format!("write run artifacts to {}", output_dir.display()))?;
        Some(artifacts)
    };

    let ownership = if args.skip_ownership {
        None
    } else if !run.success() {
        let failed = run.report.failed_domains().len();
        warn!(failed, "ownership step skipped");
        errors.push(format!(
            "ownership skipped: {failed} domain(s) failed, the device catalog is incomplete"
        ));
        None
    } else {
        match run_ownership(&run.catalog, &context.config.ownership, args.wallet_seed) {
            Ok(ownership) => Some(finish_ownership(&output_dir, &ownership, args.dry_run)?),
            Err(error) => {
                warn!(error = %format!("{error:#}"), "ownership step failed");
                errors.push(format!("ownership: {error:#}"));
                None
            }
        }
    };

    Ok(RunOutcome {
        output_dir,
        categories: category_counts(&run.catalog),
        report: run.report,
        artifacts,
        ownership,
        errors,
    })
}

fn finish_ownership(
    output_dir: &Path,
    ownership: &OwnershipRun,
    dry_run: bool,
) -> Result<OwnershipOutcome> {
    let artifacts = if dry_run {
        None
    } else {
        let artifacts = write_ownership_artifacts(
            output_dir,
            &ownership.wallets,
            &ownership.assignment,
            &ownership.summary,
        )
        .with_context(|| format!("write ownership artifacts to {}", output_dir.display()))?;
        Some(artifacts)
    };
    Ok(OwnershipOutcome {
        wallets: ownership.wallets.len(),
        wallets_used: ownership.plan.wallets_required(),
        plan: ownership.plan.to_string(),
        shape: ownership.assignment.shape(),
        artifacts,
    })
}
