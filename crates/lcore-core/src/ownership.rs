//! Wallet pool generation and device ownership for a finished run.

use anyhow::{Context, Result, bail};
use lcore_model::{DeviceCatalogEntry, Wallet};
use lcore_standards::OwnershipConfig;
use lcore_wallet::{
    DistributionPlan, OwnershipAssignment, WalletSummary, assign, generate_random,
    generate_seeded, summarize,
};
use tracing::{info, info_span};

#[derive(Debug, Clone)]
pub struct OwnershipRun {
    pub wallets: Vec<Wallet>,
    pub plan: DistributionPlan,
    pub assignment: OwnershipAssignment,
    pub summary: Vec<WalletSummary>,
}

/// Generate the wallet pool and distribute `catalog` across it.
///
/// `seed` overrides the configured seed; without either the pool is drawn
/// from the operating system's entropy source.
pub fn run_ownership(
    catalog: &[DeviceCatalogEntry],
    config: &OwnershipConfig,
    seed: Option<u64>,
) -> Result<OwnershipRun> {
    let span = info_span!("ownership", devices = catalog.len());
    let _guard = span.enter();

    let plan = DistributionPlan::from_config(config).context("read distribution plan")?;
    if let Some(expected) = config.expected_devices
        && expected != catalog.len()
    {
        bail!(
            "device catalog has {} devices but the ownership plan expects {expected}",
            catalog.len()
        );
    }

    let wallets = match seed.or(config.seed) {
        Some(seed) => generate_seeded(config.wallet_count, seed),
        None => generate_random(config.wallet_count),
    }
    .context("generate wallet pool")?;
    let assignment = assign(catalog, &wallets, &plan).context("assign device ownership")?;
    let summary = summarize(&assignment, &wallets);
    info!(
        wallets = wallets.len(),
        wallets_used = plan.wallets_required(),
        seeded = seed.or(config.seed).is_some(),
        "ownership complete"
    );
    Ok(OwnershipRun {
        wallets,
        plan,
        assignment,
        summary,
    })
}
