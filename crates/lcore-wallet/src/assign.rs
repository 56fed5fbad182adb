//! Deterministic assignment of catalog devices to wallets.

use std::collections::BTreeMap;

use lcore_model::{DeviceCatalogEntry, DeviceId, Wallet, WalletId};
use tracing::info;

use crate::error::PlanMismatchError;
use crate::plan::DistributionPlan;

/// One catalog device and the wallet that owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceOwnership {
    pub wallet_id: WalletId,
    pub device: DeviceCatalogEntry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnershipAssignment {
    /// One entry per catalog device, in assignment order.
    pub entries: Vec<DeviceOwnership>,
    /// Device count of every wallet in the pool, in pool order.
    pub wallet_totals: Vec<(WalletId, usize)>,
}

impl OwnershipAssignment {
    pub fn wallet_of(&self, device_id: &DeviceId) -> Option<WalletId> {
        self.entries
            .iter()
            .find(|entry| &entry.device.device_id == device_id)
            .map(|entry| entry.wallet_id)
    }

    pub fn devices_of(&self, wallet_id: WalletId) -> impl Iterator<Item = &DeviceCatalogEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.wallet_id == wallet_id)
            .map(|entry| &entry.device)
    }

    pub fn device_count(&self, wallet_id: WalletId) -> usize {
        self.wallet_totals
            .iter()
            .find(|(id, _)| *id == wallet_id)
            .map(|(_, total)| *total)
            .unwrap_or_default()
    }

    /// Number of wallets owning exactly `k` devices, for every `k` that
    /// occurs (including 0 for unused wallets).
    pub fn shape(&self) -> BTreeMap<usize, usize> {
        let mut shape = BTreeMap::new();
        for (_, total) in &self.wallet_totals {
            *shape.entry(*total).or_default() += 1;
        }
        shape
    }
}

/// Assign every device to exactly one wallet following `plan`.
///
/// Buckets are taken from the largest size down; each bucket pops its
/// wallets from the front of the remaining pool and hands each the next `k`
/// devices in catalog order. Wallets left over own nothing.
pub fn assign(
    devices: &[DeviceCatalogEntry],
    wallets: &[Wallet],
    plan: &DistributionPlan,
) -> Result<OwnershipAssignment, PlanMismatchError> {
    plan.check(devices.len(), wallets.len())?;

    let mut pool = wallets.iter();
    let mut remaining = devices.iter();
    let mut entries = Vec::with_capacity(devices.len());
    let mut totals: BTreeMap<WalletId, usize> = BTreeMap::new();

    for (size, count) in plan.largest_first() {
        for wallet in pool.by_ref().take(count) {
            for device in remaining.by_ref().take(size) {
                entries.push(DeviceOwnership {
                    wallet_id: wallet.wallet_id,
                    device: device.clone(),
                });
            }
            totals.insert(wallet.wallet_id, size);
        }
    }

    let wallet_totals: Vec<(WalletId, usize)> = wallets
        .iter()
        .map(|wallet| {
            (
                wallet.wallet_id,
                totals.get(&wallet.wallet_id).copied().unwrap_or_default(),
            )
        })
        .collect();
    let assignment = OwnershipAssignment {
        entries,
        wallet_totals,
    };
    info!(
        devices = devices.len(),
        wallets = wallets.len(),
        wallets_used = plan.wallets_required(),
        plan = %plan,
        "ownership assigned"
    );
    Ok(assignment)
}
