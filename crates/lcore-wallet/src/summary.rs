//! Per-wallet ownership summary.

use std::collections::BTreeMap;

use lcore_model::{Category, DeviceId, Wallet, WalletId};

use crate::assign::OwnershipAssignment;

/// Placeholder device list of a wallet that owns nothing.
pub const EMPTY_DEVICE_LIST: &str = "None";
pub const DEVICE_LIST_SEPARATOR: &str = "; ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletSummary {
    pub wallet_id: WalletId,
    pub address: String,
    pub total_devices: usize,
    pub by_category: BTreeMap<Category, usize>,
    pub device_ids: Vec<DeviceId>,
}

impl WalletSummary {
    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or_default()
    }

    /// Device ids joined with `"; "`, or `None` for an empty wallet.
    pub fn device_list(&self) -> String {
        if self.device_ids.is_empty() {
            EMPTY_DEVICE_LIST.to_string()
        } else {
            self.device_ids
                .iter()
                .map(DeviceId::as_str)
                .collect::<Vec<_>>()
                .join(DEVICE_LIST_SEPARATOR)
        }
    }
}

/// One summary row per wallet, in pool order.
pub fn summarize(assignment: &OwnershipAssignment, wallets: &[Wallet]) -> Vec<WalletSummary> {
    wallets
        .iter()
        .map(|wallet| {
            let mut by_category = BTreeMap::new();
            let mut device_ids = Vec::new();
            for device in assignment.devices_of(wallet.wallet_id) {
                *by_category.entry(device.category).or_default() += 1;
                device_ids.push(device.device_id.clone());
            }
            WalletSummary {
                wallet_id: wallet.wallet_id,
                address: wallet.address.clone(),
                total_devices: device_ids.len(),
                by_category,
                device_ids,
            }
        })
        .collect()
}
