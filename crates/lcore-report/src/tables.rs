//! Catalog, wallet pool and ownership tables.

use std::path::Path;

use lcore_model::{Category, DeviceCatalogEntry, Wallet};
use lcore_wallet::{OwnershipAssignment, WalletSummary};
use serde::Serialize;
use tracing::info;

use crate::common::create_file;
use crate::error::{ReportError, Result};

#[derive(Serialize)]
struct CatalogRow<'a> {
    device_id: &'a str,
    domain: &'static str,
    category: &'static str,
}

#[derive(Serialize)]
struct WalletRow<'a> {
    wallet_id: String,
    wallet_address: &'a str,
    private_key: &'a str,
}

#[derive(Serialize)]
struct MappingRow<'a> {
    wallet_id: String,
    wallet_address: &'a str,
    private_key: &'a str,
    device_id: &'a str,
    device_category: &'static str,
    devices_owned: usize,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    wallet_id: String,
    wallet_address: &'a str,
    total_devices: usize,
    agricultural_devices: usize,
    environmental_devices: usize,
    health_devices: usize,
    network_devices: usize,
    retail_devices: usize,
    weather_devices: usize,
    device_list: String,
}

fn write_rows<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<usize> {
    let csv_error = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_writer(create_file(path)?);
    let mut count = 0usize;
    for row in rows {
        writer.serialize(row).map_err(csv_error)?;
        count += 1;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), rows = count, "table written");
    Ok(count)
}

/// `device_id,domain,category`, catalog order.
pub fn write_catalog(path: &Path, catalog: &[DeviceCatalogEntry]) -> Result<usize> {
    write_rows(
        path,
        catalog.iter().map(|entry| CatalogRow {
            device_id: entry.device_id.as_str(),
            domain: entry.domain.as_str(),
            category: entry.category.as_str(),
        }),
    )
}

/// The wallet pool, private keys included.
pub fn write_wallets(path: &Path, wallets: &[Wallet]) -> Result<usize> {
    write_rows(
        path,
        wallets.iter().map(|wallet| WalletRow {
            wallet_id: wallet.wallet_id.label(),
            wallet_address: &wallet.address,
            private_key: &wallet.private_key,
        }),
    )
}

/// One row per assigned device, wallets in pool order.
pub fn write_mapping(
    path: &Path,
    wallets: &[Wallet],
    assignment: &OwnershipAssignment,
) -> Result<usize> {
    let rows = wallets.iter().flat_map(|wallet| {
        let owned = assignment.device_count(wallet.wallet_id);
        assignment
            .devices_of(wallet.wallet_id)
            .map(move |device| MappingRow {
                wallet_id: wallet.wallet_id.label(),
                wallet_address: &wallet.address,
                private_key: &wallet.private_key,
                device_id: device.device_id.as_str(),
                device_category: device.category.as_str(),
                devices_owned: owned,
            })
    });
    write_rows(path, rows)
}

/// One row per wallet with device counts by category.
pub fn write_summary(path: &Path, summary: &[WalletSummary]) -> Result<usize> {
    write_rows(
        path,
        summary.iter().map(|row| SummaryRow {
            wallet_id: row.wallet_id.label(),
            wallet_address: &row.address,
            total_devices: row.total_devices,
            agricultural_devices: row.count(Category::Agricultural),
            environmental_devices: row.count(Category::Environmental),
            health_devices: row.count(Category::Health),
            network_devices: row.count(Category::Network),
            retail_devices: row.count(Category::Retail),
            weather_devices: row.count(Category::Weather),
            device_list: row.device_list(),
        }),
    )
}
