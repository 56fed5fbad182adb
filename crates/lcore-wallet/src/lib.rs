//! Synthetic wallets and device ownership.
//!
//! A fixed-size pool of Ed25519 wallets is generated (seeded for
//! reproducible runs) and the device catalog is distributed across it
//! according to a [`DistributionPlan`]. Assignment itself uses no
//! randomness.

#![deny(unsafe_code)]

pub mod assign;
pub mod error;
pub mod generator;
pub mod plan;
pub mod summary;

pub use assign::{DeviceOwnership, OwnershipAssignment, assign};
pub use error::{PlanMismatchError, WalletError};
pub use generator::{derive_address, generate_random, generate_seeded, generate_wallets};
pub use plan::DistributionPlan;
pub use summary::{DEVICE_LIST_SEPARATOR, EMPTY_DEVICE_LIST, WalletSummary, summarize};
