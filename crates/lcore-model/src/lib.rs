//! Shared data model for the L{CORE} IoT dataset pipeline.
//!
//! Every crate in the workspace speaks in these types: the six fixed
//! [`Domain`] tags, the [`NormalizedRecord`] emitted by transformers, the
//! device catalog, wallets, validation results and the consolidated
//! [`RunReport`].

pub mod catalog;
pub mod enums;
pub mod error;
pub mod ids;
pub mod record;
pub mod report;
pub mod validation;
pub mod wallet;

pub use catalog::DeviceCatalogEntry;
pub use enums::{Category, Domain};
pub use error::{ModelError, Result};
pub use ids::{DID_PREFIX, DeviceId, WalletId};
pub use record::{NormalizedRecord, Payload, PayloadValue};
pub use report::{DomainFailure, DomainReport, DomainStatus, FailureStage, RunReport};
pub use validation::{ValidationResult, Violation, ViolationKind};
pub use wallet::Wallet;
