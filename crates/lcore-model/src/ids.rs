use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// DID method prefix shared by every device identifier.
pub const DID_PREFIX: &str = "did:lcore:";

/// A decentralized device identifier (`did:lcore:<path>`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceId(String);

impl DeviceId {
    /// Build an identifier from the domain-specific path (`env-101-air`).
    pub fn from_path(path: &str) -> Result<Self, ModelError> {
        Self::new(format!("{DID_PREFIX}{path}"))
    }

    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let Some(path) = value.strip_prefix(DID_PREFIX) else {
            return Err(ModelError::InvalidDeviceId {
                value,
                reason: "missing did:lcore: prefix",
            });
        };
        if path.is_empty() {
            return Err(ModelError::InvalidDeviceId {
                value,
                reason: "empty path",
            });
        }
        if !path
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
        {
            return Err(ModelError::InvalidDeviceId {
                value,
                reason: "path must be ASCII alphanumerics and dashes",
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after `did:lcore:`.
    pub fn path(&self) -> &str {
        &self.0[DID_PREFIX.len()..]
    }
}

impl TryFrom<String> for DeviceId {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DeviceId> for String {
    fn from(value: DeviceId) -> Self {
        value.0
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequence number of a generated wallet, starting at 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WalletId(u32);

impl WalletId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// Zero-padded label used in artifacts (`wallet_007`).
    pub fn label(&self) -> String {
        format!("wallet_{:03}", self.0)
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_requires_prefix_and_clean_path() {
        let id = DeviceId::from_path("env-101-air").unwrap();
        assert_eq!(id.as_str(), "did:lcore:env-101-air");
        assert_eq!(id.path(), "env-101-air");

        assert!(DeviceId::new("env-101-air").is_err());
        assert!(DeviceId::new("did:lcore:").is_err());
        assert!(DeviceId::from_path("retail-power & light").is_err());
    }

    #[test]
    fn wallet_label_is_zero_padded() {
        assert_eq!(WalletId::new(7).label(), "wallet_007");
        assert_eq!(WalletId::new(100).to_string(), "wallet_100");
    }
}
