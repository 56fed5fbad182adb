use std::fmt;

use serde::{Deserialize, Serialize};

use crate::WalletId;

/// A synthetic key-pair used to seed the marketplace demo.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub wallet_id: WalletId,
    /// `0x`-prefixed hex address.
    pub address: String,
    /// `0x`-prefixed hex secret key.
    pub private_key: String,
}

// Keeps secret keys out of logs and panic messages.
impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("wallet_id", &self.wallet_id)
            .field("address", &self.address)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_private_key() {
        let wallet = Wallet {
            wallet_id: WalletId::new(1),
            address: "0xabc".to_string(),
            private_key: "0xsecret".to_string(),
        };
        let rendered = format!("{wallet:?}");
        assert!(rendered.contains("0xabc"));
        assert!(!rendered.contains("0xsecret"));
    }
}
