//! Wallet pool generation.
//!
//! Each wallet is an Ed25519 key-pair. The address is `0x` followed by the
//! hex of the last 20 bytes of SHA-256 over the public key; the private key
//! is the 32-byte secret as `0x`-prefixed hex.

use std::collections::HashSet;

use ed25519_dalek::{SigningKey, VerifyingKey};
use lcore_model::{Wallet, WalletId};
use rand::rngs::{OsRng, StdRng};
use rand::{CryptoRng, RngCore, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::WalletError;

const ADDRESS_BYTES: usize = 20;
/// Extra draws allowed per wallet before giving up on duplicates.
const RETRIES_PER_WALLET: usize = 8;

/// `0x` + hex of the trailing 20 bytes of SHA-256(public key).
pub fn derive_address(key: &VerifyingKey) -> String {
    let digest = Sha256::digest(key.as_bytes());
    format!("0x{}", hex::encode(&digest[digest.len() - ADDRESS_BYTES..]))
}

fn wallet_from_key(wallet_id: WalletId, key: &SigningKey) -> Wallet {
    Wallet {
        wallet_id,
        address: derive_address(&key.verifying_key()),
        private_key: format!("0x{}", hex::encode(key.to_bytes())),
    }
}

/// Generate exactly `count` wallets numbered `1..=count` from `rng`.
///
/// A key-pair whose address or secret repeats an earlier one is discarded
/// and drawn again.
pub fn generate_wallets<R>(count: usize, rng: &mut R) -> Result<Vec<Wallet>, WalletError>
where
    R: RngCore + CryptoRng,
{
    if count == 0 {
        return Err(WalletError::EmptyPool);
    }
    let max_attempts = count.saturating_mul(RETRIES_PER_WALLET + 1);
    let mut wallets = Vec::with_capacity(count);
    let mut addresses = HashSet::with_capacity(count);
    let mut secrets = HashSet::with_capacity(count);
    let mut attempts = 0usize;

    while wallets.len() < count {
        if attempts == max_attempts {
            return Err(WalletError::DuplicateKeys {
                requested: count,
                attempts,
            });
        }
        attempts += 1;
        let key = SigningKey::generate(rng);
        let next_id = u32::try_from(wallets.len() + 1).unwrap_or(u32::MAX);
        let wallet = wallet_from_key(WalletId::new(next_id), &key);
        if addresses.contains(&wallet.address) || secrets.contains(&wallet.private_key) {
            debug!(wallet = %wallet.wallet_id, "regenerating duplicate key-pair");
            continue;
        }
        addresses.insert(wallet.address.clone());
        secrets.insert(wallet.private_key.clone());
        wallets.push(wallet);
    }
    info!(wallets = wallets.len(), attempts, "wallet pool generated");
    Ok(wallets)
}

/// Reproducible pool: the same seed yields the same wallets.
pub fn generate_seeded(count: usize, seed: u64) -> Result<Vec<Wallet>, WalletError> {
    generate_wallets(count, &mut StdRng::seed_from_u64(seed))
}

/// Pool drawn from the operating system's entropy source.
pub fn generate_random(count: usize) -> Result<Vec<Wallet>, WalletError> {
    generate_wallets(count, &mut OsRng)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Repeats the same 32 bytes for the first `repeats` keys, then counts up.
    struct StutteringRng {
        repeats: usize,
        calls: usize,
    }

    impl RngCore for StutteringRng {
        fn next_u32(&mut self) -> u32 {
            0
        }

        fn next_u64(&mut self) -> u64 {
            0
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let fill = if self.calls < self.repeats {
                7
            } else {
                (self.calls + 100) as u8
            };
            self.calls += 1;
            dest.fill(fill);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for StutteringRng {}

    #[test]
    fn address_and_key_formats() {
        let wallets = generate_seeded(3, 42).unwrap();
        for wallet in &wallets {
            assert_eq!(wallet.address.len(), 2 + 40);
            assert!(wallet.address.starts_with("0x"));
            assert_eq!(wallet.private_key.len(), 2 + 64);
            assert!(wallet.private_key[2..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }

    #[test]
    fn duplicate_draws_are_regenerated() {
        let mut rng = StutteringRng {
            repeats: 3,
            calls: 0,
        };
        let wallets = generate_wallets(2, &mut rng).unwrap();
        assert_eq!(wallets.len(), 2);
        assert_ne!(wallets[0].address, wallets[1].address);
        assert_eq!(wallets[1].wallet_id, WalletId::new(2));
        assert_eq!(rng.calls, 4);
    }

    #[test]
    fn gives_up_on_a_stuck_source() {
        let mut rng = StutteringRng {
            repeats: usize::MAX,
            calls: 0,
        };
        let err = generate_wallets(2, &mut rng).unwrap_err();
        assert!(matches!(err, WalletError::DuplicateKeys { requested: 2, .. }));
    }
}
