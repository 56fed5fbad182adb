//! The ownership distribution plan: how many wallets own exactly `k` devices.

use std::collections::BTreeMap;
use std::fmt;

use lcore_standards::OwnershipConfig;

use crate::error::PlanMismatchError;

/// Bucket size (devices per wallet) to number of wallets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionPlan {
    buckets: BTreeMap<usize, usize>,
}

impl DistributionPlan {
    /// Build a plan from `(devices_per_wallet, wallet_count)` pairs.
    ///
    /// Repeated bucket sizes are merged; buckets with no wallets are ignored.
    /// Both totals must fit in `usize`, so the accessors below never overflow.
    pub fn new(
        entries: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, PlanMismatchError> {
        let mut buckets: BTreeMap<usize, usize> = BTreeMap::new();
        let mut devices = 0usize;
        let mut wallets = 0usize;
        for (size, count) in entries {
            if size == 0 {
                return Err(PlanMismatchError::ZeroBucket);
            }
            if count == 0 {
                continue;
            }
            devices = size
                .checked_mul(count)
                .and_then(|placed| devices.checked_add(placed))
                .ok_or(PlanMismatchError::Overflow)?;
            wallets = wallets.checked_add(count).ok_or(PlanMismatchError::Overflow)?;
            *buckets.entry(size).or_default() += count;
        }
        Ok(Self { buckets })
    }

    pub fn from_config(config: &OwnershipConfig) -> lcore_standards::Result<Self> {
        let entries = config.plan_entries()?;
        Self::new(entries).map_err(|error| lcore_standards::ConfigError::Invalid {
            scope: "ownership.plan".to_string(),
            message: error.to_string(),
        })
    }

    /// `Σ k · count_k`.
    pub fn devices_required(&self) -> usize {
        self.buckets.iter().map(|(size, count)| size * count).sum()
    }

    /// `Σ count_k`.
    pub fn wallets_required(&self) -> usize {
        self.buckets.values().sum()
    }

    /// Buckets from the largest size to the smallest.
    pub fn largest_first(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.buckets.iter().rev().map(|(size, count)| (*size, *count))
    }

    pub fn wallets_with(&self, size: usize) -> usize {
        self.buckets.get(&size).copied().unwrap_or_default()
    }

    /// Fail unless the plan places exactly `devices` devices on at most `wallets` wallets.
    pub fn check(&self, devices: usize, wallets: usize) -> Result<(), PlanMismatchError> {
        let planned = self.devices_required();
        if planned != devices {
            return Err(PlanMismatchError::DeviceCount {
                planned,
                actual: devices,
            });
        }
        let needed = self.wallets_required();
        if needed > wallets {
            return Err(PlanMismatchError::WalletShortfall {
                needed,
                available: wallets,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DistributionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (index, (size, count)) in self.buckets.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{size}: {count}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_and_order() {
        let plan = DistributionPlan::new([(1, 45), (3, 2), (2, 8)]).unwrap();
        assert_eq!(plan.devices_required(), 67);
        assert_eq!(plan.wallets_required(), 55);
        assert_eq!(
            plan.largest_first().collect::<Vec<_>>(),
            vec![(3, 2), (2, 8), (1, 45)]
        );
        assert_eq!(plan.to_string(), "{1: 45, 2: 8, 3: 2}");
    }

    #[test]
    fn rejects_zero_bucket() {
        assert_eq!(
            DistributionPlan::new([(0, 3)]).unwrap_err(),
            PlanMismatchError::ZeroBucket
        );
    }

    #[test]
    fn rejects_totals_that_overflow() {
        assert_eq!(
            DistributionPlan::new([(1 << 62, 8)]).unwrap_err(),
            PlanMismatchError::Overflow
        );
        assert_eq!(
            DistributionPlan::new([(1, usize::MAX), (2, 1)]).unwrap_err(),
            PlanMismatchError::Overflow
        );
        let plan = DistributionPlan::new([(1 << 20, 8)]).unwrap();
        assert_eq!(
            plan.check(67, 100).unwrap_err(),
            PlanMismatchError::DeviceCount {
                planned: 8 << 20,
                actual: 67
            }
        );
    }

    #[test]
    fn merges_and_skips_empty_buckets() {
        let plan = DistributionPlan::new([(2, 1), (2, 3), (5, 0)]).unwrap();
        assert_eq!(plan.wallets_with(2), 4);
        assert_eq!(plan.wallets_with(5), 0);
        assert_eq!(plan.to_string(), "{2: 4}");
    }

    #[test]
    fn check_reports_mismatch() {
        let plan = DistributionPlan::new([(1, 2), (2, 1)]).unwrap();
        assert!(plan.check(4, 3).is_ok());
        assert_eq!(
            plan.check(5, 3).unwrap_err(),
            PlanMismatchError::DeviceCount {
                planned: 4,
                actual: 5
            }
        );
        assert_eq!(
            plan.check(4, 2).unwrap_err(),
            PlanMismatchError::WalletShortfall {
                needed: 3,
                available: 2
            }
        );
    }
}
