//! Ownership assignment over generated wallet pools.

use std::collections::{BTreeMap, HashSet};

use lcore_model::{Category, DeviceCatalogEntry, DeviceId, Domain, WalletId};
use lcore_wallet::{
    DistributionPlan, PlanMismatchError, WalletError, assign, generate_seeded, summarize,
};
use proptest::prelude::*;

fn catalog(count: usize) -> Vec<DeviceCatalogEntry> {
    (0..count)
        .map(|index| {
            let domain = Domain::ALL[index % Domain::ALL.len()];
            let path = format!("{}-{index}", domain.as_str());
            DeviceCatalogEntry::new(DeviceId::from_path(&path).unwrap(), domain)
        })
        .collect()
}

#[test]
fn reference_plan_over_sixty_seven_devices() {
    let devices = catalog(67);
    let wallets = generate_seeded(100, 7).unwrap();
    let plan = DistributionPlan::new([(1, 45), (2, 8), (3, 2)]).unwrap();
    let assignment = assign(&devices, &wallets, &plan).unwrap();

    assert_eq!(assignment.entries.len(), 67);
    assert_eq!(
        assignment.shape(),
        BTreeMap::from([(0, 45), (1, 45), (2, 8), (3, 2)])
    );

    // Largest bucket first, wallets popped from the front of the pool.
    assert_eq!(assignment.device_count(WalletId::new(1)), 3);
    assert_eq!(assignment.device_count(WalletId::new(2)), 3);
    assert_eq!(assignment.device_count(WalletId::new(3)), 2);
    assert_eq!(assignment.device_count(WalletId::new(10)), 2);
    assert_eq!(assignment.device_count(WalletId::new(11)), 1);
    assert_eq!(assignment.device_count(WalletId::new(55)), 1);
    assert_eq!(assignment.device_count(WalletId::new(56)), 0);
    assert_eq!(assignment.device_count(WalletId::new(100)), 0);

    let first: Vec<&str> = assignment
        .devices_of(WalletId::new(1))
        .map(|device| device.device_id.as_str())
        .collect();
    assert_eq!(
        first,
        vec![
            "did:lcore:environmental-0",
            "did:lcore:agricultural-1",
            "did:lcore:health-2"
        ]
    );
    assert_eq!(
        assignment.wallet_of(&devices[66].device_id),
        Some(WalletId::new(55))
    );
}

#[test]
fn assignment_is_deterministic() {
    let devices = catalog(12);
    let wallets = generate_seeded(10, 1).unwrap();
    let plan = DistributionPlan::new([(1, 4), (2, 2), (4, 1)]).unwrap();
    assert_eq!(
        assign(&devices, &wallets, &plan).unwrap(),
        assign(&devices, &wallets, &plan).unwrap()
    );
}

#[test]
fn plan_mismatch_is_reported() {
    let wallets = generate_seeded(3, 1).unwrap();
    let plan = DistributionPlan::new([(1, 2), (2, 1)]).unwrap();
    assert_eq!(
        assign(&catalog(5), &wallets, &plan).unwrap_err(),
        PlanMismatchError::DeviceCount {
            planned: 4,
            actual: 5
        }
    );
    assert_eq!(
        assign(&catalog(4), &wallets[..2], &plan).unwrap_err(),
        PlanMismatchError::WalletShortfall {
            needed: 3,
            available: 2
        }
    );
}

#[test]
fn seeded_pools_are_reproducible_and_distinct() {
    let first = generate_seeded(100, 2024).unwrap();
    let second = generate_seeded(100, 2024).unwrap();
    let other = generate_seeded(100, 2025).unwrap();
    assert_eq!(first, second);
    assert_ne!(first[0].address, other[0].address);

    let addresses: HashSet<&str> = first.iter().map(|w| w.address.as_str()).collect();
    let keys: HashSet<&str> = first.iter().map(|w| w.private_key.as_str()).collect();
    assert_eq!(addresses.len(), 100);
    assert_eq!(keys.len(), 100);
    let ids: Vec<u32> = first.iter().map(|w| w.wallet_id.get()).collect();
    assert_eq!(ids, (1..=100).collect::<Vec<_>>());
}

#[test]
fn empty_pool_is_rejected() {
    assert_eq!(generate_seeded(0, 1).unwrap_err(), WalletError::EmptyPool);
}

#[test]
fn summary_counts_categories_and_marks_empty_wallets() {
    let devices = catalog(8);
    let wallets = generate_seeded(5, 3).unwrap();
    let plan = DistributionPlan::new([(1, 2), (6, 1)]).unwrap();
    let assignment = assign(&devices, &wallets, &plan).unwrap();
    let summary = summarize(&assignment, &wallets);

    assert_eq!(summary.len(), 5);
    assert_eq!(summary[0].total_devices, 6);
    assert_eq!(summary[0].count(Category::Environmental), 1);
    assert_eq!(summary[0].count(Category::Weather), 1);
    assert_eq!(summary[0].address, wallets[0].address);
    assert!(summary[0].device_list().starts_with("did:lcore:environmental-0; "));
    assert_eq!(summary[1].device_list(), "did:lcore:environmental-6");
    assert_eq!(summary[2].device_list(), "did:lcore:agricultural-7");
    assert_eq!(summary[3].device_list(), "None");
    assert_eq!(summary[4].total_devices, 0);
}

fn plan_entries() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((1usize..6, 0usize..8), 0..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: a satisfiable plan assigns every device exactly once and
    /// produces exactly the planned per-wallet shape.
    #[test]
    fn prop_assignment_matches_plan(entries in plan_entries(), spare in 0usize..6) {
        let plan = DistributionPlan::new(entries).unwrap();
        let devices = catalog(plan.devices_required());
        let wallets = generate_seeded(plan.wallets_required() + spare + 1, 9).unwrap();
        let assignment = assign(&devices, &wallets, &plan).unwrap();

        prop_assert_eq!(assignment.entries.len(), devices.len());
        let assigned: HashSet<&DeviceId> =
            assignment.entries.iter().map(|entry| &entry.device.device_id).collect();
        prop_assert_eq!(assigned.len(), devices.len());

        let shape = assignment.shape();
        for (size, count) in plan.largest_first() {
            prop_assert_eq!(shape.get(&size).copied().unwrap_or_default(), count);
        }
        let used: usize = shape.iter().filter(|(size, _)| **size > 0).map(|(_, n)| n).sum();
        prop_assert_eq!(used, plan.wallets_required());
        prop_assert_eq!(assignment.wallet_totals.len(), wallets.len());
    }

    /// Property: a device count off by any amount is rejected.
    #[test]
    fn prop_wrong_device_count_is_rejected(entries in plan_entries(), delta in 1usize..5) {
        let plan = DistributionPlan::new(entries).unwrap();
        let wallets = generate_seeded(plan.wallets_required() + 1, 9).unwrap();
        let devices = catalog(plan.devices_required() + delta);
        let is_device_count = matches!(
            assign(&devices, &wallets, &plan),
            Err(PlanMismatchError::DeviceCount { .. })
        );
        prop_assert!(is_device_count);
    }

    /// Property: more planned wallets than the pool holds is rejected.
    #[test]
    fn prop_wallet_shortfall_is_rejected(entries in plan_entries()) {
        let plan = DistributionPlan::new(entries).unwrap();
        prop_assume!(plan.wallets_required() >= 2);
        let wallets = generate_seeded(plan.wallets_required() - 1, 9).unwrap();
        let devices = catalog(plan.devices_required());
        prop_assert_eq!(
            assign(&devices, &wallets, &plan).unwrap_err(),
            PlanMismatchError::WalletShortfall {
                needed: plan.wallets_required(),
                available: plan.wallets_required() - 1,
            }
        );
    }
}
