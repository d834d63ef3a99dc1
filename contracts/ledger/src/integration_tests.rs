//! Integration Tests
//!
//! End-to-end pool scenarios plus randomized operation sequences that
//! check the accounting invariants after every step.

#[cfg(test)]
mod tests {
    use crate::*;
    use ethpool_common::constants::units::ONE;

    fn owner() -> Address {
        [1u8; 32]
    }

    fn alice() -> Address {
        [2u8; 32]
    }

    fn bob() -> Address {
        [3u8; 32]
    }

    fn team() -> Address {
        [4u8; 32]
    }

    fn create_pool() -> ShareLedger {
        let mut ledger = ShareLedger::new(owner(), PoolConfig::default()).unwrap();
        ledger.grant_reward_role(&owner(), team()).unwrap();
        ledger
    }

    // ============================================================================
    // Deposit Scenarios
    // ============================================================================

    #[test]
    fn test_deposits_accumulate() {
        let mut ledger = create_pool();

        // alice 100, bob 150
        ledger.deposit(&alice(), 100 * ONE).unwrap();
        ledger.deposit(&bob(), 150 * ONE).unwrap();
        assert_eq!(ledger.position(&alice()), 100 * ONE);
        assert_eq!(ledger.position(&bob()), 150 * ONE);
        assert_eq!(ledger.pool_total(), 250 * ONE);

        // alice tops up 180
        ledger.deposit(&alice(), 180 * ONE).unwrap();
        assert_eq!(ledger.position(&alice()), 280 * ONE);
        assert_eq!(ledger.pool_total(), 430 * ONE);

        ledger.check_invariants().unwrap();
    }

    // ============================================================================
    // Withdrawal Scenarios
    // ============================================================================

    #[test]
    fn test_reward_shared_by_both_depositors() {
        // a in 100, b in 300, t in 200 => a out 150, b out 450
        let mut ledger = create_pool();
        let mut hook = RecordingTransfer::new();

        ledger.deposit(&alice(), 100 * ONE).unwrap();
        ledger.deposit(&bob(), 300 * ONE).unwrap();
        ledger.deposit_rewards(&team(), 200 * ONE).unwrap();

        assert_eq!(ledger.pool_total(), 400 * ONE);
        assert_eq!(ledger.pool_balance(), 600 * ONE);
        assert_eq!(ledger.position(&alice()), 100 * ONE);
        assert_eq!(ledger.position(&bob()), 300 * ONE);

        assert_eq!(ledger.withdraw(&alice(), &mut hook).unwrap(), 150 * ONE);
        assert_eq!(ledger.pool_total(), 300 * ONE);
        assert_eq!(ledger.position(&alice()), 0);
        assert_eq!(ledger.position(&bob()), 300 * ONE);

        assert_eq!(ledger.withdraw(&bob(), &mut hook).unwrap(), 450 * ONE);
        assert_eq!(ledger.pool_total(), 0);
        assert_eq!(ledger.pool_balance(), 0);
        assert_eq!(ledger.position(&alice()), 0);
        assert_eq!(ledger.position(&bob()), 0);

        assert_eq!(hook.total_to(&alice()), 150 * ONE);
        assert_eq!(hook.total_to(&bob()), 450 * ONE);
    }

    #[test]
    fn test_late_depositor_gets_no_earlier_reward() {
        // a in 100, t in 200, b in 300 => a out 300, b out 300
        let mut ledger = create_pool();
        let mut hook = RecordingTransfer::new();

        ledger.deposit(&alice(), 100 * ONE).unwrap();
        ledger.deposit_rewards(&team(), 200 * ONE).unwrap();
        ledger.deposit(&bob(), 300 * ONE).unwrap();

        assert_eq!(ledger.withdraw(&alice(), &mut hook).unwrap(), 300 * ONE);
        assert_eq!(ledger.withdraw(&bob(), &mut hook).unwrap(), 300 * ONE);
        assert_eq!(ledger.pool_balance(), 0);
    }

    #[test]
    fn test_withdraw_order_does_not_change_payouts() {
        let mut ledger = create_pool();
        let mut hook = RecordingTransfer::new();

        ledger.deposit(&alice(), 100 * ONE).unwrap();
        ledger.deposit(&bob(), 300 * ONE).unwrap();
        ledger.deposit_rewards(&team(), 200 * ONE).unwrap();

        assert_eq!(ledger.withdraw(&bob(), &mut hook).unwrap(), 450 * ONE);
        assert_eq!(ledger.withdraw(&alice(), &mut hook).unwrap(), 150 * ONE);
    }

    #[test]
    fn test_rewards_across_rounds() {
        let mut ledger = create_pool();
        let mut hook = RecordingTransfer::new();

        // Round 1: alice alone earns 100
        ledger.deposit(&alice(), 100).unwrap();
        ledger.deposit_rewards(&team(), 100).unwrap();

        // Round 2: bob joins at price 2, then 400 is split evenly by shares
        ledger.deposit(&bob(), 200).unwrap();
        assert_eq!(ledger.position(&bob()), 100);
        ledger.deposit_rewards(&team(), 400).unwrap();

        assert_eq!(ledger.withdraw(&alice(), &mut hook).unwrap(), 400);
        assert_eq!(ledger.withdraw(&bob(), &mut hook).unwrap(), 400);
    }

    #[test]
    fn test_rounding_dust_goes_to_last_withdrawer() {
        let mut ledger = create_pool();
        let mut hook = RecordingTransfer::new();
        let carol = [5u8; 32];

        for depositor in [alice(), bob(), carol] {
            ledger.deposit(&depositor, 1).unwrap();
        }
        ledger.deposit_rewards(&team(), 7).unwrap();

        // 10 over 3 shares: 3, 3, then the remaining 4
        assert_eq!(ledger.withdraw(&alice(), &mut hook).unwrap(), 3);
        assert_eq!(ledger.withdraw(&bob(), &mut hook).unwrap(), 3);
        assert_eq!(ledger.withdraw(&carol, &mut hook).unwrap(), 4);
        assert_eq!(ledger.pool_balance(), 0);
    }

    #[test]
    fn test_pool_reusable_after_full_drain() {
        let mut ledger = create_pool();
        let mut hook = RecordingTransfer::new();

        ledger.deposit(&alice(), 100).unwrap();
        ledger.deposit_rewards(&team(), 50).unwrap();
        ledger.withdraw(&alice(), &mut hook).unwrap();

        // Empty again: price resets to 1
        assert_eq!(ledger.deposit(&bob(), 80).unwrap(), 80);
        assert_eq!(ledger.preview_withdraw(&bob()).unwrap(), 80);
    }

    // ============================================================================
    // Access Scenarios
    // ============================================================================

    #[test]
    fn test_owner_self_revoke_leaves_no_reward_depositor() {
        let mut ledger = ShareLedger::new(owner(), PoolConfig::default()).unwrap();
        ledger.deposit(&alice(), 100).unwrap();

        ledger.revoke_reward_role(&owner(), &owner()).unwrap();
        assert!(matches!(
            ledger.deposit_rewards(&owner(), 10),
            Err(PoolError::Unauthorized { .. })
        ));

        ledger.grant_reward_role(&owner(), owner()).unwrap();
        assert_eq!(ledger.deposit_rewards(&owner(), 10).unwrap(), 110);
    }

    #[test]
    fn test_restart_resumes_accounting() {
        let mut ledger = create_pool();
        ledger.deposit(&alice(), 100 * ONE).unwrap();
        ledger.deposit(&bob(), 300 * ONE).unwrap();
        ledger.deposit_rewards(&team(), 200 * ONE).unwrap();

        let bytes = ledger.snapshot().to_bytes();
        let mut resumed = ShareLedger::restore(LedgerSnapshot::from_bytes(&bytes).unwrap()).unwrap();
        let mut hook = RecordingTransfer::new();

        assert!(resumed.is_member(&team()));
        assert_eq!(resumed.withdraw(&alice(), &mut hook).unwrap(), 150 * ONE);
        assert_eq!(resumed.withdraw(&bob(), &mut hook).unwrap(), 450 * ONE);
    }
}

#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use crate::*;

    const DEPOSITORS: u8 = 4;

    fn owner() -> Address {
        [1u8; 32]
    }

    fn team() -> Address {
        [9u8; 32]
    }

    fn depositor(i: u8) -> Address {
        [0x20 + i; 32]
    }

    #[derive(Debug, Clone)]
    enum Op {
        Deposit(u8, u64),
        Reward(u64),
        Withdraw(u8),
        FailedWithdraw(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (0..DEPOSITORS, 1u64..1_000_000_000_000).prop_map(|(i, a)| Op::Deposit(i, a)),
            2 => (1u64..1_000_000_000_000).prop_map(Op::Reward),
            2 => (0..DEPOSITORS).prop_map(Op::Withdraw),
            1 => (0..DEPOSITORS).prop_map(Op::FailedWithdraw),
        ]
    }

    fn apply(ledger: &mut ShareLedger, op: &Op, paid: &mut u128, funded: &mut u128) {
        let before = ledger.clone();
        let mut hook = RecordingTransfer::new();

        let result = match op {
            Op::Deposit(i, amount) => ledger.deposit(&depositor(*i), *amount).map(|_| {
                *funded += *amount as u128;
            }),
            Op::Reward(amount) => ledger.deposit_rewards(&team(), *amount).map(|_| {
                *funded += *amount as u128;
            }),
            Op::Withdraw(i) => ledger.withdraw(&depositor(*i), &mut hook).map(|payout| {
                *paid += payout as u128;
            }),
            Op::FailedWithdraw(i) => {
                let mut refusing = RecordingTransfer::refusing();
                ledger.withdraw(&depositor(*i), &mut refusing).map(|_| ())
            }
        };

        if result.is_err() {
            assert_eq!(*ledger, before, "failed {:?} changed state", op);
        }
        if let Op::Withdraw(i) = op {
            assert_eq!(ledger.position(&depositor(*i)), 0);
        }
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_and_pool_drains(ops in prop::collection::vec(op_strategy(), 1..60)) {
            let mut ledger = ShareLedger::new(owner(), PoolConfig::default()).unwrap();
            ledger.grant_reward_role(&owner(), team()).unwrap();

            let mut paid = 0u128;
            let mut funded = 0u128;

            for op in &ops {
                apply(&mut ledger, op, &mut paid, &mut funded);
                prop_assert!(ledger.check_invariants().is_ok());

                let sum: u64 = ledger.positions().map(|(_, shares)| *shares).sum();
                prop_assert_eq!(sum, ledger.pool_total());
                prop_assert_eq!(funded - paid, ledger.pool_balance() as u128);
            }

            // Everyone leaves: the pool must empty with no remainder
            let mut hook = RecordingTransfer::new();
            for i in 0..DEPOSITORS {
                if ledger.position(&depositor(i)) > 0 {
                    paid += ledger.withdraw(&depositor(i), &mut hook).unwrap() as u128;
                }
            }

            prop_assert_eq!(ledger.pool_total(), 0);
            prop_assert_eq!(ledger.pool_balance(), 0);
            prop_assert_eq!(paid, funded);
        }

        #[test]
        fn prop_snapshot_round_trip(ops in prop::collection::vec(op_strategy(), 0..30)) {
            let mut ledger = ShareLedger::new(owner(), PoolConfig::default()).unwrap();
            ledger.grant_reward_role(&owner(), team()).unwrap();

            let (mut paid, mut funded) = (0u128, 0u128);
            for op in &ops {
                apply(&mut ledger, op, &mut paid, &mut funded);
            }
            ledger.take_events();

            let snapshot = ledger.snapshot();
            let restored = ShareLedger::restore(LedgerSnapshot::from_bytes(&snapshot.to_bytes()).unwrap()).unwrap();
            prop_assert_eq!(restored.snapshot().state_root(), snapshot.state_root());
            prop_assert_eq!(restored, ledger);
        }
    }
}
