// ============================================================
// FACTORY VALIDATION FUZZING
// Supply split and parameter checks, first as pure functions,
// then through full deployments on the ledger
// ============================================================

mod common;

use common::*;
use launchpad_codec::{messages::InitiateNew, op, Address, MAX_COINS};
use launchpad_factory::{
    deployment::{split_supply, validate_pool_params},
    FactoryError, FactoryParams,
};
use launchpad_ledger::TxFilter;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // ========================================================
    // SUPPLY SPLIT
    // ========================================================

    #[test]
    fn fuzz_split_preserves_total(
        total in 0u128..=MAX_COINS,
        percent in 0u8..=100,
    ) {
        let (pool, deployer) = split_supply(total, percent).unwrap();
        prop_assert_eq!(pool + deployer, total);
        prop_assert_eq!(pool, total * (100 - percent as u128) / 100);
    }

    #[test]
    fn fuzz_split_never_shortchanges_deployer(
        total in 1u128..=1_000_000_000_000_000u128,
        percent in 0u8..=100,
    ) {
        let (_, deployer) = split_supply(total, percent).unwrap();
        // rounding always favours the deployer
        prop_assert!(deployer * 100 >= total * percent as u128);
    }

    #[test]
    fn fuzz_split_rejects_percent_above_hundred(
        total in 0u128..=MAX_COINS,
        percent in 101u8..=u8::MAX,
    ) {
        prop_assert_eq!(split_supply(total, percent), Err(FactoryError::InvalidDeployParams));
    }

    // ========================================================
    // POOL PARAMETERS
    // ========================================================

    #[test]
    fn fuzz_pool_params(
        jetton_balance in 0u128..=u64::MAX as u128,
        minimal_price in 0u128..=u64::MAX as u128,
    ) {
        let result = validate_pool_params(jetton_balance, minimal_price);
        let fits = jetton_balance * minimal_price <= MAX_COINS;
        if jetton_balance == 0 || minimal_price == 0 || !fits {
            prop_assert_eq!(result, Err(FactoryError::InvalidDeployParams));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    // ========================================================
    // FACTORY PARAMETERS
    // ========================================================

    #[test]
    fn fuzz_factory_params(
        fee_per_mille in 0u16..=2_000,
        max_deployer_supply_percent in 0u8..=u8::MAX,
    ) {
        let params = FactoryParams {
            admin: Address::new(0, [3; 32]),
            fee_per_mille,
            max_deployer_supply_percent,
        };
        let valid = fee_per_mille <= 999 && max_deployer_supply_percent < 100;
        prop_assert_eq!(params.validate().is_ok(), valid);
    }
}

// ============================================================
// LEDGER PROPERTIES
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn fuzz_initiate_new_mints_exact_split(
        total_supply in 100u128..=1_000_000_000_000_000u128,
        percent in 0u8..=10,
    ) {
        let mut setup = setup_factory();
        let request = InitiateNew {
            total_supply,
            deployer_supply_percent: percent,
            ..initiate_request(0)
        };
        let result = setup
            .factory
            .send_initiate_new_estimated(&mut setup.ledger, setup.deployer, &request)
            .unwrap();

        let (jetton_balance, share) = split_supply(total_supply, percent).unwrap();
        let deployed = locate(&setup, &content(), 0, jetton_balance);
        if percent > MAX_DEPLOYER_SUPPLY_PERCENT {
            prop_assert!(result.has(
                &TxFilter::new()
                    .to(setup.factory.address)
                    .exit_code(FactoryError::DeployerSupplyTooHigh.into())
            ));
            prop_assert_eq!(result.count(&TxFilter::new().op(op::JETTON_MINT)), 0);
            prop_assert!(!setup.ledger.is_active(&deployed.pool.address));
        } else {
            prop_assert!(result.all_succeeded());
            prop_assert_eq!(deployed.pool_wallet.get_balance(&setup.ledger).unwrap(), jetton_balance);
            let deployer_wallet = deployed.minter.wallet_of(&setup.ledger, setup.deployer).unwrap();
            prop_assert_eq!(deployer_wallet.get_balance(&setup.ledger).unwrap(), share);
            prop_assert_eq!(
                deployed.minter.get_jetton_data(&setup.ledger).unwrap().total_supply,
                total_supply
            );
        }
    }
}
