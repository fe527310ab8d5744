#![allow(dead_code)]

use std::sync::Arc;

use launchpad_codec::{jetton::offchain_content, messages::InitiateNew, Address, Cell};
use launchpad_factory::{
    fees::ESTIMATED_DEPLOY_VALUE, FactoryCode, FactoryConfig, FactoryContract, FactoryParams,
    FACTORY_CODE_NAME,
};
use launchpad_jetton::{wallet_address, JettonCodes, JettonMinterContract, JettonWalletContract};
use launchpad_ledger::{
    code_cell, ContractCode, ExecutionContext, ExitCode, GetterContext, InternalMessage, Ledger,
    StackValue, TxFilter,
};
use launchpad_pool::{PoolCode, PoolContract};

// Test constants
pub const FEE_PER_MILLE: u16 = 10;
pub const MAX_DEPLOYER_SUPPLY_PERCENT: u8 = 5;
pub const TOTAL_SUPPLY: u128 = 100_000_000_000;
pub const MINIMAL_PRICE: u128 = 1_000_000;
/// Enough for a plain upgrade; 500_000 is not
pub const UPGRADE_VALUE: u128 = 1_000_000;
pub const ADDITIONAL_GETTER_VALUE: u128 = 12345;
pub const METADATA_URI: &str = "https://github.com/YakovL/ton-example-jetton/raw/master/jetton-metadata.json";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Setup {
    pub ledger: Ledger,
    pub jetton_codes: JettonCodes,
    pub pool_code: Cell,
    pub factory_code: Cell,
    pub deployer: Address,
    pub non_deployer: Address,
    pub factory: FactoryContract,
}

pub fn factory_config(admin: Address, jetton_codes: &JettonCodes, pool_code: &Cell) -> FactoryConfig {
    let params = FactoryParams {
        admin,
        fee_per_mille: FEE_PER_MILLE,
        max_deployer_supply_percent: MAX_DEPLOYER_SUPPLY_PERCENT,
    };
    FactoryConfig::new(
        params,
        jetton_codes.minter.clone(),
        jetton_codes.wallet.clone(),
        pool_code.clone(),
    )
    .unwrap()
}

/// Deployed factory administered by `deployer`
pub fn setup_factory() -> Setup {
    init_tracing();
    let mut ledger = Ledger::default();
    let jetton_codes = JettonCodes::install(&mut ledger).unwrap();
    let pool_code = PoolCode::install(&mut ledger).unwrap();
    let factory_code = FactoryCode::install(&mut ledger).unwrap();
    let deployer = ledger.treasury("deployer").unwrap();
    let non_deployer = ledger.treasury("nonDeployer").unwrap();

    let config = factory_config(deployer, &jetton_codes, &pool_code);
    let factory = FactoryContract::create_from_config(&config, &factory_code, ledger.workchain()).unwrap();
    let result = factory.send_deploy(&mut ledger, deployer, ESTIMATED_DEPLOY_VALUE).unwrap();
    assert!(result.has(
        &TxFilter::new()
            .from(deployer)
            .to(factory.address)
            .deployed(true)
            .success(true)
    ));

    Setup {
        ledger,
        jetton_codes,
        pool_code,
        factory_code,
        deployer,
        non_deployer,
        factory,
    }
}

/// Deployed factory that has already been upgraded to its own code
pub fn setup_upgraded_factory() -> Setup {
    let mut setup = setup_factory();
    let code = setup.factory_code.clone();
    let result = setup
        .factory
        .send_upgrade(&mut setup.ledger, setup.deployer, UPGRADE_VALUE, &code, None)
        .unwrap();
    assert!(result.all_succeeded());
    setup
}

pub fn content() -> Cell {
    offchain_content(METADATA_URI).unwrap()
}

pub fn initiate_request(deployer_supply_percent: u8) -> InitiateNew {
    InitiateNew {
        total_supply: TOTAL_SUPPLY,
        minimal_price: MINIMAL_PRICE,
        deployer_supply_percent,
        content: content(),
    }
}

/// Contracts of deployment `deployment_id`, located through the factory's getters.
/// None of them needs to be deployed.
pub struct Deployed {
    pub minter: JettonMinterContract,
    pub pool: PoolContract,
    pub pool_wallet: JettonWalletContract,
}

pub fn locate(setup: &Setup, content: &Cell, deployment_id: u64, jetton_balance: u128) -> Deployed {
    let minter_address = setup
        .factory
        .get_jetton_minter_address(&setup.ledger, content, deployment_id)
        .unwrap();
    let minter = JettonMinterContract::create_from_address(minter_address);
    let pool_address = setup
        .factory
        .get_pool_address(&setup.ledger, minter_address, jetton_balance)
        .unwrap();
    let pool_wallet = wallet_address(&setup.jetton_codes.wallet, pool_address, minter_address, setup.ledger.workchain()).unwrap();
    Deployed {
        minter,
        pool: PoolContract::create_from_address(pool_address),
        pool_wallet: JettonWalletContract::new(pool_wallet),
    }
}

pub fn pool_share(total_supply: u128, deployer_supply_percent: u8) -> u128 {
    total_supply * (100 - deployer_supply_percent as u128) / 100
}

// ============================================================
// SECOND CODE VERSION
// ============================================================

/// Factory code version 2: same behavior plus one extra getter
pub struct FactoryCodeV2;

impl ContractCode for FactoryCodeV2 {
    fn name(&self) -> &str {
        "launchpad-factory-v2"
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        FactoryCode.receive(ctx, msg)
    }

    fn get_method(
        &self,
        ctx: &GetterContext<'_>,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        match method {
            "additional_getter" => Ok(vec![StackValue::Int(ADDITIONAL_GETTER_VALUE)]),
            _ => FactoryCode.get_method(ctx, method, args),
        }
    }
}

pub fn install_factory_v2(ledger: &mut Ledger) -> Cell {
    let code = code_cell(FACTORY_CODE_NAME, 2).unwrap();
    ledger.register_code(&code, Arc::new(FactoryCodeV2));
    code
}

/// Pool template `version`: same contract under a new code cell
pub fn install_pool_version(ledger: &mut Ledger, version: u32) -> Cell {
    let code = PoolCode::code(version).unwrap();
    ledger.register_code(&code, Arc::new(PoolCode));
    code
}

pub fn install_pool_v2(ledger: &mut Ledger) -> Cell {
    install_pool_version(ledger, 2)
}
