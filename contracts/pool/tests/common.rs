#![allow(dead_code)]

use std::sync::Arc;

use launchpad_codec::{jetton::offchain_content, jetton::TransferNotification, messages::PoolInit, Address, Cell, MessageBody};
use launchpad_jetton::{JettonCodes, JettonMinterContract, JettonWalletContract};
use launchpad_ledger::{
    ContractCode, ExecutionContext, ExitCode, GetterContext, InternalMessage, Ledger,
    OutboundMessage, SendResult, StackValue,
};
pub use launchpad_pool::client::ESTIMATED_DEPLOY_VALUE;
use launchpad_pool::{PoolCode, PoolConfig, PoolContract, POOL_CODE_NAME};

// Test constants
pub const INIT_POOL_JETTON_BALANCE: u128 = 1_000_000;
pub const MINIMAL_PRICE: u128 = 1_000_000;
pub const FEE_PER_MILLE: u16 = 5;
pub const ONE_TON: u128 = 1_000_000_000;
pub const ADDITIONAL_GETTER_VALUE: u128 = 12345;

/// Route contract logs to the test output; filter with RUST_LOG
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Standalone pool: the deployer plays both factory and jetton wallet
pub struct Setup {
    pub ledger: Ledger,
    pub code: Cell,
    pub deployer: Address,
    pub admin: Address,
    pub buyer: Address,
    pub pool: PoolContract,
}

pub fn pool_init(jetton_wallet: Address, factory: Address, admin: Address) -> PoolInit {
    PoolInit {
        jetton_balance: INIT_POOL_JETTON_BALANCE,
        minimal_price: MINIMAL_PRICE,
        fee_per_mille: FEE_PER_MILLE,
        factory,
        jetton_wallet,
        admin,
        ticket: None,
    }
}

pub fn create_pool(ledger: &Ledger, code: &Cell, factory: Address, minter: Address) -> PoolContract {
    let config = PoolConfig {
        jetton_balance: INIT_POOL_JETTON_BALANCE,
        factory,
        minter,
    };
    PoolContract::create_from_config(&config, code, ledger.workchain()).unwrap()
}

/// Undeployed pool with the code registered
pub fn setup_undeployed() -> Setup {
    init_tracing();
    let mut ledger = Ledger::default();
    let code = PoolCode::install(&mut ledger).unwrap();
    let deployer = ledger.treasury("deployer").unwrap();
    let admin = ledger.treasury("admin").unwrap();
    let buyer = ledger.treasury("buyer").unwrap();
    // no real minter in the standalone setup
    let pool = create_pool(&ledger, &code, deployer, deployer);
    Setup {
        ledger,
        code,
        deployer,
        admin,
        buyer,
        pool,
    }
}

/// Deployed and initialized standalone pool
pub fn setup_pool() -> Setup {
    let mut setup = setup_undeployed();
    let init = pool_init(setup.deployer, setup.deployer, setup.admin);
    let result = setup
        .pool
        .send_deploy(&mut setup.ledger, setup.deployer, ESTIMATED_DEPLOY_VALUE, &init)
        .unwrap();
    assert!(result.all_succeeded());
    setup
}

/// Deployed through a plain top-up; `init` not yet received
pub fn setup_deployed_uninit() -> Setup {
    let mut setup = setup_undeployed();
    let mut msg = OutboundMessage::new(setup.pool.address, ESTIMATED_DEPLOY_VALUE, Cell::empty());
    msg.state_init = setup.pool.init.clone();
    let result = setup.ledger.send(setup.deployer, msg).unwrap();
    assert!(result.all_succeeded());
    setup
}

/// Standalone sell: the deployer is the pool's jetton wallet, so it sends the notification itself
pub fn send_notification(setup: &mut Setup, seller: Address, amount: u128, value: u128) -> SendResult {
    let body = TransferNotification {
        amount,
        sender: seller,
        forward_payload: None,
    }
    .to_body(0)
    .unwrap();
    setup
        .ledger
        .send(setup.deployer, OutboundMessage::new(setup.pool.address, value, body))
        .unwrap()
}

pub fn bought_amount(result: &SendResult) -> u128 {
    result
        .events("Buy")
        .map(|e| e.field("jetton_out").and_then(StackValue::as_int).unwrap())
        .sum()
}

// ============================================================
// FULL SETUP (real jetton contracts)
// ============================================================

pub struct JettonSetup {
    pub ledger: Ledger,
    pub codes: JettonCodes,
    pub factory: Address,
    pub admin: Address,
    pub buyer: Address,
    pub stranger: Address,
    pub minter: JettonMinterContract,
    pub pool: PoolContract,
    pub pool_wallet: JettonWalletContract,
}

/// Pool initialized against a real minter, with J0 minted to its wallet
pub fn setup_pool_with_jetton() -> JettonSetup {
    init_tracing();
    let mut ledger = Ledger::default();
    let code = PoolCode::install(&mut ledger).unwrap();
    let codes = JettonCodes::install(&mut ledger).unwrap();
    let factory = ledger.treasury("factory").unwrap();
    let admin = ledger.treasury("admin").unwrap();
    let buyer = ledger.treasury("buyer").unwrap();
    let stranger = ledger.treasury("stranger").unwrap();

    let content = offchain_content("https://example.org/pool-jetton.json").unwrap();
    let minter = JettonMinterContract::create_from_config(&codes, factory, &content, 0, ledger.workchain()).unwrap();
    assert!(minter.send_deploy(&mut ledger, factory, ESTIMATED_DEPLOY_VALUE).unwrap().all_succeeded());

    let pool = create_pool(&ledger, &code, factory, minter.address);
    let pool_wallet = minter.wallet_of(&ledger, pool.address).unwrap();
    let init = pool_init(pool_wallet.address, factory, admin);
    assert!(pool
        .send_deploy(&mut ledger, factory, ESTIMATED_DEPLOY_VALUE, &init)
        .unwrap()
        .all_succeeded());
    assert!(minter
        .send_mint(&mut ledger, factory, pool.address, INIT_POOL_JETTON_BALANCE, ESTIMATED_DEPLOY_VALUE)
        .unwrap()
        .all_succeeded());

    JettonSetup {
        ledger,
        codes,
        factory,
        admin,
        buyer,
        stranger,
        minter,
        pool,
        pool_wallet,
    }
}

// ============================================================
// SECOND CODE VERSION
// ============================================================

/// Pool code version 2: same behavior plus one extra getter
pub struct PoolCodeV2;

impl ContractCode for PoolCodeV2 {
    fn name(&self) -> &str {
        "launchpad-pool-v2"
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        PoolCode.receive(ctx, msg)
    }

    fn get_method(
        &self,
        ctx: &GetterContext<'_>,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        match method {
            "additional_getter" => Ok(vec![StackValue::Int(ADDITIONAL_GETTER_VALUE)]),
            _ => PoolCode.get_method(ctx, method, args),
        }
    }
}

pub fn install_v2(ledger: &mut Ledger) -> Cell {
    let code = launchpad_ledger::code_cell(POOL_CODE_NAME, 2).unwrap();
    ledger.register_code(&code, Arc::new(PoolCodeV2));
    code
}
