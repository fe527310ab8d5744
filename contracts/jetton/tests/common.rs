#![allow(dead_code)]

use launchpad_codec::{jetton::offchain_content, jetton::JettonTransfer, Address};
use launchpad_jetton::{JettonCodes, JettonMinterContract, JettonWalletContract};
use launchpad_ledger::Ledger;

// Test constants
pub const SEND_VALUE: u128 = 50_000_000;
pub const MINT_AMOUNT: u128 = 1_000_000;
pub const METADATA_URI: &str = "https://example.org/jetton.json";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Setup {
    pub ledger: Ledger,
    pub codes: JettonCodes,
    pub admin: Address,
    pub alice: Address,
    pub bob: Address,
    pub minter: JettonMinterContract,
}

/// Deployed minter administered by `admin`, nothing minted yet
pub fn setup_minter() -> Setup {
    init_tracing();
    let mut ledger = Ledger::default();
    let codes = JettonCodes::install(&mut ledger).unwrap();
    let admin = ledger.treasury("admin").unwrap();
    let alice = ledger.treasury("alice").unwrap();
    let bob = ledger.treasury("bob").unwrap();

    let content = offchain_content(METADATA_URI).unwrap();
    let minter = JettonMinterContract::create_from_config(&codes, admin, &content, 0, ledger.workchain()).unwrap();
    let result = minter.send_deploy(&mut ledger, admin, SEND_VALUE).unwrap();
    assert!(result.all_succeeded());

    Setup {
        ledger,
        codes,
        admin,
        alice,
        bob,
        minter,
    }
}

/// Minter with `MINT_AMOUNT` minted to alice
pub fn setup_with_alice_balance() -> (Setup, JettonWalletContract) {
    let mut setup = setup_minter();
    let result = setup
        .minter
        .send_mint(&mut setup.ledger, setup.admin, setup.alice, MINT_AMOUNT, SEND_VALUE)
        .unwrap();
    assert!(result.all_succeeded());
    let wallet = setup.minter.wallet_of(&setup.ledger, setup.alice).unwrap();
    (setup, wallet)
}

pub fn transfer(amount: u128, destination: Address, response: Address, forward_ton_amount: u128) -> JettonTransfer {
    JettonTransfer {
        amount,
        destination,
        response_destination: Some(response),
        custom_payload: None,
        forward_ton_amount,
        forward_payload: None,
    }
}
