// Launchpad Jetton Contracts
//
// Minimal fungible token used at the launchpad's interface boundary:
// a minter that deploys wallets on mint and per-owner wallets that move
// balances with transfer / internal transfer / notification / excesses.

pub mod client;
pub mod error;
pub mod minter;
pub mod storage;
pub mod wallet;

use std::sync::Arc;

use launchpad_codec::Cell;
use launchpad_ledger::{code_cell, Ledger, LedgerResult};

pub use client::{JettonData, JettonMinterContract, JettonWalletContract};
pub use error::JettonError;
pub use minter::JettonMinterCode;
pub use storage::{minter_state_init, wallet_address, wallet_state_init, MinterData, WalletData};
pub use wallet::{mint_required_value, transfer_required_value, wallet_deploy_value, JettonWalletCode};

/// Code cells of the jetton contracts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonCodes {
    pub minter: Cell,
    pub wallet: Cell,
}

impl JettonCodes {
    pub fn new() -> LedgerResult<Self> {
        Ok(Self {
            minter: code_cell("jetton-minter", 1)?,
            wallet: code_cell("jetton-wallet", 1)?,
        })
    }

    /// Register both implementations on `ledger`
    pub fn install(ledger: &mut Ledger) -> LedgerResult<Self> {
        let codes = Self::new()?;
        ledger.register_code(&codes.minter, Arc::new(JettonMinterCode));
        ledger.register_code(&codes.wallet, Arc::new(JettonWalletCode));
        Ok(codes)
    }
}
