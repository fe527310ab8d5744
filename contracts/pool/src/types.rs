// Pool Types

use launchpad_codec::{Address, Cell, CodecResult, StateInit};
use serde::{Deserialize, Serialize};

// ============================================================
// POOL STATE
// ============================================================

/// Persisted pool record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolState {
    /// J0: allocation the pool started with; J never exceeds it
    pub initial_jetton_balance: u128,
    /// J: tradable jetton reserve
    pub virtual_jetton_balance: u128,
    /// Tv: net ton absorbed by trades, owed to sellers
    pub virtual_ton_balance: u128,
    /// T0 = J0 * minimal_price, the floor liquidity on the ton side
    pub base_ton_liquidity: u128,
    /// Percentage fee in per mille
    pub fee_per_mille: u16,
    /// The pool's own jetton wallet; set by `init`
    pub jetton_wallet: Option<Address>,
    /// Factory allowed to send `init`
    pub factory: Address,
    /// Jetton minter of the traded token
    pub minter: Address,
    /// Set by `init`
    pub admin: Option<Address>,
    pub is_inited: bool,
}

impl PoolState {
    /// Ton side of the curve: T0 + Tv
    pub fn ton_reserve(&self) -> Option<u128> {
        self.base_ton_liquidity.checked_add(self.virtual_ton_balance)
    }
}

// ============================================================
// POOL CONFIG
// ============================================================

/// Pre-init record of a pool; together with the code it fixes the pool's address
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// J0
    pub jetton_balance: u128,
    pub factory: Address,
    pub minter: Address,
}

impl PoolConfig {
    pub fn to_state(&self) -> PoolState {
        PoolState {
            initial_jetton_balance: self.jetton_balance,
            virtual_jetton_balance: self.jetton_balance,
            virtual_ton_balance: 0,
            base_ton_liquidity: 0,
            fee_per_mille: 0,
            jetton_wallet: None,
            factory: self.factory,
            minter: self.minter,
            admin: None,
            is_inited: false,
        }
    }

    pub fn to_data_cell(&self) -> CodecResult<Cell> {
        crate::storage::store_pool_state(&self.to_state())
    }

    pub fn state_init(&self, code: &Cell) -> CodecResult<StateInit> {
        Ok(StateInit::new(code.clone(), self.to_data_cell()?))
    }
}

// ============================================================
// QUOTES
// ============================================================

/// Result of an inverse quote
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quote {
    Available(u128),
    /// The requested output would drain the curve past its reserve
    Unavailable,
}

impl Quote {
    pub fn amount(self) -> Option<u128> {
        match self {
            Quote::Available(amount) => Some(amount),
            Quote::Unavailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Quote::Available(_))
    }
}

/// Forward quote of a buy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuyOutcome {
    /// Attached value left after the fixed and percentage fees
    pub effective_ton: u128,
    pub jetton_out: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefundReason {
    /// J + amount would exceed J0
    Unsafe,
    /// Payout would not cover the fees
    TooSmall,
}

/// Forward quote of a sell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SellOutcome {
    Pay { gross_ton: u128, net_ton: u128 },
    Refund(RefundReason),
}
