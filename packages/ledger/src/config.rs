//! Ledger Configuration
//!
//! Fee metering and limits of the simulated chain.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use launchpad_codec::BASECHAIN;

/// Flat fees charged by the ledger, in nano-units of the native currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Charged once per transaction that runs contract code
    pub compute_fee: u128,
    /// Charged once per outbound message
    pub forward_fee: u128,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            compute_fee: 700_000,
            forward_fee: 400_000,
        }
    }
}

impl FeeSchedule {
    /// Value a message must carry so the receiver can run and forward `hops` more messages
    pub fn relay_cost(&self, hops: u128) -> u128 {
        self.compute_fee + hops * self.forward_fee
    }
}

/// Configuration of a simulated ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub fees: FeeSchedule,
    /// Workchain new contracts are deployed to
    pub workchain: i8,
    /// Starting balance of every treasury
    pub treasury_balance: u128,
    /// Upper bound on transactions triggered by one outside message
    pub max_transactions: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            fees: FeeSchedule::default(),
            workchain: BASECHAIN,
            treasury_balance: 1_000_000 * 1_000_000_000, // 1M whole units
            max_transactions: 1_000,
        }
    }
}

impl LedgerConfig {
    /// Zero fees, for tests that only care about curve arithmetic
    pub fn for_testing() -> Self {
        Self {
            fees: FeeSchedule {
                compute_fee: 0,
                forward_fee: 0,
            },
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> LedgerResult<Self> {
        serde_json::from_str(json).map_err(|e| LedgerError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> LedgerResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LedgerError::Config(e.to_string()))
    }
}
