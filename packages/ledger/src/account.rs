//! Account state

use launchpad_codec::{Address, Cell};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountStatus {
    /// Known address holding value but no code
    Uninit,
    Active,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountKind {
    Contract,
    /// Externally controlled wallet; accepts everything and runs no code
    Treasury,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    pub balance: u128,
    pub status: AccountStatus,
    pub kind: AccountKind,
    pub code: Option<Cell>,
    pub data: Option<Cell>,
}

impl Account {
    pub(crate) fn uninit(address: Address) -> Self {
        Self {
            address,
            balance: 0,
            status: AccountStatus::Uninit,
            kind: AccountKind::Contract,
            code: None,
            data: None,
        }
    }

    pub(crate) fn treasury(address: Address, balance: u128) -> Self {
        Self {
            address,
            balance,
            status: AccountStatus::Active,
            kind: AccountKind::Treasury,
            code: None,
            data: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
