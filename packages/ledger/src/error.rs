//! Ledger errors

use launchpad_codec::{Address, CodecError};
use thiserror::Error;

use crate::exit_code::ExitCode;

/// Error returned to the caller driving the ledger (never to a contract)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("account {0} does not exist")]
    UnknownAccount(Address),

    #[error("account {0} is not active")]
    AccountNotActive(Address),

    #[error("account {0} is not a treasury")]
    NotATreasury(Address),

    #[error("insufficient balance on {address}: have {have}, need {need}")]
    InsufficientBalance {
        address: Address,
        have: u128,
        need: u128,
    },

    #[error("no implementation registered for the code of {0}")]
    CodeNotRegistered(Address),

    #[error("get method `{method}` failed with exit code {exit_code}")]
    GetMethodFailed { method: String, exit_code: ExitCode },

    #[error("get method `{0}` returned an unexpected stack")]
    MalformedStack(String),

    #[error("message cascade exceeded {0} transactions")]
    StepLimitExceeded(usize),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
