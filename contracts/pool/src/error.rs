// Pool error codes
//
// Codes are shared with the Factory where the meaning is the same
// (0xffa0 not admin, 0xffa3 insufficient attached value).

use launchpad_ledger::ExitCode;
use launchpad_math::MathError;
use thiserror::Error;

// ============================================================
// CONTRACT ERRORS
// ============================================================

/// Failure codes surfaced as the transaction's exit code
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PoolError {
    // Arithmetic (same code as an integer overflow)
    /// Curve arithmetic overflowed or divided by zero
    #[error("arithmetic error")]
    Arithmetic = 4,

    // Authorization (0xffa0-0xffa5)
    /// Only the admin may collect funds or upgrade
    #[error("sender is not the pool admin")]
    NotAdmin = 0xffa0,
    /// Operational message before `init`
    #[error("pool is not initialized")]
    NotInitialized = 0xffa2,
    /// Attached value cannot cover forwarding, or would break solvency
    #[error("attached value too small")]
    InsufficientAttachedValue = 0xffa3,
    /// Second `init`
    #[error("pool already initialized")]
    AlreadyInitialized = 0xffa4,
    /// `init` not from the factory, or a sell not from the pool's jetton wallet
    #[error("unexpected sender")]
    WrongSender = 0xffa5,

    // Trading and withdrawal (0xffa6-0xffa9)
    /// Collect would leave less than the virtual ton balance
    #[error("requested amount is not available")]
    InsufficientFunds = 0xffa6,
    /// Buy too small to receive a single jetton unit
    #[error("amount too small")]
    AmountTooSmall = 0xffa7,
    /// `init` payload disagrees with the address-bound pre-init record
    #[error("init does not match pool data")]
    InitMismatch = 0xffa8,
    /// Zero minimal price or fee of 1000 per mille or more
    #[error("invalid init parameters")]
    InvalidInitParams = 0xffa9,
}

impl From<MathError> for PoolError {
    fn from(_: MathError) -> Self {
        PoolError::Arithmetic
    }
}

impl From<PoolError> for ExitCode {
    fn from(err: PoolError) -> Self {
        ExitCode(err as u32)
    }
}

pub type PoolResult<T> = Result<T, PoolError>;
