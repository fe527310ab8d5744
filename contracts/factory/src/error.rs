// Factory error module

use launchpad_ledger::ExitCode;
use launchpad_math::MathError;
use thiserror::Error;

#[derive(Error, Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum FactoryError {
    // Arithmetic (same code as an integer overflow)
    #[error("arithmetic error")]
    Arithmetic = 4,

    // Authorization (0xffa0-0xffa5)
    #[error("sender is not the factory admin")]
    NotAdmin = 0xffa0,
    #[error("deployer supply share above the factory maximum")]
    DeployerSupplyTooHigh = 0xffa1,
    /// Stored data carries a cleared initialized flag
    #[error("factory is not initialized")]
    NotInitialized = 0xffa2,
    #[error("attached value too small")]
    InsufficientAttachedValue = 0xffa3,
    /// Pool acknowledgement from an address that is not the expected pool
    #[error("unexpected sender")]
    WrongSender = 0xffa5,

    // Parameters (0xffa9-0xffaa)
    /// Zero supply, zero price, or a split that leaves the pool nothing
    #[error("invalid deployment parameters")]
    InvalidDeployParams = 0xffa9,
    /// Factory parameters out of range; raised by `FactoryConfig::new`
    #[error("invalid factory configuration")]
    InvalidConfig = 0xffaa,
}

impl From<MathError> for FactoryError {
    fn from(_: MathError) -> Self {
        FactoryError::Arithmetic
    }
}

impl From<FactoryError> for ExitCode {
    fn from(err: FactoryError) -> Self {
        ExitCode(err as u32)
    }
}

pub type FactoryResult<T> = Result<T, FactoryError>;
