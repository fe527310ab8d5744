//! Math errors

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    Overflow,

    #[error("fee per mille {0} must be below 1000")]
    InvalidFee(u16),
}

pub type MathResult<T> = Result<T, MathError>;
