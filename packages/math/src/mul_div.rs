// Multiply-divide with an explicit rounding direction
//
// Reserves and amounts are up to 120 bits, so `a * b` needs a 256-bit
// intermediate before the division.

use ethnum::U256;

use crate::error::{MathError, MathResult};

/// Direction of the integer division
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    /// Floor. Used for every amount the contract pays out.
    Down,
    /// Ceiling. Used for every amount the contract asks for.
    Up,
}

/// `a * b / denominator` rounded as requested
pub fn mul_div(a: u128, b: u128, denominator: u128, rounding: Rounding) -> MathResult<u128> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }

    let product = U256::from(a) * U256::from(b);
    let den = U256::from(denominator);
    let mut quotient = product / den;
    if rounding == Rounding::Up && product % den != U256::ZERO {
        quotient += U256::ONE;
    }

    if quotient > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(quotient.as_u128())
}

/// Divide with rounding up
#[inline]
pub fn div_round_up(numerator: u128, denominator: u128) -> MathResult<u128> {
    if denominator == 0 {
        return Err(MathError::DivisionByZero);
    }
    let result = numerator / denominator;
    if numerator % denominator != 0 {
        Ok(result + 1)
    } else {
        Ok(result)
    }
}
