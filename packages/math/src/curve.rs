// Constant-Product Curve
//
// Every function states its rounding direction. Outputs round down and
// required inputs round up, so the pool never loses to rounding in either
// direction of a trade.

use crate::constants::{PER_MILLE, MAX_FEE_PER_MILLE};
use crate::error::{MathError, MathResult};
use crate::mul_div::{div_round_up, mul_div, Rounding};

/// `floor(amount * fee_per_mille / 1000)`
pub fn fee_part(amount: u128, fee_per_mille: u16) -> MathResult<u128> {
    if fee_per_mille > MAX_FEE_PER_MILLE {
        return Err(MathError::InvalidFee(fee_per_mille));
    }
    mul_div(amount, fee_per_mille as u128, PER_MILLE, Rounding::Down)
}

/// Output of selling `amount_in` into the curve `(reserve_in, reserve_out)`:
/// `floor(amount_in * reserve_out / (reserve_in + amount_in))`
pub fn swap_output(amount_in: u128, reserve_in: u128, reserve_out: u128) -> MathResult<u128> {
    let denominator = reserve_in
        .checked_add(amount_in)
        .ok_or(MathError::Overflow)?;
    mul_div(amount_in, reserve_out, denominator, Rounding::Down)
}

/// Smallest input for which `swap_output` yields at least `amount_out`:
/// `ceil(amount_out * reserve_in / (reserve_out - amount_out))`.
///
/// `None` when `amount_out` would drain the whole `reserve_out`.
pub fn swap_input_for_output(
    amount_out: u128,
    reserve_in: u128,
    reserve_out: u128,
) -> MathResult<Option<u128>> {
    if amount_out >= reserve_out {
        return Ok(None);
    }
    let remaining = reserve_out - amount_out;
    mul_div(amount_out, reserve_in, remaining, Rounding::Up).map(Some)
}

/// Smallest `gross` such that `gross - fee_part(gross) >= net`
pub fn gross_for_net(net: u128, fee_per_mille: u16) -> MathResult<u128> {
    if fee_per_mille > MAX_FEE_PER_MILLE {
        return Err(MathError::InvalidFee(fee_per_mille));
    }
    if net == 0 || fee_per_mille == 0 {
        return Ok(net);
    }

    let keep = PER_MILLE - fee_per_mille as u128;
    let scaled = net.checked_mul(PER_MILLE).ok_or(MathError::Overflow)?;
    let mut gross = div_round_up(scaled, keep)?;

    // floor in fee_part can leave the estimate a unit or two above the minimum
    while gross > net {
        let candidate = gross - 1;
        if candidate - fee_part(candidate, fee_per_mille)? >= net {
            gross = candidate;
        } else {
            break;
        }
    }
    Ok(gross)
}
