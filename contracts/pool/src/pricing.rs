// Pool pricing
//
// Forward quotes follow the trade path exactly, so a quote equals what the
// handler does. Inverse quotes return the smallest input whose forward
// quote reaches the requested output.

use launchpad_ledger::FeeSchedule;
use launchpad_math::{fee_part, gross_for_net, swap_input_for_output, swap_output};

use crate::error::{PoolError, PoolResult};
use crate::types::{BuyOutcome, PoolState, Quote, RefundReason, SellOutcome};

/// Fixed fee kept from every buy and sell; covers the pool's outbound messages
pub const FIXED_FEE: u128 = 20_000_000;

/// Value attached to the pool's outbound jetton transfers
pub const JETTON_TRANSFER_VALUE: u128 = 10_000_000;

/// Smallest `forward_ton_amount` a sell should carry so the pool can
/// route a refund through its jetton wallet
pub fn min_sell_forward_value(fees: &FeeSchedule) -> u128 {
    2 * fees.compute_fee + 3 * fees.forward_fee
}

fn ton_reserve(state: &PoolState) -> PoolResult<u128> {
    state.ton_reserve().ok_or(PoolError::Arithmetic)
}

// ============================================================
// FORWARD QUOTES
// ============================================================

/// `None` when `ton_amount` does not cover the fees
pub fn quote_buy(state: &PoolState, ton_amount: u128) -> PoolResult<Option<BuyOutcome>> {
    let fees = FIXED_FEE
        .checked_add(fee_part(ton_amount, state.fee_per_mille)?)
        .ok_or(PoolError::Arithmetic)?;
    let Some(effective_ton) = ton_amount.checked_sub(fees) else {
        return Ok(None);
    };
    let jetton_out = swap_output(effective_ton, ton_reserve(state)?, state.virtual_jetton_balance)?;
    Ok(Some(BuyOutcome {
        effective_ton,
        jetton_out,
    }))
}

pub fn quote_sell(state: &PoolState, jetton_amount: u128) -> PoolResult<SellOutcome> {
    let after = state
        .virtual_jetton_balance
        .checked_add(jetton_amount)
        .ok_or(PoolError::Arithmetic)?;
    if after > state.initial_jetton_balance {
        return Ok(SellOutcome::Refund(RefundReason::Unsafe));
    }

    let gross_ton = swap_output(jetton_amount, state.virtual_jetton_balance, ton_reserve(state)?)?;
    let after_fee = gross_ton - fee_part(gross_ton, state.fee_per_mille)?;
    let Some(net_ton) = after_fee.checked_sub(FIXED_FEE) else {
        return Ok(SellOutcome::Refund(RefundReason::TooSmall));
    };
    if net_ton > state.virtual_ton_balance {
        // unreachable while J <= J0 keeps the curve product from shrinking
        return Ok(SellOutcome::Refund(RefundReason::Unsafe));
    }
    Ok(SellOutcome::Pay { gross_ton, net_ton })
}

pub fn estimated_jetton_for_ton(state: &PoolState, ton_amount: u128) -> PoolResult<u128> {
    Ok(quote_buy(state, ton_amount)?.map_or(0, |b| b.jetton_out))
}

pub fn estimated_ton_for_jetton(state: &PoolState, jetton_amount: u128) -> PoolResult<u128> {
    match quote_sell(state, jetton_amount)? {
        SellOutcome::Pay { net_ton, .. } => Ok(net_ton),
        SellOutcome::Refund(_) => Ok(0),
    }
}

// ============================================================
// INVERSE QUOTES
// ============================================================

/// Smallest attached value that buys at least `jetton_amount`
pub fn required_ton_for_jetton(state: &PoolState, jetton_amount: u128) -> PoolResult<Quote> {
    let Some(effective) =
        swap_input_for_output(jetton_amount, ton_reserve(state)?, state.virtual_jetton_balance)?
    else {
        return Ok(Quote::Unavailable);
    };
    let before_fixed = effective.checked_add(FIXED_FEE).ok_or(PoolError::Arithmetic)?;
    Ok(Quote::Available(gross_for_net(before_fixed, state.fee_per_mille)?))
}

/// Smallest jetton amount whose sell pays out at least `ton_amount`
pub fn required_jetton_for_ton(state: &PoolState, ton_amount: u128) -> PoolResult<Quote> {
    if ton_amount > state.virtual_ton_balance {
        return Ok(Quote::Unavailable);
    }
    let net_before_fixed = ton_amount.checked_add(FIXED_FEE).ok_or(PoolError::Arithmetic)?;
    let gross = gross_for_net(net_before_fixed, state.fee_per_mille)?;
    let Some(jetton_amount) = swap_input_for_output(gross, state.virtual_jetton_balance, ton_reserve(state)?)?
    else {
        return Ok(Quote::Unavailable);
    };
    let exceeds_allocation = state
        .virtual_jetton_balance
        .checked_add(jetton_amount)
        .map_or(true, |after| after > state.initial_jetton_balance);
    if exceeds_allocation {
        return Ok(Quote::Unavailable);
    }
    Ok(Quote::Available(jetton_amount))
}

/// What the admin could withdraw right now: the real balance above Tv,
/// less one compute fee and one forward fee for the collect itself
pub fn collectable_funds(state: &PoolState, real_balance: u128, fees: &FeeSchedule) -> u128 {
    real_balance
        .saturating_sub(state.virtual_ton_balance)
        .saturating_sub(fees.compute_fee)
        .saturating_sub(fees.forward_fee)
}
