// Pool events
// Each event is recorded on the transaction trace and mirrored to tracing.

use launchpad_codec::Address;
use launchpad_ledger::{Event, ExecutionContext, StackValue};
use tracing::info;

use crate::types::{PoolState, RefundReason};

/// Emitted once, when `init` is processed
/// Topic: "PoolInit"
/// Data: (jetton_balance, base_ton_liquidity, fee_per_mille, admin)
pub fn emit_initialized(ctx: &mut ExecutionContext<'_>, state: &PoolState, admin: &Address) {
    info!(
        pool = %ctx.address(),
        jetton_balance = state.initial_jetton_balance,
        base_ton_liquidity = state.base_ton_liquidity,
        fee_per_mille = state.fee_per_mille,
        "pool initialized"
    );
    ctx.emit(
        Event::new("PoolInit")
            .with("jetton_balance", StackValue::Int(state.initial_jetton_balance))
            .with("base_ton_liquidity", StackValue::Int(state.base_ton_liquidity))
            .with("fee_per_mille", StackValue::Int(state.fee_per_mille as u128))
            .with("admin", StackValue::Address(*admin)),
    );
}

/// Topic: "Buy"
/// Data: (buyer, ton_amount, effective_ton, jetton_out)
pub fn emit_bought(
    ctx: &mut ExecutionContext<'_>,
    buyer: &Address,
    ton_amount: u128,
    effective_ton: u128,
    jetton_out: u128,
) {
    info!(pool = %ctx.address(), buyer = %buyer, ton_amount, effective_ton, jetton_out, "buy");
    ctx.emit(
        Event::new("Buy")
            .with("buyer", StackValue::Address(*buyer))
            .with("ton_amount", StackValue::Int(ton_amount))
            .with("effective_ton", StackValue::Int(effective_ton))
            .with("jetton_out", StackValue::Int(jetton_out)),
    );
}

/// Topic: "Sell"
/// Data: (seller, jetton_amount, gross_ton, net_ton)
pub fn emit_sold(
    ctx: &mut ExecutionContext<'_>,
    seller: &Address,
    jetton_amount: u128,
    gross_ton: u128,
    net_ton: u128,
) {
    info!(pool = %ctx.address(), seller = %seller, jetton_amount, gross_ton, net_ton, "sell");
    ctx.emit(
        Event::new("Sell")
            .with("seller", StackValue::Address(*seller))
            .with("jetton_amount", StackValue::Int(jetton_amount))
            .with("gross_ton", StackValue::Int(gross_ton))
            .with("net_ton", StackValue::Int(net_ton)),
    );
}

/// Topic: "SellRefund"
/// Data: (seller, jetton_amount, reason)
pub fn emit_sell_refunded(
    ctx: &mut ExecutionContext<'_>,
    seller: &Address,
    jetton_amount: u128,
    reason: RefundReason,
) {
    let code = match reason {
        RefundReason::Unsafe => 1,
        RefundReason::TooSmall => 2,
    };
    info!(pool = %ctx.address(), seller = %seller, jetton_amount, ?reason, "sell refunded");
    ctx.emit(
        Event::new("SellRefund")
            .with("seller", StackValue::Address(*seller))
            .with("jetton_amount", StackValue::Int(jetton_amount))
            .with("reason", StackValue::Int(code)),
    );
}

/// Topic: "Collect"
/// Data: (admin, amount)
pub fn emit_funds_collected(ctx: &mut ExecutionContext<'_>, admin: &Address, amount: u128) {
    info!(pool = %ctx.address(), admin = %admin, amount, "funds collected");
    ctx.emit(
        Event::new("Collect")
            .with("admin", StackValue::Address(*admin))
            .with("amount", StackValue::Int(amount)),
    );
}

/// Topic: "Upgrade"
pub fn emit_upgraded(ctx: &mut ExecutionContext<'_>, admin: &Address) {
    info!(pool = %ctx.address(), admin = %admin, "pool code replaced");
    ctx.emit(Event::new("Upgrade").with("admin", StackValue::Address(*admin)));
}
