// Launchpad Pool
//
// Bonding-curve market for a single jetton against the native currency.
// Prices follow a constant-product curve over the virtual reserves
// (T0 + Tv, J); the real balance always covers Tv.

use std::sync::Arc;

use launchpad_codec::{
    jetton::{JettonTransfer, TransferNotification},
    messages::{CollectFunds, PoolInit, PoolInitialized, Upgrade},
    op, Address, Cell, CodecResult, Header, MessageBody,
};
use launchpad_ledger::{
    code_cell, int_arg, parse_bounced, ContractCode, ExecutionContext, ExitCode, GetterContext,
    InternalMessage, Ledger, LedgerResult, OutboundMessage, SendMode, StackValue,
};
use launchpad_math::MAX_FEE_PER_MILLE;
use tracing::warn;

// Local modules
pub mod client;
mod error;
mod events;
pub mod pricing;
pub mod storage;
pub mod types;

pub use client::PoolContract;
pub use error::{PoolError, PoolResult};
pub use pricing::{FIXED_FEE, JETTON_TRANSFER_VALUE};
pub use types::{BuyOutcome, PoolConfig, PoolState, Quote, RefundReason, SellOutcome};

use events::*;
use pricing::*;
use storage::{load_pool_state, store_pool_state};

/// Name under which the pool code is registered
pub const POOL_CODE_NAME: &str = "launchpad-pool";

/// The pool contract
pub struct PoolCode;

impl PoolCode {
    /// Code cell of pool version `version`
    pub fn code(version: u32) -> CodecResult<Cell> {
        code_cell(POOL_CODE_NAME, version)
    }

    /// Register the current pool code on `ledger` and return its cell
    pub fn install(ledger: &mut Ledger) -> LedgerResult<Cell> {
        let code = Self::code(1)?;
        ledger.register_code(&code, Arc::new(PoolCode));
        Ok(code)
    }
}

// ============================================================
// GUARDS
// ============================================================

fn require_inited(state: &PoolState) -> PoolResult<()> {
    if state.is_inited {
        Ok(())
    } else {
        Err(PoolError::NotInitialized)
    }
}

fn require_admin(state: &PoolState, sender: &Address) -> PoolResult<Address> {
    match state.admin {
        Some(admin) if admin == *sender => Ok(admin),
        _ => Err(PoolError::NotAdmin),
    }
}

fn jetton_wallet(state: &PoolState) -> PoolResult<Address> {
    state.jetton_wallet.ok_or(PoolError::NotInitialized)
}

/// Balance left after the queued sends must still cover Tv
fn ensure_solvent(ctx: &ExecutionContext<'_>, state: &PoolState) -> Result<(), ExitCode> {
    if ctx.projected_balance()? < state.virtual_ton_balance {
        return Err(PoolError::InsufficientAttachedValue.into());
    }
    Ok(())
}

// ============================================================
// HANDLERS
// ============================================================

fn handle_init(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    query_id: u64,
    init: PoolInit,
    mut state: PoolState,
) -> Result<(), ExitCode> {
    if state.is_inited {
        return Err(PoolError::AlreadyInitialized.into());
    }
    if msg.src != state.factory {
        return Err(PoolError::WrongSender.into());
    }
    if init.factory != state.factory || init.jetton_balance != state.initial_jetton_balance {
        return Err(PoolError::InitMismatch.into());
    }
    if init.minimal_price == 0 || init.fee_per_mille > MAX_FEE_PER_MILLE {
        return Err(PoolError::InvalidInitParams.into());
    }

    state.base_ton_liquidity = state
        .initial_jetton_balance
        .checked_mul(init.minimal_price)
        .ok_or(PoolError::Arithmetic)?;
    state.fee_per_mille = init.fee_per_mille;
    state.jetton_wallet = Some(init.jetton_wallet);
    state.admin = Some(init.admin);
    state.is_inited = true;

    if let Some(ticket) = init.ticket {
        let body = PoolInitialized {
            jetton_balance: state.initial_jetton_balance,
            ticket,
        }
        .to_body(query_id)?;
        ctx.send(
            OutboundMessage::new(state.factory, 0, body),
            SendMode::CARRY_REMAINING_VALUE,
        );
    }

    emit_initialized(ctx, &state, &init.admin);
    ctx.set_data(store_pool_state(&state)?);
    Ok(())
}

fn handle_buy(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    query_id: u64,
    mut state: PoolState,
) -> Result<(), ExitCode> {
    require_inited(&state)?;
    let wallet = jetton_wallet(&state)?;
    let ton_amount = msg.value;

    let Some(outcome) = quote_buy(&state, ton_amount)? else {
        return Err(PoolError::InsufficientAttachedValue.into());
    };
    if outcome.jetton_out == 0 {
        return Err(PoolError::AmountTooSmall.into());
    }

    state.virtual_ton_balance = state
        .virtual_ton_balance
        .checked_add(outcome.effective_ton)
        .ok_or(PoolError::Arithmetic)?;
    state.virtual_jetton_balance -= outcome.jetton_out;

    let body = JettonTransfer {
        amount: outcome.jetton_out,
        destination: msg.src,
        response_destination: Some(msg.src),
        custom_payload: None,
        forward_ton_amount: 0,
        forward_payload: None,
    }
    .to_body(query_id)?;
    ctx.send(
        OutboundMessage::new(wallet, JETTON_TRANSFER_VALUE, body),
        SendMode::PAY_FEES_SEPARATELY,
    );
    ensure_solvent(ctx, &state)?;

    emit_bought(ctx, &msg.src, ton_amount, outcome.effective_ton, outcome.jetton_out);
    ctx.set_data(store_pool_state(&state)?);
    Ok(())
}

fn handle_sell(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    query_id: u64,
    notification: TransferNotification,
    mut state: PoolState,
) -> Result<(), ExitCode> {
    require_inited(&state)?;
    let wallet = jetton_wallet(&state)?;
    if msg.src != wallet {
        return Err(PoolError::WrongSender.into());
    }
    let seller = notification.sender;
    let jetton_amount = notification.amount;

    match quote_sell(&state, jetton_amount)? {
        SellOutcome::Refund(reason) => {
            let body = JettonTransfer {
                amount: jetton_amount,
                destination: seller,
                response_destination: Some(seller),
                custom_payload: None,
                forward_ton_amount: 0,
                forward_payload: None,
            }
            .to_body(query_id)?;
            ctx.send(
                OutboundMessage::new(wallet, 0, body),
                SendMode::CARRY_REMAINING_VALUE,
            );
            ensure_solvent(ctx, &state)?;
            emit_sell_refunded(ctx, &seller, jetton_amount, reason);
        }
        SellOutcome::Pay { gross_ton, net_ton } => {
            state.virtual_jetton_balance += jetton_amount;
            state.virtual_ton_balance -= net_ton;
            ctx.send(
                OutboundMessage::new(seller, net_ton, Cell::empty()).non_bounceable(),
                SendMode::CARRY_REMAINING_VALUE,
            );
            ensure_solvent(ctx, &state)?;
            emit_sold(ctx, &seller, jetton_amount, gross_ton, net_ton);
            ctx.set_data(store_pool_state(&state)?);
        }
    }
    Ok(())
}

fn handle_collect(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    request: CollectFunds,
    state: PoolState,
) -> Result<(), ExitCode> {
    require_inited(&state)?;
    let admin = require_admin(&state, &msg.src)?;

    let needed = request
        .amount
        .checked_add(ctx.fees().forward_fee)
        .and_then(|v| v.checked_add(state.virtual_ton_balance))
        .ok_or(PoolError::Arithmetic)?;
    if needed > ctx.balance() {
        return Err(PoolError::InsufficientFunds.into());
    }

    ctx.send(
        OutboundMessage::new(admin, request.amount, Cell::empty()).non_bounceable(),
        SendMode::PAY_FEES_SEPARATELY,
    );
    ensure_solvent(ctx, &state)?;
    emit_funds_collected(ctx, &admin, request.amount);
    Ok(())
}

fn handle_upgrade(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    upgrade: Upgrade,
    state: PoolState,
) -> Result<(), ExitCode> {
    require_inited(&state)?;
    let admin = require_admin(&state, &msg.src)?;
    ctx.set_code(upgrade.code);
    emit_upgraded(ctx, &admin);
    Ok(())
}

fn handle_bounce(ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
    let mut s = parse_bounced(&msg.body)?;
    if let Some(header) = Header::load(&mut s)? {
        if header.op == op::JETTON_TRANSFER {
            let amount = s.load_coins()?;
            warn!(pool = %ctx.address(), from = %msg.src, amount, "outbound jetton transfer bounced");
        }
    }
    Ok(())
}

// ============================================================
// CONTRACT
// ============================================================

impl ContractCode for PoolCode {
    fn name(&self) -> &str {
        POOL_CODE_NAME
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        if msg.bounced {
            return handle_bounce(ctx, msg);
        }
        let mut s = msg.body.parse();
        let Some(header) = Header::load(&mut s)? else {
            return Ok(());
        };
        let state = load_pool_state(ctx.data())?;

        match header.op {
            op::TOP_UP | op::JETTON_EXCESSES => Ok(()),
            op::INIT => {
                let init = PoolInit::load_payload(&mut s)?;
                handle_init(ctx, msg, header.query_id, init, state)
            }
            op::BUY_JETTON => handle_buy(ctx, msg, header.query_id, state),
            op::JETTON_TRANSFER_NOTIFICATION => {
                let notification = TransferNotification::load_payload(&mut s)?;
                handle_sell(ctx, msg, header.query_id, notification, state)
            }
            op::COLLECT_FUNDS => {
                let request = CollectFunds::load_payload(&mut s)?;
                handle_collect(ctx, msg, request, state)
            }
            op::UPGRADE => {
                let upgrade = Upgrade::load_payload(&mut s)?;
                handle_upgrade(ctx, msg, upgrade, state)
            }
            _ => Err(ExitCode::UNKNOWN_OP),
        }
    }

    fn get_method(
        &self,
        ctx: &GetterContext<'_>,
        method: &str,
        args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        let state = load_pool_state(ctx.data)?;

        // ---- raw state, available before init ----
        match method {
            "get_pool_data" => return Ok(pool_data_stack(&state)),
            "get_real_balance" => return Ok(vec![StackValue::Int(ctx.balance)]),
            "get_buy_fee" => return Ok(vec![StackValue::Int(FIXED_FEE)]),
            "get_fee_per_mille" => return Ok(vec![StackValue::Int(state.fee_per_mille as u128)]),
            "get_virtual_ton_balance" => return Ok(vec![StackValue::Int(state.virtual_ton_balance)]),
            "get_virtual_jetton_balance" => return Ok(vec![StackValue::Int(state.virtual_jetton_balance)]),
            _ => {}
        }

        // ---- quotes ----
        require_inited(&state)?;
        let value = match method {
            "get_estimated_jetton_for_ton" => {
                StackValue::Int(estimated_jetton_for_ton(&state, int_arg(args, 0)?)?)
            }
            "get_estimated_ton_for_jetton" => {
                StackValue::Int(estimated_ton_for_jetton(&state, int_arg(args, 0)?)?)
            }
            "get_required_ton_for_jetton" => quote_value(required_ton_for_jetton(&state, int_arg(args, 0)?)?),
            "get_required_jetton_for_ton" => quote_value(required_jetton_for_ton(&state, int_arg(args, 0)?)?),
            "get_collectable_funds" => StackValue::Int(collectable_funds(&state, ctx.balance, ctx.fees)),
            _ => return Err(ExitCode::METHOD_NOT_FOUND),
        };
        Ok(vec![value])
    }
}

fn quote_value(quote: Quote) -> StackValue {
    quote.amount().map_or(StackValue::Null, StackValue::Int)
}

fn pool_data_stack(state: &PoolState) -> Vec<StackValue> {
    let maybe = |a: Option<Address>| a.map_or(StackValue::Null, StackValue::Address);
    vec![
        StackValue::Int(state.initial_jetton_balance),
        StackValue::Int(state.virtual_jetton_balance),
        StackValue::Int(state.virtual_ton_balance),
        StackValue::Int(state.base_ton_liquidity),
        StackValue::Int(state.fee_per_mille as u128),
        maybe(state.jetton_wallet),
        StackValue::Address(state.factory),
        StackValue::Address(state.minter),
        maybe(state.admin),
        StackValue::Int(state.is_inited as u128),
    ]
}
