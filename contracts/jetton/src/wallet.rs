// Jetton wallet: one per (owner, minter)

use launchpad_codec::{
    jetton::{Excesses, InternalTransfer, JettonTransfer, TransferNotification},
    op, Header, MessageBody,
};
use launchpad_ledger::{
    parse_bounced, ContractCode, ExecutionContext, ExitCode, FeeSchedule, GetterContext,
    InternalMessage, OutboundMessage, SendMode, StackValue,
};
use tracing::{debug, info};

use crate::error::JettonError;
use crate::storage::{wallet_address, wallet_state_init, WalletData};

/// Inbound value a transfer needs: the receiving wallet's compute, the
/// internal transfer and excesses hops, and the forwarded amount with its hop
pub fn transfer_required_value(fees: &FeeSchedule, forward_ton_amount: u128) -> u128 {
    let notification = if forward_ton_amount > 0 {
        forward_ton_amount + fees.forward_fee
    } else {
        0
    };
    fees.compute_fee + 2 * fees.forward_fee + notification
}

pub struct JettonWalletCode;

impl JettonWalletCode {
    fn on_bounce(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        let mut s = parse_bounced(&msg.body)?;
        let Some(header) = Header::load(&mut s)? else {
            return Ok(());
        };
        if header.op == op::JETTON_INTERNAL_TRANSFER {
            let amount = s.load_coins()?;
            let mut data = WalletData::load(ctx.data())?;
            data.balance = data.balance.checked_add(amount).ok_or(ExitCode::INTEGER_OVERFLOW)?;
            info!(wallet = %ctx.address(), amount, "transfer bounced, balance restored");
            ctx.set_data(data.to_cell()?);
        }
        Ok(())
    }

    fn transfer(
        &self,
        ctx: &mut ExecutionContext<'_>,
        msg: &InternalMessage,
        query_id: u64,
        transfer: JettonTransfer,
    ) -> Result<(), ExitCode> {
        let mut data = WalletData::load(ctx.data())?;
        if msg.src != data.owner {
            return Err(JettonError::UnauthorizedTransfer.into());
        }
        if transfer.amount > data.balance {
            return Err(JettonError::NotEnoughJettons.into());
        }
        if ctx.remaining_value() < transfer_required_value(ctx.fees(), transfer.forward_ton_amount) {
            return Err(JettonError::NotEnoughValue.into());
        }
        data.balance -= transfer.amount;

        let init = wallet_state_init(&data.wallet_code, transfer.destination, data.master)?;
        let destination_wallet = ctx.address_of(&init)?;
        let body = InternalTransfer {
            amount: transfer.amount,
            from: Some(data.owner),
            response_address: transfer.response_destination,
            forward_ton_amount: transfer.forward_ton_amount,
            forward_payload: transfer.forward_payload,
        }
        .to_body(query_id)?;
        ctx.send(
            OutboundMessage::new(destination_wallet, 0, body).with_state_init(init),
            SendMode::CARRY_REMAINING_VALUE,
        );
        debug!(wallet = %ctx.address(), to = %transfer.destination, amount = transfer.amount, "jetton transfer");
        ctx.set_data(data.to_cell()?);
        Ok(())
    }

    fn internal_transfer(
        &self,
        ctx: &mut ExecutionContext<'_>,
        msg: &InternalMessage,
        query_id: u64,
        transfer: InternalTransfer,
    ) -> Result<(), ExitCode> {
        let mut data = WalletData::load(ctx.data())?;
        let from_master = msg.src == data.master;
        let from_sibling = match transfer.from {
            Some(from) => wallet_address(&data.wallet_code, from, data.master, ctx.workchain())? == msg.src,
            None => false,
        };
        if !from_master && !from_sibling {
            return Err(JettonError::UnauthorizedIncomingTransfer.into());
        }
        data.balance = data
            .balance
            .checked_add(transfer.amount)
            .ok_or(ExitCode::INTEGER_OVERFLOW)?;

        let forward_fee = ctx.fees().forward_fee;
        let mut leftover = ctx.remaining_value();
        if transfer.forward_ton_amount > 0 {
            let body = TransferNotification {
                amount: transfer.amount,
                sender: transfer.from.unwrap_or(data.master),
                forward_payload: transfer.forward_payload,
            }
            .to_body(query_id)?;
            ctx.send(
                OutboundMessage::new(data.owner, transfer.forward_ton_amount, body).non_bounceable(),
                SendMode::PAY_FEES_SEPARATELY,
            );
            leftover = leftover.saturating_sub(transfer.forward_ton_amount + forward_fee);
        }
        if let Some(response) = transfer.response_address {
            if leftover > forward_fee {
                let body = Excesses.to_body(query_id)?;
                ctx.send(
                    OutboundMessage::new(response, leftover, body).non_bounceable(),
                    SendMode::IGNORE_ERRORS,
                );
            }
        }
        ctx.set_data(data.to_cell()?);
        Ok(())
    }
}

impl ContractCode for JettonWalletCode {
    fn name(&self) -> &str {
        "jetton-wallet"
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        if msg.bounced {
            return self.on_bounce(ctx, msg);
        }
        let mut s = msg.body.parse();
        let Some(header) = Header::load(&mut s)? else {
            return Ok(());
        };
        match header.op {
            op::TOP_UP => Ok(()),
            op::JETTON_TRANSFER => {
                let transfer = JettonTransfer::load_payload(&mut s)?;
                self.transfer(ctx, msg, header.query_id, transfer)
            }
            op::JETTON_INTERNAL_TRANSFER => {
                let transfer = InternalTransfer::load_payload(&mut s)?;
                self.internal_transfer(ctx, msg, header.query_id, transfer)
            }
            _ => Err(ExitCode::UNKNOWN_OP),
        }
    }

    fn get_method(
        &self,
        ctx: &GetterContext<'_>,
        method: &str,
        _args: &[StackValue],
    ) -> Result<Vec<StackValue>, ExitCode> {
        match method {
            "get_wallet_data" => {
                let data = WalletData::load(ctx.data)?;
                Ok(vec![
                    StackValue::Int(data.balance),
                    StackValue::Address(data.owner),
                    StackValue::Address(data.master),
                    StackValue::Cell(data.wallet_code),
                ])
            }
            _ => Err(ExitCode::METHOD_NOT_FOUND),
        }
    }
}

/// Value a mint forwards to the new wallet: its compute plus the excesses hop,
/// with one more compute's worth left over for the response address
pub fn wallet_deploy_value(fees: &FeeSchedule) -> u128 {
    2 * fees.compute_fee + 2 * fees.forward_fee
}

/// Value a `mint` message to the minter must carry
pub fn mint_required_value(fees: &FeeSchedule) -> u128 {
    fees.compute_fee + wallet_deploy_value(fees) + fees.forward_fee
}
