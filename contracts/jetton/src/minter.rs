// Jetton minter: admin-only minting and wallet discovery

use launchpad_codec::{
    jetton::{InternalTransfer, Mint, ProvideWalletAddress, TakeWalletAddress},
    op, Header, MessageBody,
};
use launchpad_ledger::{
    address_arg, ContractCode, ExecutionContext, ExitCode, GetterContext, InternalMessage,
    OutboundMessage, SendMode, StackValue,
};

use crate::error::JettonError;
use crate::storage::{wallet_address, wallet_state_init, MinterData};

pub struct JettonMinterCode;

impl ContractCode for JettonMinterCode {
    fn name(&self) -> &str {
        "jetton-minter"
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        if msg.bounced {
            return Ok(());
        }
        let mut s = msg.body.parse();
        let Some(header) = Header::load(&mut s)? else {
            return Ok(());
        };

        match header.op {
            op::TOP_UP => Ok(()),
            op::JETTON_MINT => {
                let mut data = MinterData::load(ctx.data())?;
                if data.admin != Some(msg.src) {
                    return Err(JettonError::NotAdmin.into());
                }
                let mint = Mint::load_payload(&mut s)?;
                let transfer = InternalTransfer::from_body(&mint.master_msg)?.payload;
                data.total_supply = data
                    .total_supply
                    .checked_add(transfer.amount)
                    .ok_or(ExitCode::INTEGER_OVERFLOW)?;

                let init = wallet_state_init(&data.wallet_code, mint.to, ctx.address())?;
                let wallet = ctx.address_of(&init)?;
                ctx.send(
                    OutboundMessage::new(wallet, mint.ton_amount, mint.master_msg).with_state_init(init),
                    SendMode::PAY_FEES_SEPARATELY,
                );
                tracing::debug!(minter = %ctx.address(), to = %mint.to, amount = transfer.amount, "mint");
                ctx.set_data(data.to_cell()?);
                Ok(())
            }
            op::PROVIDE_WALLET_ADDRESS => {
                let data = MinterData::load(ctx.data())?;
                let request = ProvideWalletAddress::load_payload(&mut s)?;
                let wallet = wallet_address(&data.wallet_code, request.owner, ctx.address(), ctx.workchain())?;
                let reply = TakeWalletAddress {
                    wallet_address: Some(wallet),
                    owner: request.include_address.then_some(request.owner),
                }
                .to_body(header.query_id)?;
                ctx.send(
                    OutboundMessage::new(msg.src, 0, reply),
                    SendMode::CARRY_REMAINING_VALUE,
                );
                Ok(())
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
        let data = MinterData::load(ctx.data)?;
        match method {
            "get_jetton_data" => Ok(vec![
                StackValue::Int(data.total_supply),
                StackValue::Int(1), // mintable
                data.admin.map_or(StackValue::Null, StackValue::Address),
                StackValue::Cell(data.content),
                StackValue::Cell(data.wallet_code),
            ]),
            "get_wallet_address" => {
                let owner = address_arg(args, 0)?;
                let wallet = wallet_address(&data.wallet_code, owner, ctx.address, ctx.workchain)?;
                Ok(vec![StackValue::Address(wallet)])
            }
            _ => Err(ExitCode::METHOD_NOT_FOUND),
        }
    }
}
