// Typed wrapper for driving a pool from outside the ledger

use launchpad_codec::{
    jetton::JettonTransfer,
    messages::{BuyJetton, CollectFunds, PoolInit, Upgrade},
    Address, Cell, CodecResult, MessageBody, StateInit,
};
use launchpad_ledger::{Ledger, LedgerResult, OutboundMessage, SendResult, StackReader, StackValue};

use crate::types::{PoolConfig, PoolState, Quote};

/// Value the deploy wrapper attaches by default
pub const ESTIMATED_DEPLOY_VALUE: u128 = 50_000_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolContract {
    pub address: Address,
    pub init: Option<StateInit>,
}

impl PoolContract {
    pub fn create_from_address(address: Address) -> Self {
        Self { address, init: None }
    }

    pub fn create_from_config(config: &PoolConfig, code: &Cell, workchain: i8) -> CodecResult<Self> {
        let init = config.state_init(code)?;
        Ok(Self {
            address: init.address(workchain)?,
            init: Some(init),
        })
    }

    // ========================================================
    // MESSAGES
    // ========================================================

    /// Deploy and initialize in one message; `via` must be the configured factory
    pub fn send_deploy(
        &self,
        ledger: &mut Ledger,
        via: Address,
        value: u128,
        init: &PoolInit,
    ) -> LedgerResult<SendResult> {
        let mut msg = OutboundMessage::new(self.address, value, init.to_body(0)?);
        msg.state_init = self.init.clone();
        ledger.send(via, msg)
    }

    pub fn send_init(
        &self,
        ledger: &mut Ledger,
        via: Address,
        value: u128,
        init: &PoolInit,
    ) -> LedgerResult<SendResult> {
        ledger.send(via, OutboundMessage::new(self.address, value, init.to_body(0)?))
    }

    /// Buy with the whole attached value
    pub fn send_buy(&self, ledger: &mut Ledger, via: Address, value: u128) -> LedgerResult<SendResult> {
        ledger.send(via, OutboundMessage::new(self.address, value, BuyJetton.to_body(0)?))
    }

    /// Sell by transferring `amount` from the seller's jetton wallet to the pool
    pub fn send_sell(
        &self,
        ledger: &mut Ledger,
        via: Address,
        seller_wallet: Address,
        amount: u128,
        forward_ton_amount: u128,
        value: u128,
    ) -> LedgerResult<SendResult> {
        let body = JettonTransfer {
            amount,
            destination: self.address,
            response_destination: Some(via),
            custom_payload: None,
            forward_ton_amount,
            forward_payload: None,
        }
        .to_body(0)?;
        ledger.send(via, OutboundMessage::new(seller_wallet, value, body))
    }

    pub fn send_collect_funds(
        &self,
        ledger: &mut Ledger,
        via: Address,
        amount: u128,
        value: u128,
    ) -> LedgerResult<SendResult> {
        let body = CollectFunds { amount }.to_body(0)?;
        ledger.send(via, OutboundMessage::new(self.address, value, body))
    }

    pub fn send_upgrade(
        &self,
        ledger: &mut Ledger,
        via: Address,
        code: &Cell,
        value: u128,
    ) -> LedgerResult<SendResult> {
        let body = Upgrade {
            code: code.clone(),
            pool_code: None,
        }
        .to_body(0)?;
        ledger.send(via, OutboundMessage::new(self.address, value, body))
    }

    // ========================================================
    // GETTERS
    // ========================================================

    fn get_int(&self, ledger: &Ledger, method: &str, args: &[StackValue]) -> LedgerResult<u128> {
        let stack = ledger.run_get_method(&self.address, method, args)?;
        StackReader::new(method, &stack).read_int()
    }

    fn get_quote(&self, ledger: &Ledger, method: &str, amount: u128) -> LedgerResult<Quote> {
        let stack = ledger.run_get_method(&self.address, method, &[StackValue::Int(amount)])?;
        Ok(match StackReader::new(method, &stack).read_maybe_int()? {
            Some(amount) => Quote::Available(amount),
            None => Quote::Unavailable,
        })
    }

    pub fn get_virtual_ton_balance(&self, ledger: &Ledger) -> LedgerResult<u128> {
        self.get_int(ledger, "get_virtual_ton_balance", &[])
    }

    pub fn get_virtual_jetton_balance(&self, ledger: &Ledger) -> LedgerResult<u128> {
        self.get_int(ledger, "get_virtual_jetton_balance", &[])
    }

    pub fn get_buy_fee(&self, ledger: &Ledger) -> LedgerResult<u128> {
        self.get_int(ledger, "get_buy_fee", &[])
    }

    pub fn get_fee_per_mille(&self, ledger: &Ledger) -> LedgerResult<u16> {
        let fee = self.get_int(ledger, "get_fee_per_mille", &[])?;
        Ok(fee as u16)
    }

    pub fn get_real_balance(&self, ledger: &Ledger) -> LedgerResult<u128> {
        self.get_int(ledger, "get_real_balance", &[])
    }

    pub fn get_collectable_funds(&self, ledger: &Ledger) -> LedgerResult<u128> {
        self.get_int(ledger, "get_collectable_funds", &[])
    }

    pub fn get_estimated_jetton_for_ton(&self, ledger: &Ledger, ton_amount: u128) -> LedgerResult<u128> {
        self.get_int(ledger, "get_estimated_jetton_for_ton", &[StackValue::Int(ton_amount)])
    }

    pub fn get_estimated_ton_for_jetton(&self, ledger: &Ledger, jetton_amount: u128) -> LedgerResult<u128> {
        self.get_int(ledger, "get_estimated_ton_for_jetton", &[StackValue::Int(jetton_amount)])
    }

    pub fn get_required_ton_for_jetton(&self, ledger: &Ledger, jetton_amount: u128) -> LedgerResult<Quote> {
        self.get_quote(ledger, "get_required_ton_for_jetton", jetton_amount)
    }

    pub fn get_required_jetton_for_ton(&self, ledger: &Ledger, ton_amount: u128) -> LedgerResult<Quote> {
        self.get_quote(ledger, "get_required_jetton_for_ton", ton_amount)
    }

    pub fn get_pool_data(&self, ledger: &Ledger) -> LedgerResult<PoolState> {
        let stack = ledger.run_get_method(&self.address, "get_pool_data", &[])?;
        let mut r = StackReader::new("get_pool_data", &stack);
        Ok(PoolState {
            initial_jetton_balance: r.read_int()?,
            virtual_jetton_balance: r.read_int()?,
            virtual_ton_balance: r.read_int()?,
            base_ton_liquidity: r.read_int()?,
            fee_per_mille: r.read_int()? as u16,
            jetton_wallet: r.read_maybe_address()?,
            factory: r.read_address()?,
            minter: r.read_address()?,
            admin: r.read_maybe_address()?,
            is_inited: r.read_int()? != 0,
        })
    }
}
