// Typed wrapper for driving the factory from outside the ledger

use launchpad_codec::{
    messages::{DeployToken, InitiateNew, Upgrade},
    Address, Cell, CodecResult, MessageBody, StateInit,
};
use launchpad_ledger::{Ledger, LedgerResult, OutboundMessage, SendResult, StackReader, StackValue};

use crate::fees::estimate_initiate_new_value;
use crate::types::FactoryConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryContract {
    pub address: Address,
    pub init: Option<StateInit>,
}

impl FactoryContract {
    pub fn create_from_address(address: Address) -> Self {
        Self { address, init: None }
    }

    pub fn create_from_config(config: &FactoryConfig, code: &Cell, workchain: i8) -> CodecResult<Self> {
        let init = config.state_init(code)?;
        Ok(Self {
            address: init.address(workchain)?,
            init: Some(init),
        })
    }

    // ========================================================
    // MESSAGES
    // ========================================================

    pub fn send_deploy(&self, ledger: &mut Ledger, via: Address, value: u128) -> LedgerResult<SendResult> {
        let mut msg = OutboundMessage::new(self.address, value, Cell::empty());
        msg.state_init = self.init.clone();
        ledger.send(via, msg)
    }

    pub fn send_deploy_token(
        &self,
        ledger: &mut Ledger,
        via: Address,
        value: u128,
        total_supply: u128,
        content: &Cell,
    ) -> LedgerResult<SendResult> {
        let body = DeployToken {
            total_supply,
            content: content.clone(),
        }
        .to_body(0)?;
        ledger.send(via, OutboundMessage::new(self.address, value, body))
    }

    pub fn send_initiate_new(
        &self,
        ledger: &mut Ledger,
        via: Address,
        value: u128,
        request: &InitiateNew,
    ) -> LedgerResult<SendResult> {
        ledger.send(via, OutboundMessage::new(self.address, value, request.to_body(0)?))
    }

    /// `initiate_new` carrying the estimated value for the ledger's fee schedule
    pub fn send_initiate_new_estimated(
        &self,
        ledger: &mut Ledger,
        via: Address,
        request: &InitiateNew,
    ) -> LedgerResult<SendResult> {
        let value = estimate_initiate_new_value(ledger.fees());
        self.send_initiate_new(ledger, via, value, request)
    }

    pub fn send_upgrade(
        &self,
        ledger: &mut Ledger,
        via: Address,
        value: u128,
        code: &Cell,
        pool_code: Option<&Cell>,
    ) -> LedgerResult<SendResult> {
        let body = Upgrade {
            code: code.clone(),
            pool_code: pool_code.cloned(),
        }
        .to_body(0)?;
        ledger.send(via, OutboundMessage::new(self.address, value, body))
    }

    // ========================================================
    // GETTERS
    // ========================================================

    fn get(&self, ledger: &Ledger, method: &str, args: &[StackValue]) -> LedgerResult<Vec<StackValue>> {
        ledger.run_get_method(&self.address, method, args)
    }

    pub fn get_admin_address(&self, ledger: &Ledger) -> LedgerResult<Address> {
        let stack = self.get(ledger, "get_admin_address", &[])?;
        StackReader::new("get_admin_address", &stack).read_address()
    }

    pub fn get_fee_per_mille(&self, ledger: &Ledger) -> LedgerResult<u16> {
        let stack = self.get(ledger, "get_fee_per_mille", &[])?;
        Ok(StackReader::new("get_fee_per_mille", &stack).read_int()? as u16)
    }

    pub fn get_max_deployer_supply_percent(&self, ledger: &Ledger) -> LedgerResult<u8> {
        let stack = self.get(ledger, "get_max_deployer_supply_percent", &[])?;
        Ok(StackReader::new("get_max_deployer_supply_percent", &stack).read_int()? as u8)
    }

    pub fn get_pool_code(&self, ledger: &Ledger) -> LedgerResult<Cell> {
        let stack = self.get(ledger, "get_pool_code", &[])?;
        StackReader::new("get_pool_code", &stack).read_cell()
    }

    pub fn get_pool_code_hash(&self, ledger: &Ledger) -> LedgerResult<[u8; 32]> {
        Ok(self.get_pool_code(ledger)?.hash())
    }

    pub fn get_next_deployment_id(&self, ledger: &Ledger) -> LedgerResult<u64> {
        let stack = self.get(ledger, "get_next_deployment_id", &[])?;
        Ok(StackReader::new("get_next_deployment_id", &stack).read_int()? as u64)
    }

    /// Minter of the token made by deployment `deployment_id`
    pub fn get_jetton_minter_address(
        &self,
        ledger: &Ledger,
        content: &Cell,
        deployment_id: u64,
    ) -> LedgerResult<Address> {
        let args = [StackValue::Cell(content.clone()), StackValue::Int(deployment_id as u128)];
        let stack = self.get(ledger, "get_jetton_minter_address", &args)?;
        StackReader::new("get_jetton_minter_address", &stack).read_address()
    }

    pub fn get_pool_address(&self, ledger: &Ledger, minter: Address, jetton_balance: u128) -> LedgerResult<Address> {
        let args = [StackValue::Address(minter), StackValue::Int(jetton_balance)];
        let stack = self.get(ledger, "get_pool_address", &args)?;
        StackReader::new("get_pool_address", &stack).read_address()
    }
}
