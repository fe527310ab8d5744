// Typed wrappers for driving jetton contracts from outside the ledger

use launchpad_codec::{
    jetton::{InternalTransfer, JettonTransfer, Mint},
    Address, Cell, CodecResult, MessageBody, StateInit,
};
use launchpad_ledger::{Ledger, LedgerResult, OutboundMessage, SendResult, StackReader, StackValue};

use crate::storage::{minter_state_init, WalletData};
use crate::wallet::wallet_deploy_value;
use crate::JettonCodes;

/// Decoded `get_jetton_data`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonData {
    pub total_supply: u128,
    pub mintable: bool,
    pub admin: Option<Address>,
    pub content: Cell,
    pub wallet_code: Cell,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonMinterContract {
    pub address: Address,
    pub init: Option<StateInit>,
}

impl JettonMinterContract {
    pub fn create_from_address(address: Address) -> Self {
        Self { address, init: None }
    }

    pub fn create_from_config(
        codes: &JettonCodes,
        admin: Address,
        content: &Cell,
        salt: u64,
        workchain: i8,
    ) -> CodecResult<Self> {
        let init = minter_state_init(&codes.minter, &codes.wallet, admin, content, salt)?;
        Ok(Self {
            address: init.address(workchain)?,
            init: Some(init),
        })
    }

    pub fn send_deploy(&self, ledger: &mut Ledger, via: Address, value: u128) -> LedgerResult<SendResult> {
        let mut msg = OutboundMessage::new(self.address, value, Cell::empty());
        msg.state_init = self.init.clone();
        ledger.send(via, msg)
    }

    /// Mint `amount` to `to`; excesses go back to `via`
    pub fn send_mint(
        &self,
        ledger: &mut Ledger,
        via: Address,
        to: Address,
        amount: u128,
        value: u128,
    ) -> LedgerResult<SendResult> {
        let master_msg = InternalTransfer {
            amount,
            from: None,
            response_address: Some(via),
            forward_ton_amount: 0,
            forward_payload: None,
        }
        .to_body(0)?;
        let body = Mint {
            to,
            ton_amount: wallet_deploy_value(ledger.fees()),
            master_msg,
        }
        .to_body(0)?;
        ledger.send(via, OutboundMessage::new(self.address, value, body))
    }

    pub fn get_jetton_data(&self, ledger: &Ledger) -> LedgerResult<JettonData> {
        let stack = ledger.run_get_method(&self.address, "get_jetton_data", &[])?;
        let mut r = StackReader::new("get_jetton_data", &stack);
        Ok(JettonData {
            total_supply: r.read_int()?,
            mintable: r.read_int()? != 0,
            admin: r.read_maybe_address()?,
            content: r.read_cell()?,
            wallet_code: r.read_cell()?,
        })
    }

    pub fn get_wallet_address(&self, ledger: &Ledger, owner: Address) -> LedgerResult<Address> {
        let stack = ledger.run_get_method(&self.address, "get_wallet_address", &[StackValue::Address(owner)])?;
        StackReader::new("get_wallet_address", &stack).read_address()
    }

    pub fn wallet_of(&self, ledger: &Ledger, owner: Address) -> LedgerResult<JettonWalletContract> {
        Ok(JettonWalletContract::new(self.get_wallet_address(ledger, owner)?))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JettonWalletContract {
    pub address: Address,
}

impl JettonWalletContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn get_wallet_data(&self, ledger: &Ledger) -> LedgerResult<WalletData> {
        let stack = ledger.run_get_method(&self.address, "get_wallet_data", &[])?;
        let mut r = StackReader::new("get_wallet_data", &stack);
        Ok(WalletData {
            balance: r.read_int()?,
            owner: r.read_address()?,
            master: r.read_address()?,
            wallet_code: r.read_cell()?,
        })
    }

    /// Balance, or zero while the wallet is not deployed
    pub fn get_balance(&self, ledger: &Ledger) -> LedgerResult<u128> {
        if !ledger.is_active(&self.address) {
            return Ok(0);
        }
        Ok(self.get_wallet_data(ledger)?.balance)
    }

    pub fn send_transfer(
        &self,
        ledger: &mut Ledger,
        via: Address,
        value: u128,
        transfer: &JettonTransfer,
    ) -> LedgerResult<SendResult> {
        let body = transfer.to_body(0)?;
        ledger.send(via, OutboundMessage::new(self.address, value, body))
    }
}
