//! Jetton standard message bodies and metadata content

use crate::address::Address;
use crate::cell::{load_snake_bytes, store_snake_bytes, Builder, Cell, Slice};
use crate::envelope::MessageBody;
use crate::error::{CodecError, CodecResult};
use crate::op;

/// Owner -> own wallet: move `amount` to `destination`'s wallet
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JettonTransfer {
    pub amount: u128,
    pub destination: Address,
    pub response_destination: Option<Address>,
    pub custom_payload: Option<Cell>,
    pub forward_ton_amount: u128,
    pub forward_payload: Option<Cell>,
}

impl MessageBody for JettonTransfer {
    const OP: u32 = op::JETTON_TRANSFER;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.amount)?
            .store_address(&self.destination)?
            .store_maybe_address(self.response_destination.as_ref())?
            .store_maybe_ref(self.custom_payload.clone())?
            .store_coins(self.forward_ton_amount)?
            .store_maybe_ref(self.forward_payload.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self {
            amount: s.load_coins()?,
            destination: s.load_address()?,
            response_destination: s.load_maybe_address()?,
            custom_payload: s.load_maybe_ref()?.cloned(),
            forward_ton_amount: s.load_coins()?,
            forward_payload: s.load_maybe_ref()?.cloned(),
        })
    }
}

/// Wallet -> wallet (or minter -> wallet on mint)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalTransfer {
    pub amount: u128,
    pub from: Option<Address>,
    pub response_address: Option<Address>,
    pub forward_ton_amount: u128,
    pub forward_payload: Option<Cell>,
}

impl MessageBody for InternalTransfer {
    const OP: u32 = op::JETTON_INTERNAL_TRANSFER;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.amount)?
            .store_maybe_address(self.from.as_ref())?
            .store_maybe_address(self.response_address.as_ref())?
            .store_coins(self.forward_ton_amount)?
            .store_maybe_ref(self.forward_payload.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self {
            amount: s.load_coins()?,
            from: s.load_maybe_address()?,
            response_address: s.load_maybe_address()?,
            forward_ton_amount: s.load_coins()?,
            forward_payload: s.load_maybe_ref()?.cloned(),
        })
    }
}

/// Wallet -> owner after receiving jettons
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferNotification {
    pub amount: u128,
    /// Owner of the sending wallet
    pub sender: Address,
    pub forward_payload: Option<Cell>,
}

impl MessageBody for TransferNotification {
    const OP: u32 = op::JETTON_TRANSFER_NOTIFICATION;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.amount)?
            .store_address(&self.sender)?
            .store_maybe_ref(self.forward_payload.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self {
            amount: s.load_coins()?,
            sender: s.load_address()?,
            forward_payload: s.load_maybe_ref()?.cloned(),
        })
    }
}

/// Leftover value returned to the response address
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Excesses;

impl MessageBody for Excesses {
    const OP: u32 = op::JETTON_EXCESSES;

    fn store_payload(&self, _b: &mut Builder) -> CodecResult<()> {
        Ok(())
    }

    fn load_payload(_s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self)
    }
}

/// Admin -> minter. `master_msg` is an `InternalTransfer` body forwarded to the new wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mint {
    pub to: Address,
    pub ton_amount: u128,
    pub master_msg: Cell,
}

impl MessageBody for Mint {
    const OP: u32 = op::JETTON_MINT;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_address(&self.to)?
            .store_coins(self.ton_amount)?
            .store_ref(self.master_msg.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self {
            to: s.load_address()?,
            ton_amount: s.load_coins()?,
            master_msg: s.load_ref()?.clone(),
        })
    }
}

/// Wallet discovery request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProvideWalletAddress {
    pub owner: Address,
    pub include_address: bool,
}

impl MessageBody for ProvideWalletAddress {
    const OP: u32 = op::PROVIDE_WALLET_ADDRESS;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_address(&self.owner)?
            .store_bit(self.include_address)?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self {
            owner: s.load_address()?,
            include_address: s.load_bit()?,
        })
    }
}

/// Wallet discovery response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TakeWalletAddress {
    pub wallet_address: Option<Address>,
    pub owner: Option<Address>,
}

impl MessageBody for TakeWalletAddress {
    const OP: u32 = op::TAKE_WALLET_ADDRESS;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_maybe_address(self.wallet_address.as_ref())?;
        let owner = match &self.owner {
            Some(owner) => {
                let mut inner = Builder::new();
                inner.store_address(owner)?;
                Some(inner.end_cell())
            }
            None => None,
        };
        b.store_maybe_ref(owner)?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        let wallet_address = s.load_maybe_address()?;
        let owner = match s.load_maybe_ref()? {
            Some(cell) => Some(cell.parse().load_address()?),
            None => None,
        };
        Ok(Self {
            wallet_address,
            owner,
        })
    }
}

// ============================================================
// METADATA CONTENT
// ============================================================

const OFFCHAIN_CONTENT_PREFIX: u8 = 0x01;

/// Off-chain metadata: `0x01` followed by the URI in snake format
pub fn offchain_content(uri: &str) -> CodecResult<Cell> {
    let mut b = Builder::new();
    b.store_uint(OFFCHAIN_CONTENT_PREFIX as u128, 8)?;
    store_snake_bytes(&mut b, uri.as_bytes())?;
    Ok(b.end_cell())
}

pub fn parse_offchain_content(content: &Cell) -> CodecResult<String> {
    let mut s = content.parse();
    let prefix = s.load_u8()?;
    if prefix != OFFCHAIN_CONTENT_PREFIX {
        return Err(CodecError::UnsupportedContent(prefix));
    }
    let bytes = load_snake_bytes(&mut s)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
