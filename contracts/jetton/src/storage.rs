// Persistent layouts of the minter and wallet, plus wallet address derivation

use launchpad_codec::{Address, Builder, Cell, CodecResult, StateInit};

/// `total_supply:coins admin:(Maybe addr) ^content ^wallet_code salt:uint64`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinterData {
    pub total_supply: u128,
    pub admin: Option<Address>,
    pub content: Cell,
    pub wallet_code: Cell,
    /// Separates minters that share admin and content
    pub salt: u64,
}

impl MinterData {
    pub fn new(admin: Address, content: Cell, wallet_code: Cell, salt: u64) -> Self {
        Self {
            total_supply: 0,
            admin: Some(admin),
            content,
            wallet_code,
            salt,
        }
    }

    pub fn load(data: &Cell) -> CodecResult<Self> {
        let mut s = data.parse();
        Ok(Self {
            total_supply: s.load_coins()?,
            admin: s.load_maybe_address()?,
            content: s.load_ref()?.clone(),
            wallet_code: s.load_ref()?.clone(),
            salt: s.load_u64()?,
        })
    }

    pub fn to_cell(&self) -> CodecResult<Cell> {
        let mut b = Builder::new();
        b.store_coins(self.total_supply)?
            .store_maybe_address(self.admin.as_ref())?
            .store_ref(self.content.clone())?
            .store_ref(self.wallet_code.clone())?
            .store_uint(self.salt as u128, 64)?;
        Ok(b.end_cell())
    }
}

/// `balance:coins owner:addr master:addr ^wallet_code`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletData {
    pub balance: u128,
    pub owner: Address,
    pub master: Address,
    pub wallet_code: Cell,
}

impl WalletData {
    pub fn load(data: &Cell) -> CodecResult<Self> {
        let mut s = data.parse();
        Ok(Self {
            balance: s.load_coins()?,
            owner: s.load_address()?,
            master: s.load_address()?,
            wallet_code: s.load_ref()?.clone(),
        })
    }

    pub fn to_cell(&self) -> CodecResult<Cell> {
        let mut b = Builder::new();
        b.store_coins(self.balance)?
            .store_address(&self.owner)?
            .store_address(&self.master)?
            .store_ref(self.wallet_code.clone())?;
        Ok(b.end_cell())
    }
}

/// Minter with zero supply; its address depends on admin, content, wallet code and salt
pub fn minter_state_init(
    minter_code: &Cell,
    wallet_code: &Cell,
    admin: Address,
    content: &Cell,
    salt: u64,
) -> CodecResult<StateInit> {
    let data = MinterData::new(admin, content.clone(), wallet_code.clone(), salt).to_cell()?;
    Ok(StateInit::new(minter_code.clone(), data))
}

/// Empty wallet of `owner` for jettons of `master`
pub fn wallet_state_init(wallet_code: &Cell, owner: Address, master: Address) -> CodecResult<StateInit> {
    let data = WalletData {
        balance: 0,
        owner,
        master,
        wallet_code: wallet_code.clone(),
    }
    .to_cell()?;
    Ok(StateInit::new(wallet_code.clone(), data))
}

pub fn wallet_address(
    wallet_code: &Cell,
    owner: Address,
    master: Address,
    workchain: i8,
) -> CodecResult<Address> {
    wallet_state_init(wallet_code, owner, master)?.address(workchain)
}
