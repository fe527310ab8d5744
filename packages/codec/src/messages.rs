//! Pool and Factory message bodies

use crate::address::Address;
use crate::cell::{Builder, Cell, Slice};
use crate::envelope::MessageBody;
use crate::error::CodecResult;
use crate::op;

// ============================================================
// POOL
// ============================================================

/// One-time Pool initialization
///
/// Layout: `J0:coins minimal_price:coins fee_per_mille:uint16`
/// `^[factory jetton_wallet admin] ticket:(Maybe ^Cell)`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolInit {
    pub jetton_balance: u128,
    pub minimal_price: u128,
    pub fee_per_mille: u16,
    pub factory: Address,
    pub jetton_wallet: Address,
    pub admin: Address,
    /// Opaque deployment ticket echoed back to the factory
    pub ticket: Option<Cell>,
}

impl MessageBody for PoolInit {
    const OP: u32 = op::INIT;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        let mut identities = Builder::new();
        identities
            .store_address(&self.factory)?
            .store_address(&self.jetton_wallet)?
            .store_address(&self.admin)?;
        b.store_coins(self.jetton_balance)?
            .store_coins(self.minimal_price)?
            .store_uint(self.fee_per_mille as u128, 16)?
            .store_ref(identities.end_cell())?
            .store_maybe_ref(self.ticket.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        let jetton_balance = s.load_coins()?;
        let minimal_price = s.load_coins()?;
        let fee_per_mille = s.load_u16()?;
        let mut identities = s.load_ref()?.parse();
        let factory = identities.load_address()?;
        let jetton_wallet = identities.load_address()?;
        let admin = identities.load_address()?;
        let ticket = s.load_maybe_ref()?.cloned();
        Ok(Self {
            jetton_balance,
            minimal_price,
            fee_per_mille,
            factory,
            jetton_wallet,
            admin,
            ticket,
        })
    }
}

/// Buy against the curve; the price is the attached value
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuyJetton;

impl MessageBody for BuyJetton {
    const OP: u32 = op::BUY_JETTON;

    fn store_payload(&self, _b: &mut Builder) -> CodecResult<()> {
        Ok(())
    }

    fn load_payload(_s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self)
    }
}

/// Admin withdrawal of accumulated fees
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectFunds {
    pub amount: u128,
}

impl MessageBody for CollectFunds {
    const OP: u32 = op::COLLECT_FUNDS;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.amount)?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        Ok(Self {
            amount: s.load_coins()?,
        })
    }
}

/// Code replacement for Pool and Factory. `pool_code` is only meaningful to the Factory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upgrade {
    pub code: Cell,
    pub pool_code: Option<Cell>,
}

impl MessageBody for Upgrade {
    const OP: u32 = op::UPGRADE;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_ref(self.code.clone())?
            .store_maybe_ref(self.pool_code.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        let code = s.load_ref()?.clone();
        let pool_code = s.load_maybe_ref()?.cloned();
        Ok(Self { code, pool_code })
    }
}

/// Pool -> Factory: `init` processed, ticket echoed back
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolInitialized {
    pub jetton_balance: u128,
    pub ticket: Cell,
}

impl MessageBody for PoolInitialized {
    const OP: u32 = op::POOL_INITIALIZED;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.jetton_balance)?
            .store_ref(self.ticket.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        let jetton_balance = s.load_coins()?;
        let ticket = s.load_ref()?.clone();
        Ok(Self {
            jetton_balance,
            ticket,
        })
    }
}

// ============================================================
// FACTORY
// ============================================================

/// Combined token + Pool deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitiateNew {
    pub total_supply: u128,
    pub minimal_price: u128,
    pub deployer_supply_percent: u8,
    /// Jetton metadata content cell
    pub content: Cell,
}

impl MessageBody for InitiateNew {
    const OP: u32 = op::INITIATE_NEW;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.total_supply)?
            .store_coins(self.minimal_price)?
            .store_uint(self.deployer_supply_percent as u128, 8)?
            .store_ref(self.content.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        let total_supply = s.load_coins()?;
        let minimal_price = s.load_coins()?;
        let deployer_supply_percent = s.load_u8()?;
        let content = s.load_ref()?.clone();
        Ok(Self {
            total_supply,
            minimal_price,
            deployer_supply_percent,
            content,
        })
    }
}

/// Token-only deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeployToken {
    pub total_supply: u128,
    pub content: Cell,
}

impl MessageBody for DeployToken {
    const OP: u32 = op::DEPLOY_TOKEN;

    fn store_payload(&self, b: &mut Builder) -> CodecResult<()> {
        b.store_coins(self.total_supply)?
            .store_ref(self.content.clone())?;
        Ok(())
    }

    fn load_payload(s: &mut Slice<'_>) -> CodecResult<Self> {
        let total_supply = s.load_coins()?;
        let content = s.load_ref()?.clone();
        Ok(Self {
            total_supply,
            content,
        })
    }
}

/// Deployment parameters the Factory needs back once the Pool is initialized.
/// Travels as an opaque ticket through `PoolInit` and `PoolInitialized`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentTicket {
    /// Salt of the token's minter
    pub deployment_id: u64,
    pub deployer: Address,
    pub deployer_share: u128,
    pub content: Cell,
}

impl DeploymentTicket {
    pub fn to_cell(&self) -> CodecResult<Cell> {
        let mut b = Builder::new();
        b.store_uint(self.deployment_id as u128, 64)?
            .store_address(&self.deployer)?
            .store_coins(self.deployer_share)?
            .store_ref(self.content.clone())?;
        Ok(b.end_cell())
    }

    pub fn from_cell(cell: &Cell) -> CodecResult<Self> {
        let mut s = cell.parse();
        let deployment_id = s.load_u64()?;
        let deployer = s.load_address()?;
        let deployer_share = s.load_coins()?;
        let content = s.load_ref()?.clone();
        s.end_parse()?;
        Ok(Self {
            deployment_id,
            deployer,
            deployer_share,
            content,
        })
    }
}
