//! Factory type definitions

use launchpad_codec::{Address, Cell, CodecResult, StateInit};
use launchpad_math::{MAX_FEE_PER_MILLE, PERCENT};
use serde::{Deserialize, Serialize};

use crate::error::{FactoryError, FactoryResult};

// ============================================================
// FACTORY PARAMS
// ============================================================

/// Economic parameters fixed into every pool the factory deploys
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryParams {
    pub admin: Address,
    /// Percentage fee handed to each new pool
    pub fee_per_mille: u16,
    /// Largest share of a new token's supply the deployer may keep
    pub max_deployer_supply_percent: u8,
}

impl FactoryParams {
    pub fn validate(&self) -> FactoryResult<()> {
        if self.fee_per_mille > MAX_FEE_PER_MILLE
            || self.max_deployer_supply_percent as u128 >= PERCENT
        {
            return Err(FactoryError::InvalidConfig);
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================
// FACTORY CONFIG
// ============================================================

/// Persisted factory record: parameters, deployment templates and the deployment counter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FactoryConfig {
    pub params: FactoryParams,
    pub minter_code: Cell,
    pub wallet_code: Cell,
    pub pool_code: Cell,
    /// Template replaced by the last pool-code upgrade
    pub previous_pool_code: Option<Cell>,
    /// Minter salt of the next deployment
    pub next_deployment_id: u64,
    pub is_inited: bool,
}

impl FactoryConfig {
    /// Checked constructor for a factory about to be deployed
    pub fn new(params: FactoryParams, minter_code: Cell, wallet_code: Cell, pool_code: Cell) -> FactoryResult<Self> {
        params.validate()?;
        Ok(Self {
            params,
            minter_code,
            wallet_code,
            pool_code,
            previous_pool_code: None,
            next_deployment_id: 0,
            is_inited: true,
        })
    }

    /// Id for a new deployment; advances the counter
    pub fn take_deployment_id(&mut self) -> FactoryResult<u64> {
        let id = self.next_deployment_id;
        self.next_deployment_id = id.checked_add(1).ok_or(FactoryError::Arithmetic)?;
        Ok(id)
    }

    /// Templates a pool acknowledgement is accepted from, current first
    pub fn pool_templates(&self) -> impl Iterator<Item = &Cell> {
        std::iter::once(&self.pool_code).chain(self.previous_pool_code.as_ref())
    }

    pub fn to_data_cell(&self) -> CodecResult<Cell> {
        crate::storage::store_factory_config(self)
    }

    pub fn state_init(&self, code: &Cell) -> CodecResult<StateInit> {
        Ok(StateInit::new(code.clone(), self.to_data_cell()?))
    }
}

// ============================================================
// POOL DEPLOYMENT
// ============================================================

/// Addresses and amounts of one token + pool deployment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolDeployment {
    pub deployment_id: u64,
    pub minter_init: StateInit,
    pub minter: Address,
    pub pool_init: StateInit,
    pub pool: Address,
    /// The pool's own jetton wallet
    pub pool_wallet: Address,
    /// J0
    pub jetton_balance: u128,
    pub deployer_share: u128,
}
