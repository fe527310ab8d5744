// Deployment planning
//
// Every address the factory sends to is derived from the templates in its
// own state. Minters are salted with the deployment id, so no two requests
// ever mint into the same token.

use launchpad_codec::{
    jetton::{InternalTransfer, Mint},
    Address, Cell, CodecResult, MessageBody, StateInit, MAX_COINS,
};
use launchpad_jetton::{minter_state_init, wallet_address, wallet_deploy_value};
use launchpad_ledger::{ExitCode, FeeSchedule};
use launchpad_math::{mul_div, Rounding, PERCENT};
use launchpad_pool::PoolConfig;

use crate::error::{FactoryError, FactoryResult};
use crate::types::{FactoryConfig, PoolDeployment};

/// `(J0, deployer_share)` with `J0 = floor(total * (100 - percent) / 100)`
pub fn split_supply(total_supply: u128, deployer_supply_percent: u8) -> FactoryResult<(u128, u128)> {
    let percent = deployer_supply_percent as u128;
    if percent > PERCENT {
        return Err(FactoryError::InvalidDeployParams);
    }
    let jetton_balance = mul_div(total_supply, PERCENT - percent, PERCENT, Rounding::Down)?;
    Ok((jetton_balance, total_supply - jetton_balance))
}

/// Rejects pools the pool contract would refuse or could not price
pub fn validate_pool_params(jetton_balance: u128, minimal_price: u128) -> FactoryResult<()> {
    if jetton_balance == 0 || minimal_price == 0 {
        return Err(FactoryError::InvalidDeployParams);
    }
    match jetton_balance.checked_mul(minimal_price) {
        Some(base) if base <= MAX_COINS => Ok(()),
        _ => Err(FactoryError::InvalidDeployParams),
    }
}

/// Minter of a factory-made token; the factory is its admin
pub fn minter_init(
    config: &FactoryConfig,
    factory: Address,
    content: &Cell,
    deployment_id: u64,
) -> CodecResult<StateInit> {
    minter_state_init(&config.minter_code, &config.wallet_code, factory, content, deployment_id)
}

/// Uninitialized pool built from `pool_code`
pub fn pool_init_with(
    pool_code: &Cell,
    factory: Address,
    minter: Address,
    jetton_balance: u128,
) -> CodecResult<StateInit> {
    PoolConfig {
        jetton_balance,
        factory,
        minter,
    }
    .state_init(pool_code)
}

/// Uninitialized pool from the current pool template
pub fn pool_init(
    config: &FactoryConfig,
    factory: Address,
    minter: Address,
    jetton_balance: u128,
) -> CodecResult<StateInit> {
    pool_init_with(&config.pool_code, factory, minter, jetton_balance)
}

/// Whether `sender` is the pool of `minter` under the current or the previous template.
/// An acknowledgement still in flight when the template is replaced stays valid.
pub fn is_known_pool(
    config: &FactoryConfig,
    factory: Address,
    workchain: i8,
    minter: Address,
    jetton_balance: u128,
    sender: Address,
) -> CodecResult<bool> {
    for code in config.pool_templates() {
        if pool_init_with(code, factory, minter, jetton_balance)?.address(workchain)? == sender {
            return Ok(true);
        }
    }
    Ok(false)
}

pub fn plan_pool_deployment(
    config: &FactoryConfig,
    factory: Address,
    workchain: i8,
    deployment_id: u64,
    content: &Cell,
    jetton_balance: u128,
    deployer_share: u128,
) -> Result<PoolDeployment, ExitCode> {
    let minter_init = minter_init(config, factory, content, deployment_id)?;
    let minter = minter_init.address(workchain)?;
    let pool_init = pool_init(config, factory, minter, jetton_balance)?;
    let pool = pool_init.address(workchain)?;
    let pool_wallet = wallet_address(&config.wallet_code, pool, minter, workchain)?;
    Ok(PoolDeployment {
        deployment_id,
        minter_init,
        minter,
        pool_init,
        pool,
        pool_wallet,
        jetton_balance,
        deployer_share,
    })
}

/// Mint body for the minter; excesses of the wallet deploy go to `response`
pub fn mint_body(
    query_id: u64,
    to: Address,
    amount: u128,
    response: Address,
    fees: &FeeSchedule,
) -> CodecResult<Cell> {
    let master_msg = InternalTransfer {
        amount,
        from: None,
        response_address: Some(response),
        forward_ton_amount: 0,
        forward_payload: None,
    }
    .to_body(query_id)?;
    Mint {
        to,
        ton_amount: wallet_deploy_value(fees),
        master_msg,
    }
    .to_body(query_id)
}
