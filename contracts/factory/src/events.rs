//! Factory events

use launchpad_codec::Address;
use launchpad_ledger::{Event, ExecutionContext, StackValue};
use tracing::info;

use crate::types::PoolDeployment;

/// Emitted when a token-only deployment is sent
pub fn emit_token_deployed(
    ctx: &mut ExecutionContext<'_>,
    deployment_id: u64,
    minter: &Address,
    owner: &Address,
    total_supply: u128,
) {
    info!(factory = %ctx.address(), deployment_id, minter = %minter, owner = %owner, total_supply, "token deployment sent");
    ctx.emit(
        Event::new("TokenDeployed")
            .with("deployment_id", StackValue::Int(deployment_id as u128))
            .with("minter", StackValue::Address(*minter))
            .with("owner", StackValue::Address(*owner))
            .with("total_supply", StackValue::Int(total_supply)),
    );
}

/// Emitted when the pool init leaves the factory; minting waits for the pool's acknowledgement
pub fn emit_pool_deployment_started(ctx: &mut ExecutionContext<'_>, deployment: &PoolDeployment, deployer: &Address) {
    info!(
        factory = %ctx.address(),
        deployment_id = deployment.deployment_id,
        pool = %deployment.pool,
        minter = %deployment.minter,
        jetton_balance = deployment.jetton_balance,
        deployer_share = deployment.deployer_share,
        "pool deployment started"
    );
    ctx.emit(
        Event::new("PoolDeploymentStarted")
            .with("deployment_id", StackValue::Int(deployment.deployment_id as u128))
            .with("pool", StackValue::Address(deployment.pool))
            .with("minter", StackValue::Address(deployment.minter))
            .with("deployer", StackValue::Address(*deployer))
            .with("jetton_balance", StackValue::Int(deployment.jetton_balance))
            .with("deployer_share", StackValue::Int(deployment.deployer_share)),
    );
}

/// Emitted when the pool acknowledged its init and the mints are sent
pub fn emit_pool_deployed(
    ctx: &mut ExecutionContext<'_>,
    deployment_id: u64,
    pool: &Address,
    minter: &Address,
    deployer_share: u128,
) {
    info!(factory = %ctx.address(), deployment_id, pool = %pool, minter = %minter, deployer_share, "pool deployed, minting");
    ctx.emit(
        Event::new("PoolDeployed")
            .with("deployment_id", StackValue::Int(deployment_id as u128))
            .with("pool", StackValue::Address(*pool))
            .with("minter", StackValue::Address(*minter))
            .with("deployer_share", StackValue::Int(deployer_share)),
    );
}

pub fn emit_upgraded(ctx: &mut ExecutionContext<'_>, admin: &Address, pool_code_replaced: bool) {
    info!(factory = %ctx.address(), admin = %admin, pool_code_replaced, "factory code replaced");
    ctx.emit(
        Event::new("Upgrade")
            .with("admin", StackValue::Address(*admin))
            .with("pool_code_replaced", StackValue::Int(pool_code_replaced as u128)),
    );
}
