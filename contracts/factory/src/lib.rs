//! # Launchpad Factory
//!
//! Deploys jetton + pool pairs and keeps the templates they are built from.
//!
//! ## Responsibilities:
//! 1. Token-only deployment (`deploy_token`)
//! 2. Token + pool deployment with a deployer/pool supply split (`initiate_new`),
//!    finished when the pool acknowledges its init
//! 3. In-place upgrade of its own code and of the pool template

use std::sync::Arc;

use launchpad_codec::{
    messages::{DeployToken, DeploymentTicket, InitiateNew, PoolInit, PoolInitialized, Upgrade},
    op, Cell, CodecResult, Header, MessageBody,
};
use launchpad_jetton::mint_required_value;
use launchpad_ledger::{
    address_arg, cell_arg, code_cell, int_arg, parse_bounced, ContractCode, ExecutionContext,
    ExitCode, GetterContext, InternalMessage, Ledger, LedgerResult, OutboundMessage, SendMode,
    StackValue,
};
use tracing::warn;

pub mod client;
pub mod deployment;
mod error;
mod events;
pub mod fees;
pub mod storage;
pub mod types;

pub use client::FactoryContract;
pub use error::{FactoryError, FactoryResult};
pub use types::{FactoryConfig, FactoryParams, PoolDeployment};

use deployment::*;
use events::*;
use fees::*;
use storage::{load_factory_config, store_factory_config};

/// Name under which the factory code is registered
pub const FACTORY_CODE_NAME: &str = "launchpad-factory";

pub struct FactoryCode;

impl FactoryCode {
    pub fn code(version: u32) -> CodecResult<Cell> {
        code_cell(FACTORY_CODE_NAME, version)
    }

    /// Register the current factory code on `ledger` and return its cell
    pub fn install(ledger: &mut Ledger) -> LedgerResult<Cell> {
        let code = Self::code(1)?;
        ledger.register_code(&code, Arc::new(FactoryCode));
        Ok(code)
    }
}

// ============================================================
// GUARDS
// ============================================================

fn require_value(ctx: &ExecutionContext<'_>, needed: u128) -> FactoryResult<()> {
    if ctx.remaining_value() < needed {
        return Err(FactoryError::InsufficientAttachedValue);
    }
    Ok(())
}

// ============================================================
// HANDLERS
// ============================================================

fn handle_deploy_token(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    query_id: u64,
    request: DeployToken,
    mut config: FactoryConfig,
) -> Result<(), ExitCode> {
    if request.total_supply == 0 {
        return Err(FactoryError::InvalidDeployParams.into());
    }
    require_value(ctx, mint_leg_value(ctx.fees()))?;

    let deployment_id = config.take_deployment_id()?;
    ctx.set_data(store_factory_config(&config)?);
    let init = minter_init(&config, ctx.address(), &request.content, deployment_id)?;
    let minter = ctx.address_of(&init)?;
    let body = mint_body(query_id, msg.src, request.total_supply, msg.src, ctx.fees())?;
    ctx.send(
        OutboundMessage::new(minter, 0, body).with_state_init(init),
        SendMode::CARRY_REMAINING_VALUE,
    );

    emit_token_deployed(ctx, deployment_id, &minter, &msg.src, request.total_supply);
    Ok(())
}

fn handle_initiate_new(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    query_id: u64,
    request: InitiateNew,
    mut config: FactoryConfig,
) -> Result<(), ExitCode> {
    if request.deployer_supply_percent > config.params.max_deployer_supply_percent {
        return Err(FactoryError::DeployerSupplyTooHigh.into());
    }
    let (jetton_balance, deployer_share) =
        split_supply(request.total_supply, request.deployer_supply_percent)?;
    validate_pool_params(jetton_balance, request.minimal_price)?;
    let fees = ctx.fees();
    require_value(ctx, estimate_initiate_new_value(fees) - fees.compute_fee)?;

    let deployment_id = config.take_deployment_id()?;
    ctx.set_data(store_factory_config(&config)?);
    let factory = ctx.address();
    let deployment = plan_pool_deployment(
        &config,
        factory,
        ctx.workchain(),
        deployment_id,
        &request.content,
        jetton_balance,
        deployer_share,
    )?;
    let ticket = DeploymentTicket {
        deployment_id,
        deployer: msg.src,
        deployer_share,
        content: request.content,
    }
    .to_cell()?;
    let body = PoolInit {
        jetton_balance,
        minimal_price: request.minimal_price,
        fee_per_mille: config.params.fee_per_mille,
        factory,
        jetton_wallet: deployment.pool_wallet,
        admin: config.params.admin,
        ticket: Some(ticket),
    }
    .to_body(query_id)?;
    ctx.send(
        OutboundMessage::new(deployment.pool, 0, body).with_state_init(deployment.pool_init.clone()),
        SendMode::CARRY_REMAINING_VALUE,
    );

    emit_pool_deployment_started(ctx, &deployment, &msg.src);
    Ok(())
}

/// Second half of `initiate_new`: mint J0 to the pool and the rest to the deployer
fn handle_pool_initialized(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    query_id: u64,
    ack: PoolInitialized,
    config: &FactoryConfig,
) -> Result<(), ExitCode> {
    let ticket = DeploymentTicket::from_cell(&ack.ticket)?;
    let factory = ctx.address();
    let minter_init = minter_init(config, factory, &ticket.content, ticket.deployment_id)?;
    let minter = ctx.address_of(&minter_init)?;
    if !is_known_pool(config, factory, ctx.workchain(), minter, ack.jetton_balance, msg.src)? {
        return Err(FactoryError::WrongSender.into());
    }
    let pool = msg.src;

    let fees = ctx.fees().clone();
    let pool_mint = mint_body(query_id, pool, ack.jetton_balance, ticket.deployer, &fees)?;
    if ticket.deployer_share == 0 {
        require_value(ctx, pool_initialized_required_value(&fees, 1))?;
        ctx.send(
            OutboundMessage::new(minter, 0, pool_mint).with_state_init(minter_init),
            SendMode::CARRY_REMAINING_VALUE,
        );
    } else {
        require_value(ctx, pool_initialized_required_value(&fees, 2))?;
        let deployer_mint = mint_body(query_id, ticket.deployer, ticket.deployer_share, ticket.deployer, &fees)?;
        let rest = ctx.remaining_value() - mint_leg_value(&fees);
        ctx.send(
            OutboundMessage::new(minter, mint_required_value(&fees), pool_mint)
                .with_state_init(minter_init.clone()),
            SendMode::PAY_FEES_SEPARATELY,
        );
        ctx.send(
            OutboundMessage::new(minter, rest, deployer_mint).with_state_init(minter_init),
            SendMode::ORDINARY,
        );
    }

    emit_pool_deployed(ctx, ticket.deployment_id, &pool, &minter, ticket.deployer_share);
    Ok(())
}

fn handle_upgrade(
    ctx: &mut ExecutionContext<'_>,
    msg: &InternalMessage,
    upgrade: Upgrade,
    mut config: FactoryConfig,
) -> Result<(), ExitCode> {
    if msg.src != config.params.admin {
        return Err(FactoryError::NotAdmin.into());
    }
    let fees = ctx.fees();
    let with_pool_code = upgrade.pool_code.is_some();
    require_value(ctx, estimate_upgrade_value(fees, with_pool_code) - fees.compute_fee)?;

    // deployed pools keep their code; only future deployments use the new template
    if let Some(pool_code) = upgrade.pool_code {
        let replaced = std::mem::replace(&mut config.pool_code, pool_code);
        config.previous_pool_code = Some(replaced);
        ctx.set_data(store_factory_config(&config)?);
    }
    ctx.set_code(upgrade.code);

    let admin = config.params.admin;
    emit_upgraded(ctx, &admin, with_pool_code);
    Ok(())
}

fn handle_bounce(ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
    let mut s = parse_bounced(&msg.body)?;
    let op = Header::load(&mut s)?.map(|h| h.op);
    warn!(factory = %ctx.address(), from = %msg.src, ?op, value = msg.value, "deployment message bounced");
    Ok(())
}

// ============================================================
// CONTRACT
// ============================================================

impl ContractCode for FactoryCode {
    fn name(&self) -> &str {
        FACTORY_CODE_NAME
    }

    fn receive(&self, ctx: &mut ExecutionContext<'_>, msg: &InternalMessage) -> Result<(), ExitCode> {
        if msg.bounced {
            return handle_bounce(ctx, msg);
        }
        let mut s = msg.body.parse();
        let Some(header) = Header::load(&mut s)? else {
            return Ok(());
        };
        if header.op == op::TOP_UP {
            return Ok(());
        }
        let config = load_factory_config(ctx.data())?;
        if !config.is_inited {
            return Err(FactoryError::NotInitialized.into());
        }

        match header.op {
            op::DEPLOY_TOKEN => {
                let request = DeployToken::load_payload(&mut s)?;
                handle_deploy_token(ctx, msg, header.query_id, request, config)
            }
            op::INITIATE_NEW => {
                let request = InitiateNew::load_payload(&mut s)?;
                handle_initiate_new(ctx, msg, header.query_id, request, config)
            }
            op::POOL_INITIALIZED => {
                let ack = PoolInitialized::load_payload(&mut s)?;
                handle_pool_initialized(ctx, msg, header.query_id, ack, &config)
            }
            op::UPGRADE => {
                let upgrade = Upgrade::load_payload(&mut s)?;
                handle_upgrade(ctx, msg, upgrade, config)
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
        let config = load_factory_config(ctx.data)?;
        let value = match method {
            "get_admin_address" => StackValue::Address(config.params.admin),
            "get_fee_per_mille" => StackValue::Int(config.params.fee_per_mille as u128),
            "get_max_deployer_supply_percent" => {
                StackValue::Int(config.params.max_deployer_supply_percent as u128)
            }
            "get_pool_code" => StackValue::Cell(config.pool_code),
            "get_next_deployment_id" => StackValue::Int(config.next_deployment_id as u128),
            "get_jetton_minter_address" => {
                let content = cell_arg(args, 0)?;
                let deployment_id = u64::try_from(int_arg(args, 1)?).map_err(|_| ExitCode::RANGE_CHECK)?;
                let init = minter_init(&config, ctx.address, content, deployment_id)?;
                StackValue::Address(ctx.address_of(&init)?)
            }
            "get_pool_address" => {
                let minter = address_arg(args, 0)?;
                let jetton_balance = int_arg(args, 1)?;
                let init = pool_init(&config, ctx.address, minter, jetton_balance)?;
                StackValue::Address(ctx.address_of(&init)?)
            }
            _ => return Err(ExitCode::METHOD_NOT_FOUND),
        };
        Ok(vec![value])
    }
}
