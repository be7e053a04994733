use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{Pool, PoolData, PoolRegistry, RewardDispatcher},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32], pool_id: u64)]
pub struct GetPoolData<'info> {
    #[account(seeds = [REGISTRY_SEED, router_id.as_ref()], bump = registry.bump)]
    pub registry: Box<Account<'info, PoolRegistry>>,

    #[account(
        seeds = [POOL_SEED, registry.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        has_one = registry
    )]
    pub pool: Box<Account<'info, Pool>>,
}

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct GetPoolCount<'info> {
    #[account(seeds = [REGISTRY_SEED, router_id.as_ref()], bump = registry.bump)]
    pub registry: Box<Account<'info, PoolRegistry>>,
}

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct GetPendingDistribution<'info> {
    #[account(seeds = [DISPATCHER_SEED, router_id.as_ref()], bump = dispatcher.bump)]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,
}

pub fn get_pool_data(ctx: Context<GetPoolData>, _router_id: [u8; 32], _pool_id: u64) -> Result<PoolData> {
    Ok(ctx.accounts.pool.data())
}

pub fn convert_to_shares(
    ctx: Context<GetPoolData>,
    _router_id: [u8; 32],
    _pool_id: u64,
    amount: u64,
) -> Result<u64> {
    ctx.accounts.pool.shares_for_deposit(amount)
}

pub fn convert_to_assets(
    ctx: Context<GetPoolData>,
    _router_id: [u8; 32],
    _pool_id: u64,
    shares: u64,
) -> Result<u64> {
    ctx.accounts.pool.payout_for_shares(shares)
}

pub fn get_pool_count(ctx: Context<GetPoolCount>, _router_id: [u8; 32]) -> Result<u64> {
    Ok(ctx.accounts.registry.pool_count())
}

pub fn get_pending_distribution(
    ctx: Context<GetPendingDistribution>,
    _router_id: [u8; 32],
) -> Result<u64> {
    Ok(ctx.accounts.dispatcher.pending_distribution)
}
