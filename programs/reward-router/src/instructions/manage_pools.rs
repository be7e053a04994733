use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    errors::RewardRouterError,
    events::{PoolCreated, PoolLinked, PoolUnlinked, PoolUpdated},
    state::{Pool, PoolRegistry},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct CreatePool<'info> {
    #[account(
        mut,
        seeds = [REGISTRY_SEED, router_id.as_ref()],
        bump = registry.bump,
        has_one = authority @ RewardRouterError::Unauthorized
    )]
    pub registry: Box<Account<'info, PoolRegistry>>,

    #[account(
        init,
        payer = authority,
        space = Pool::LEN,
        seeds = [POOL_SEED, registry.key().as_ref(), &registry.next_pool_id.to_le_bytes()],
        bump
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(address = registry.base_mint @ RewardRouterError::InvalidAsset)]
    pub base_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        seeds = [POOL_VAULT_SEED, pool.key().as_ref()],
        bump,
        token::mint = base_mint,
        token::authority = pool
    )]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

/// Shared by update, add and remove: an existing pool under an authorized registry.
#[derive(Accounts)]
#[instruction(router_id: [u8; 32], pool_id: u64)]
pub struct ManagePool<'info> {
    #[account(
        mut,
        seeds = [REGISTRY_SEED, router_id.as_ref()],
        bump = registry.bump,
        has_one = authority @ RewardRouterError::Unauthorized
    )]
    pub registry: Box<Account<'info, PoolRegistry>>,

    #[account(
        mut,
        seeds = [POOL_SEED, registry.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        has_one = registry
    )]
    pub pool: Box<Account<'info, Pool>>,

    pub authority: Signer<'info>,
}

pub fn create_pool(
    ctx: Context<CreatePool>,
    router_id: [u8; 32],
    name: String,
    opened: bool,
    minimum_entry: u64,
    boost: u64,
) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let registry = &mut ctx.accounts.registry;
    let pool_id = registry.allocate_id()?;
    registry.link(pool_key)?;

    let pool = &mut ctx.accounts.pool;
    pool.configure(name, opened, minimum_entry, boost)?;
    pool.registry = registry.key();
    pool.pool_id = pool_id;
    pool.underlying_supply = 0;
    pool.total_shares = 0;
    pool.vault = ctx.accounts.pool_vault.key();
    pool.linked = true;
    pool.bump = ctx.bumps.pool;

    emit!(PoolCreated {
        router_id,
        pool_id,
        pool: pool_key,
        name: pool.name.clone(),
        opened,
        minimum_entry,
        boost,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

pub fn update_pool(
    ctx: Context<ManagePool>,
    router_id: [u8; 32],
    pool_id: u64,
    name: String,
    opened: bool,
    minimum_entry: u64,
    boost: u64,
) -> Result<()> {
    let pool = &mut ctx.accounts.pool;
    pool.configure(name, opened, minimum_entry, boost)?;

    emit!(PoolUpdated {
        router_id,
        pool_id,
        name: pool.name.clone(),
        opened,
        minimum_entry,
        boost,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn add_pool(
    ctx: Context<ManagePool>,
    router_id: [u8; 32],
    pool_id: u64,
    boost: u64,
) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let pool = &mut ctx.accounts.pool;
    Pool::validate_params(&pool.name, boost)?;

    let registry = &mut ctx.accounts.registry;
    registry.link(pool_key)?;
    pool.boost = boost;
    pool.linked = true;

    emit!(PoolLinked {
        router_id,
        pool_id,
        boost,
        live_pools: registry.pools.len() as u32,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

/// Unlinks a pool from distribution. Depositors keep their shares and can
/// still leave.
pub fn remove_pool(ctx: Context<ManagePool>, router_id: [u8; 32], pool_id: u64) -> Result<()> {
    let pool_key = ctx.accounts.pool.key();
    let registry = &mut ctx.accounts.registry;
    registry.unlink(&pool_key)?;
    ctx.accounts.pool.linked = false;

    emit!(PoolUnlinked {
        router_id,
        pool_id,
        live_pools: registry.pools.len() as u32,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
