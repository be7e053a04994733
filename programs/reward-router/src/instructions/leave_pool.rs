use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    custody::transfer_signed,
    errors::RewardRouterError,
    events::PoolLeft,
    state::{Pool, PoolRegistry, Position},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32], pool_id: u64)]
pub struct LeavePool<'info> {
    #[account(
        seeds = [REGISTRY_SEED, router_id.as_ref()],
        bump = registry.bump
    )]
    pub registry: Box<Account<'info, PoolRegistry>>,

    #[account(
        mut,
        seeds = [POOL_SEED, registry.key().as_ref(), &pool_id.to_le_bytes()],
        bump = pool.bump,
        has_one = registry
    )]
    pub pool: Box<Account<'info, Pool>>,

    #[account(mut, address = pool.vault)]
    pub pool_vault: Box<Account<'info, TokenAccount>>,

    /// Absent once fully withdrawn; an empty one holds no shares and the
    /// withdrawal fails with `InsufficientShares`
    #[account(
        init_if_needed,
        payer = depositor,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), depositor.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, Position>>,

    #[account(
        mut,
        constraint = destination.mint == registry.base_mint @ RewardRouterError::InvalidAsset
    )]
    pub destination: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

/// Burns `shares` and pays out their current value. Works on closed and
/// unlinked pools. The position is closed once empty.
pub fn leave_pool(
    ctx: Context<LeavePool>,
    _router_id: [u8; 32],
    pool_id: u64,
    shares: u64,
) -> Result<()> {
    let held = ctx.accounts.position.shares;
    let payout = ctx.accounts.pool.withdraw(held, shares)?;
    ctx.accounts.position.debit(shares)?;

    let registry_key = ctx.accounts.registry.key();
    let pool_id_bytes = pool_id.to_le_bytes();
    let bump = [ctx.accounts.pool.bump];
    let seeds: &[&[u8]] = &[POOL_SEED, registry_key.as_ref(), &pool_id_bytes, &bump];
    transfer_signed(
        ctx.accounts.token_program.to_account_info(),
        ctx.accounts.pool_vault.to_account_info(),
        ctx.accounts.destination.to_account_info(),
        ctx.accounts.pool.to_account_info(),
        &[seeds],
        payout,
    )?;

    let position_shares = ctx.accounts.position.shares;
    if position_shares == 0 {
        ctx.accounts
            .position
            .close(ctx.accounts.depositor.to_account_info())?;
    }

    emit!(PoolLeft {
        pool_id,
        depositor: ctx.accounts.depositor.key(),
        burned_shares: shares,
        payout,
        position_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
