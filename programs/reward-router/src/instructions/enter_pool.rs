use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::{
    constants::*,
    custody::check_spend_authority,
    errors::RewardRouterError,
    events::PoolEntered,
    state::{Pool, PoolRegistry, Position},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32], pool_id: u64)]
pub struct EnterPool<'info> {
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

    #[account(
        init_if_needed,
        payer = depositor,
        space = Position::LEN,
        seeds = [POSITION_SEED, pool.key().as_ref(), depositor.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, Position>>,

    /// Base asset source, owned by or delegated to the depositor
    #[account(
        mut,
        constraint = source.mint == registry.base_mint @ RewardRouterError::InvalidAsset
    )]
    pub source: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub depositor: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn enter_pool(
    ctx: Context<EnterPool>,
    _router_id: [u8; 32],
    pool_id: u64,
    amount: u64,
) -> Result<()> {
    require!(!ctx.accounts.registry.entry_paused, RewardRouterError::EntryPaused);

    let depositor = ctx.accounts.depositor.key();
    check_spend_authority(&ctx.accounts.source, &depositor, amount)?;

    let minted = ctx.accounts.pool.deposit(amount)?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.source.to_account_info(),
                to: ctx.accounts.pool_vault.to_account_info(),
                authority: ctx.accounts.depositor.to_account_info(),
            },
        ),
        amount,
    )?;

    let pool_key = ctx.accounts.pool.key();
    let position = &mut ctx.accounts.position;
    if position.owner == Pubkey::default() {
        position.pool = pool_key;
        position.owner = depositor;
        position.bump = ctx.bumps.position;
    }
    position.credit(minted)?;

    emit!(PoolEntered {
        pool_id,
        depositor,
        amount,
        minted_shares: minted,
        position_shares: position.shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
