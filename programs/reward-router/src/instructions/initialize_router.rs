use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::{
    constants::*,
    events::RouterInitialized,
    state::{PoolRegistry, RewardDispatcher},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct InitializeRouter<'info> {
    #[account(
        init,
        payer = authority,
        space = RewardDispatcher::LEN,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump
    )]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,

    #[account(
        init,
        payer = authority,
        space = PoolRegistry::LEN,
        seeds = [REGISTRY_SEED, router_id.as_ref()],
        bump
    )]
    pub registry: Box<Account<'info, PoolRegistry>>,

    pub base_mint: Box<Account<'info, Mint>>,

    #[account(address = spl_token::native_mint::ID)]
    pub wrapped_native_mint: Box<Account<'info, Mint>>,

    /// Dispatcher-owned base asset treasury
    #[account(
        init,
        payer = authority,
        associated_token::mint = base_mint,
        associated_token::authority = dispatcher
    )]
    pub base_treasury: Box<Account<'info, TokenAccount>>,

    /// Dispatcher-owned wrapped SOL account for the native leg
    #[account(
        init,
        payer = authority,
        seeds = [WRAPPED_NATIVE_SEED, dispatcher.key().as_ref()],
        bump,
        token::mint = wrapped_native_mint,
        token::authority = dispatcher
    )]
    pub wrapped_native_treasury: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn initialize_router(
    ctx: Context<InitializeRouter>,
    router_id: [u8; 32],
    conversion_router: Pubkey,
    fee_aggregator: Pubkey,
) -> Result<()> {
    let dispatcher_key = ctx.accounts.dispatcher.key();
    let registry_key = ctx.accounts.registry.key();
    let base_mint = ctx.accounts.base_mint.key();

    let dispatcher = &mut ctx.accounts.dispatcher;
    dispatcher.router_id = router_id;
    dispatcher.authority = ctx.accounts.authority.key();
    dispatcher.base_mint = base_mint;
    dispatcher.wrapped_native_mint = ctx.accounts.wrapped_native_mint.key();
    dispatcher.conversion_router = conversion_router;
    dispatcher.fee_aggregator = fee_aggregator;
    dispatcher.registry = registry_key;
    dispatcher.base_treasury = ctx.accounts.base_treasury.key();
    dispatcher.wrapped_native_treasury = ctx.accounts.wrapped_native_treasury.key();
    dispatcher.pending_distribution = 0;
    dispatcher.total_collected = 0;
    dispatcher.total_dispatched = 0;
    dispatcher.dispatch_count = 0;
    dispatcher.is_initialized = true;
    dispatcher.bump = ctx.bumps.dispatcher;

    let registry = &mut ctx.accounts.registry;
    registry.router_id = router_id;
    registry.authority = ctx.accounts.authority.key();
    registry.dispatcher = dispatcher_key;
    registry.base_mint = base_mint;
    registry.next_pool_id = 0;
    registry.entry_paused = false;
    registry.pools = Vec::new();
    registry.bump = ctx.bumps.registry;

    emit!(RouterInitialized {
        router_id,
        base_mint,
        conversion_router,
        fee_aggregator,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
