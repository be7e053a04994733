use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{
    constants::*,
    errors::RewardRouterError,
    events::PendingSynced,
    state::RewardDispatcher,
};

/// Credits base asset that reached the treasury outside of fee collection.
#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct SyncPending<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump = dispatcher.bump,
        constraint = dispatcher.is_initialized
    )]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,

    #[account(address = dispatcher.base_treasury)]
    pub base_treasury: Box<Account<'info, TokenAccount>>,
}

pub fn sync_pending(ctx: Context<SyncPending>, router_id: [u8; 32]) -> Result<()> {
    let amount = ctx
        .accounts
        .dispatcher
        .untracked_balance(ctx.accounts.base_treasury.amount);
    require!(amount > 0, RewardRouterError::ZeroAmount);

    let pending_after = ctx.accounts.dispatcher.credit_pending(amount)?;

    emit!(PendingSynced {
        router_id,
        amount,
        pending_after,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
