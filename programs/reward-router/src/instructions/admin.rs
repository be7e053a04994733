use anchor_lang::prelude::*;

use crate::{
    constants::*,
    errors::RewardRouterError,
    events::{EntryPauseChanged, FeeAggregatorUpdated},
    state::{PoolRegistry, RewardDispatcher},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct SetFeeAggregator<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump = dispatcher.bump,
        has_one = authority @ RewardRouterError::Unauthorized
    )]
    pub dispatcher: Account<'info, RewardDispatcher>,

    pub authority: Signer<'info>,
}

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct SetEntryPaused<'info> {
    #[account(
        mut,
        seeds = [REGISTRY_SEED, router_id.as_ref()],
        bump = registry.bump,
        has_one = authority @ RewardRouterError::Unauthorized
    )]
    pub registry: Box<Account<'info, PoolRegistry>>,

    pub authority: Signer<'info>,
}

pub fn set_fee_aggregator(
    ctx: Context<SetFeeAggregator>,
    router_id: [u8; 32],
    fee_aggregator: Pubkey,
) -> Result<()> {
    let dispatcher = &mut ctx.accounts.dispatcher;
    let previous = dispatcher.fee_aggregator;
    dispatcher.fee_aggregator = fee_aggregator;

    emit!(FeeAggregatorUpdated {
        router_id,
        previous,
        fee_aggregator,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

pub fn set_entry_paused(
    ctx: Context<SetEntryPaused>,
    router_id: [u8; 32],
    paused: bool,
) -> Result<()> {
    ctx.accounts.registry.entry_paused = paused;

    emit!(EntryPauseChanged {
        router_id,
        paused,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
