use anchor_lang::prelude::*;

use crate::{
    constants::*,
    events::AggregatorInitialized,
    state::{FeeAggregator, Payee},
};

#[derive(Accounts)]
#[instruction(aggregator_id: [u8; 32], payees: Vec<Payee>)]
pub struct InitializeAggregator<'info> {
    #[account(
        init,
        payer = authority,
        space = FeeAggregator::len(payees.len()),
        seeds = [AGGREGATOR_SEED, aggregator_id.as_ref()],
        bump
    )]
    pub aggregator: Account<'info, FeeAggregator>,

    #[account(mut)]
    pub authority: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn initialize_aggregator(
    ctx: Context<InitializeAggregator>,
    aggregator_id: [u8; 32],
    payees: Vec<Payee>,
) -> Result<()> {
    let total_shares = FeeAggregator::validate_payees(&payees)?;

    let aggregator = &mut ctx.accounts.aggregator;
    aggregator.aggregator_id = aggregator_id;
    aggregator.authority = ctx.accounts.authority.key();
    aggregator.total_shares = total_shares;
    aggregator.payees = payees;
    aggregator.is_initialized = true;
    aggregator.bump = ctx.bumps.aggregator;

    emit!(AggregatorInitialized {
        aggregator_id,
        payee_count: aggregator.payees.len() as u32,
        total_shares,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
