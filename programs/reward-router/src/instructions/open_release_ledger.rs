use anchor_lang::prelude::*;

use crate::{
    constants::*,
    state::{FeeAggregator, ReleaseLedger},
};

/// Opens the per-asset release counters of an aggregator. `asset` is a mint,
/// or `NATIVE_ASSET` for SOL. Permissionless: the caller only pays rent.
#[derive(Accounts)]
#[instruction(aggregator_id: [u8; 32], asset: Pubkey)]
pub struct OpenReleaseLedger<'info> {
    #[account(
        seeds = [AGGREGATOR_SEED, aggregator_id.as_ref()],
        bump = aggregator.bump,
        constraint = aggregator.is_initialized
    )]
    pub aggregator: Box<Account<'info, FeeAggregator>>,

    #[account(
        init,
        payer = payer,
        space = ReleaseLedger::len(aggregator.payees.len()),
        seeds = [RELEASE_LEDGER_SEED, aggregator.key().as_ref(), asset.as_ref()],
        bump
    )]
    pub release_ledger: Box<Account<'info, ReleaseLedger>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn open_release_ledger(
    ctx: Context<OpenReleaseLedger>,
    _aggregator_id: [u8; 32],
    asset: Pubkey,
) -> Result<()> {
    let aggregator = ctx.accounts.aggregator.key();
    let payee_count = ctx.accounts.aggregator.payees.len();
    ctx.accounts
        .release_ledger
        .open(aggregator, asset, payee_count, ctx.bumps.release_ledger);

    msg!("Release ledger opened for asset {}", asset);
    Ok(())
}
