use anchor_lang::prelude::*;
use anchor_spl::token::{accessor, Mint, Token, TokenAccount};

use crate::{
    constants::*,
    custody::{move_lamports, native_balance, transfer_signed},
    errors::RewardRouterError,
    events::PaymentReleased,
    state::{FeeAggregator, ReleaseLedger},
};

#[derive(Accounts)]
#[instruction(aggregator_id: [u8; 32])]
pub struct ReleaseNative<'info> {
    #[account(
        mut,
        seeds = [AGGREGATOR_SEED, aggregator_id.as_ref()],
        bump = aggregator.bump,
        constraint = aggregator.is_initialized
    )]
    pub aggregator: Box<Account<'info, FeeAggregator>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = ReleaseLedger::len(aggregator.payees.len()),
        seeds = [RELEASE_LEDGER_SEED, aggregator.key().as_ref(), NATIVE_ASSET.as_ref()],
        bump
    )]
    pub release_ledger: Box<Account<'info, ReleaseLedger>>,

    /// CHECK: must be listed as a payee, checked in the handler
    #[account(mut)]
    pub payee: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(aggregator_id: [u8; 32])]
pub struct ReleaseNativeBatch<'info> {
    #[account(
        mut,
        seeds = [AGGREGATOR_SEED, aggregator_id.as_ref()],
        bump = aggregator.bump,
        constraint = aggregator.is_initialized
    )]
    pub aggregator: Box<Account<'info, FeeAggregator>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = ReleaseLedger::len(aggregator.payees.len()),
        seeds = [RELEASE_LEDGER_SEED, aggregator.key().as_ref(), NATIVE_ASSET.as_ref()],
        bump
    )]
    pub release_ledger: Box<Account<'info, ReleaseLedger>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,

    // Remaining accounts are the payee wallets, all writable
}

#[derive(Accounts)]
#[instruction(aggregator_id: [u8; 32])]
pub struct ReleaseToken<'info> {
    #[account(
        seeds = [AGGREGATOR_SEED, aggregator_id.as_ref()],
        bump = aggregator.bump,
        constraint = aggregator.is_initialized
    )]
    pub aggregator: Box<Account<'info, FeeAggregator>>,

    pub asset_mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = ReleaseLedger::len(aggregator.payees.len()),
        seeds = [RELEASE_LEDGER_SEED, aggregator.key().as_ref(), asset_mint.key().as_ref()],
        bump
    )]
    pub release_ledger: Box<Account<'info, ReleaseLedger>>,

    /// The aggregator's holding of `asset_mint`
    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = aggregator
    )]
    pub aggregator_token: Box<Account<'info, TokenAccount>>,

    /// Destination owned by the payee
    #[account(
        mut,
        constraint = payee_token.mint == asset_mint.key() @ RewardRouterError::InvalidAsset
    )]
    pub payee_token: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(aggregator_id: [u8; 32])]
pub struct ReleaseTokenBatch<'info> {
    #[account(
        seeds = [AGGREGATOR_SEED, aggregator_id.as_ref()],
        bump = aggregator.bump,
        constraint = aggregator.is_initialized
    )]
    pub aggregator: Box<Account<'info, FeeAggregator>>,

    pub asset_mint: Box<Account<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = payer,
        space = ReleaseLedger::len(aggregator.payees.len()),
        seeds = [RELEASE_LEDGER_SEED, aggregator.key().as_ref(), asset_mint.key().as_ref()],
        bump
    )]
    pub release_ledger: Box<Account<'info, ReleaseLedger>>,

    #[account(
        mut,
        associated_token::mint = asset_mint,
        associated_token::authority = aggregator
    )]
    pub aggregator_token: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    // Remaining accounts are payee token accounts of `asset_mint`
}

pub fn release_native(ctx: Context<ReleaseNative>, _aggregator_id: [u8; 32]) -> Result<()> {
    let accounts = ctx.accounts;
    open_ledger(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        NATIVE_ASSET,
        ctx.bumps.release_ledger,
    );

    let index = accounts.aggregator.payee_index(&accounts.payee.key())?;
    pay_native(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        index,
        &accounts.payee.to_account_info(),
    )?;
    Ok(())
}

pub fn release_native_batch<'info>(
    ctx: Context<'_, '_, 'info, 'info, ReleaseNativeBatch<'info>>,
    _aggregator_id: [u8; 32],
) -> Result<()> {
    let accounts = ctx.accounts;
    open_ledger(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        NATIVE_ASSET,
        ctx.bumps.release_ledger,
    );

    let mut paid_count = 0u32;
    for payee in ctx.remaining_accounts.iter() {
        let index = accounts.aggregator.payee_index(payee.key)?;
        let balance = native_balance(&accounts.aggregator.to_account_info())?;
        if accounts
            .release_ledger
            .releasable(&accounts.aggregator, index, balance)?
            == 0
        {
            continue;
        }
        pay_native(&accounts.aggregator, &mut accounts.release_ledger, index, payee)?;
        paid_count += 1;
    }

    require!(paid_count > 0, RewardRouterError::NothingDue);
    msg!("Released native payments to {} payees", paid_count);
    Ok(())
}

pub fn release_token(ctx: Context<ReleaseToken>, _aggregator_id: [u8; 32]) -> Result<()> {
    let accounts = ctx.accounts;
    let asset = accounts.asset_mint.key();
    open_ledger(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        asset,
        ctx.bumps.release_ledger,
    );

    let index = accounts.aggregator.payee_index(&accounts.payee_token.owner)?;
    pay_token(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        index,
        accounts.aggregator_token.to_account_info(),
        accounts.payee_token.to_account_info(),
        accounts.token_program.to_account_info(),
    )?;
    Ok(())
}

pub fn release_token_batch<'info>(
    ctx: Context<'_, '_, 'info, 'info, ReleaseTokenBatch<'info>>,
    _aggregator_id: [u8; 32],
) -> Result<()> {
    let accounts = ctx.accounts;
    let asset = accounts.asset_mint.key();
    open_ledger(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        asset,
        ctx.bumps.release_ledger,
    );

    let aggregator_token = accounts.aggregator_token.to_account_info();
    let mut paid_count = 0u32;
    for payee_token in ctx.remaining_accounts.iter() {
        let destination = Account::<TokenAccount>::try_from(payee_token)?;
        require_keys_eq!(destination.mint, asset, RewardRouterError::InvalidAsset);

        let index = accounts.aggregator.payee_index(&destination.owner)?;
        let balance = accessor::amount(&aggregator_token)?;
        if accounts
            .release_ledger
            .releasable(&accounts.aggregator, index, balance)?
            == 0
        {
            continue;
        }
        pay_token(
            &accounts.aggregator,
            &mut accounts.release_ledger,
            index,
            aggregator_token.clone(),
            payee_token.clone(),
            accounts.token_program.to_account_info(),
        )?;
        paid_count += 1;
    }

    require!(paid_count > 0, RewardRouterError::NothingDue);
    msg!("Released {} payments of {}", paid_count, asset);
    Ok(())
}

/// Sizes the released counters on first use of a ledger.
pub(crate) fn open_ledger(
    aggregator: &Account<FeeAggregator>,
    ledger: &mut ReleaseLedger,
    asset: Pubkey,
    bump: u8,
) {
    ledger.open(aggregator.key(), asset, aggregator.payees.len(), bump);
}

/// Settles what payee `index` is owed in SOL and moves it to `destination`.
pub(crate) fn pay_native<'info>(
    aggregator: &Account<'info, FeeAggregator>,
    ledger: &mut ReleaseLedger,
    index: usize,
    destination: &AccountInfo<'info>,
) -> Result<u64> {
    let aggregator_info = aggregator.to_account_info();
    let amount = ledger.settle(aggregator, index, native_balance(&aggregator_info)?)?;
    move_lamports(&aggregator_info, destination, amount)?;
    emit_release(aggregator, ledger, index, amount)?;
    Ok(amount)
}

/// Settles what payee `index` is owed out of `aggregator_token` and transfers it.
pub(crate) fn pay_token<'info>(
    aggregator: &Account<'info, FeeAggregator>,
    ledger: &mut ReleaseLedger,
    index: usize,
    aggregator_token: AccountInfo<'info>,
    destination: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
) -> Result<u64> {
    let balance = accessor::amount(&aggregator_token)?;
    let amount = ledger.settle(aggregator, index, balance)?;

    let bump = [aggregator.bump];
    let seeds: &[&[u8]] = &[AGGREGATOR_SEED, aggregator.aggregator_id.as_ref(), &bump];
    transfer_signed(
        token_program,
        aggregator_token,
        destination,
        aggregator.to_account_info(),
        &[seeds],
        amount,
    )?;

    emit_release(aggregator, ledger, index, amount)?;
    Ok(amount)
}

fn emit_release(
    aggregator: &FeeAggregator,
    ledger: &ReleaseLedger,
    index: usize,
    amount: u64,
) -> Result<()> {
    emit!(PaymentReleased {
        aggregator_id: aggregator.aggregator_id,
        asset: ledger.asset,
        payee: aggregator.payees[index].account,
        amount,
        released_to_payee: ledger.released_to(index),
        total_released: ledger.total_released,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
