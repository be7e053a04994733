use anchor_lang::prelude::*;
use anchor_spl::token::{self, accessor, Mint, SyncNative, Token, TokenAccount};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    constants::*,
    conversion_router::{self, ConvertArgs},
    custody::{move_lamports, native_balance, transfer_signed},
    errors::RewardRouterError,
    events::FeesCollected,
    state::{FeeAggregator, ReleaseLedger, RewardDispatcher},
};

use super::release::{open_ledger, pay_native, pay_token};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct CollectNativeFees<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump = dispatcher.bump,
        constraint = dispatcher.is_initialized
    )]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,

    #[account(
        mut,
        address = dispatcher.fee_aggregator @ RewardRouterError::InvalidAggregator
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

    #[account(mut, address = dispatcher.wrapped_native_treasury)]
    pub wrapped_native_treasury: Box<Account<'info, TokenAccount>>,

    #[account(mut, address = dispatcher.base_treasury)]
    pub base_treasury: Box<Account<'info, TokenAccount>>,

    /// CHECK: conversion route state, owned and validated by the router
    #[account(mut)]
    pub route: Option<UncheckedAccount<'info>>,

    /// CHECK: compared against the dispatcher configuration
    pub conversion_router: Option<UncheckedAccount<'info>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    // Remaining accounts are forwarded to the conversion router
}

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct CollectTokenFees<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump = dispatcher.bump,
        constraint = dispatcher.is_initialized
    )]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,

    #[account(address = dispatcher.fee_aggregator @ RewardRouterError::InvalidAggregator)]
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

    #[account(mut, address = dispatcher.base_treasury)]
    pub base_treasury: Box<Account<'info, TokenAccount>>,

    /// Dispatcher-owned holding of `asset_mint`; required unless it is the base
    /// asset, where it names a stray base account to sweep
    #[account(mut)]
    pub dispatcher_token: Option<Box<Account<'info, TokenAccount>>>,

    /// CHECK: conversion route state, owned and validated by the router
    #[account(mut)]
    pub route: Option<UncheckedAccount<'info>>,

    /// CHECK: compared against the dispatcher configuration
    pub conversion_router: Option<UncheckedAccount<'info>>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,

    // Remaining accounts are forwarded to the conversion router
}

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct CollectTokenFeesBatch<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump = dispatcher.bump,
        constraint = dispatcher.is_initialized
    )]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,

    #[account(address = dispatcher.fee_aggregator @ RewardRouterError::InvalidAggregator)]
    pub aggregator: Box<Account<'info, FeeAggregator>>,

    #[account(mut, address = dispatcher.base_treasury)]
    pub base_treasury: Box<Account<'info, TokenAccount>>,

    /// CHECK: compared against the dispatcher configuration
    pub conversion_router: Option<UncheckedAccount<'info>>,

    pub token_program: Program<'info, Token>,

    // Remaining accounts, per asset in order:
    // [release_ledger, aggregator_token, dispatcher_token, route]
}

/// Releases the dispatcher's native share into the wrapped-native treasury,
/// sweeping in lamports already released onto the dispatcher account, and
/// converts the whole wrapped balance into the base asset.
pub fn collect_native_fees<'info>(
    ctx: Context<'_, '_, 'info, 'info, CollectNativeFees<'info>>,
    router_id: [u8; 32],
    minimum_amount_out: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    open_ledger(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        NATIVE_ASSET,
        ctx.bumps.release_ledger,
    );

    let index = accounts.aggregator.payee_index(&accounts.dispatcher.key())?;
    let balance = native_balance(&accounts.aggregator.to_account_info())?;
    let wrapped = accounts.wrapped_native_treasury.to_account_info();
    if accounts
        .release_ledger
        .releasable(&accounts.aggregator, index, balance)?
        > 0
    {
        pay_native(
            &accounts.aggregator,
            &mut accounts.release_ledger,
            index,
            &wrapped,
        )?;
    }

    let dispatcher_info = accounts.dispatcher.to_account_info();
    let held = native_balance(&dispatcher_info)?;
    if held > 0 {
        move_lamports(&dispatcher_info, &wrapped, held)?;
    }

    token::sync_native(CpiContext::new(
        accounts.token_program.to_account_info(),
        SyncNative {
            account: wrapped.clone(),
        },
    ))?;

    let amount_in = accessor::amount(&wrapped)?;
    if amount_in == 0 {
        msg!("No native fees held for the dispatcher");
        return Ok(());
    }

    let dispatcher = &accounts.dispatcher;
    let bump = [dispatcher.bump];
    let seeds: &[&[u8]] = &[DISPATCHER_SEED, router_id.as_ref(), &bump];

    let base_amount = if dispatcher.base_mint == dispatcher.wrapped_native_mint {
        transfer_signed(
            accounts.token_program.to_account_info(),
            wrapped,
            accounts.base_treasury.to_account_info(),
            dispatcher.to_account_info(),
            &[seeds],
            amount_in,
        )?;
        amount_in
    } else {
        let router = checked_router(dispatcher, accounts.conversion_router.as_ref())?;
        let route = accounts
            .route
            .as_ref()
            .ok_or(RewardRouterError::InvalidConversionRouter)?;
        conversion_router::cpi::convert(
            router,
            route.to_account_info(),
            wrapped,
            accounts.base_treasury.to_account_info(),
            dispatcher.to_account_info(),
            accounts.token_program.to_account_info(),
            ctx.remaining_accounts,
            ConvertArgs {
                amount_in,
                minimum_amount_out,
            },
            &[seeds],
        )?
    };

    record_collection(
        &mut accounts.dispatcher,
        router_id,
        NATIVE_ASSET,
        amount_in,
        base_amount,
    )
}

/// Releases the dispatcher's share of one token asset and books it as pending.
///
/// For the base asset, `dispatcher_token` may name another dispatcher-owned
/// base account to sweep into the treasury; every untracked treasury unit is
/// credited. Other assets are released into `dispatcher_token` and its whole
/// balance is converted.
pub fn collect_token_fees<'info>(
    ctx: Context<'_, '_, 'info, 'info, CollectTokenFees<'info>>,
    router_id: [u8; 32],
    minimum_amount_out: u64,
) -> Result<()> {
    let accounts = ctx.accounts;
    let asset = accounts.asset_mint.key();
    open_ledger(
        &accounts.aggregator,
        &mut accounts.release_ledger,
        asset,
        ctx.bumps.release_ledger,
    );

    let dispatcher = &accounts.dispatcher;
    let index = accounts.aggregator.payee_index(&dispatcher.key())?;
    let owed = accounts.release_ledger.releasable(
        &accounts.aggregator,
        index,
        accounts.aggregator_token.amount,
    )?;

    let bump = [dispatcher.bump];
    let seeds: &[&[u8]] = &[DISPATCHER_SEED, router_id.as_ref(), &bump];

    let (amount_in, base_amount) = if asset == dispatcher.base_mint {
        if owed > 0 {
            pay_token(
                &accounts.aggregator,
                &mut accounts.release_ledger,
                index,
                accounts.aggregator_token.to_account_info(),
                accounts.base_treasury.to_account_info(),
                accounts.token_program.to_account_info(),
            )?;
        }

        if let Some(held) = accounts.dispatcher_token.as_ref() {
            require_keys_eq!(held.mint, asset, RewardRouterError::InvalidAsset);
            require_keys_eq!(held.owner, dispatcher.key(), RewardRouterError::InvalidAsset);
            if held.key() != dispatcher.base_treasury {
                transfer_signed(
                    accounts.token_program.to_account_info(),
                    held.to_account_info(),
                    accounts.base_treasury.to_account_info(),
                    dispatcher.to_account_info(),
                    &[seeds],
                    held.amount,
                )?;
            }
        }

        let treasury_balance = accessor::amount(&accounts.base_treasury.to_account_info())?;
        let untracked = dispatcher.untracked_balance(treasury_balance);
        require!(untracked > 0, RewardRouterError::NothingDue);
        (untracked, untracked)
    } else {
        let dispatcher_token = accounts
            .dispatcher_token
            .as_ref()
            .ok_or(RewardRouterError::InvalidAsset)?;
        require_keys_eq!(dispatcher_token.mint, asset, RewardRouterError::InvalidAsset);
        require_keys_eq!(
            dispatcher_token.owner,
            dispatcher.key(),
            RewardRouterError::InvalidAsset
        );
        let router = checked_router(dispatcher, accounts.conversion_router.as_ref())?;
        let route = accounts
            .route
            .as_ref()
            .ok_or(RewardRouterError::InvalidConversionRouter)?;

        if owed > 0 {
            pay_token(
                &accounts.aggregator,
                &mut accounts.release_ledger,
                index,
                accounts.aggregator_token.to_account_info(),
                dispatcher_token.to_account_info(),
                accounts.token_program.to_account_info(),
            )?;
        }
        let amount_in = accessor::amount(&dispatcher_token.to_account_info())?;
        require!(amount_in > 0, RewardRouterError::NothingDue);

        let base_amount = conversion_router::cpi::convert(
            router,
            route.to_account_info(),
            dispatcher_token.to_account_info(),
            accounts.base_treasury.to_account_info(),
            dispatcher.to_account_info(),
            accounts.token_program.to_account_info(),
            ctx.remaining_accounts,
            ConvertArgs {
                amount_in,
                minimum_amount_out,
            },
            &[seeds],
        )?;
        (amount_in, base_amount)
    };

    record_collection(&mut accounts.dispatcher, router_id, asset, amount_in, base_amount)
}

/// Collects several token assets in one instruction. Every ledger must already
/// be open. An asset is skipped when nothing is owed and the dispatcher holds
/// none of it; the batch fails with `NothingDue` only when every asset was
/// skipped.
pub fn collect_token_fees_batch<'info>(
    ctx: Context<'_, '_, 'info, 'info, CollectTokenFeesBatch<'info>>,
    router_id: [u8; 32],
    assets: Vec<Pubkey>,
) -> Result<()> {
    require!(
        ctx.remaining_accounts.len() == assets.len() * COLLECT_BATCH_GROUP,
        RewardRouterError::InvalidAsset
    );

    let accounts = ctx.accounts;
    let aggregator_key = accounts.aggregator.key();
    let dispatcher_key = accounts.dispatcher.key();
    let index = accounts.aggregator.payee_index(&dispatcher_key)?;
    let base_mint = accounts.dispatcher.base_mint;
    let base_treasury = accounts.base_treasury.to_account_info();
    let token_program = accounts.token_program.to_account_info();

    let bump = [accounts.dispatcher.bump];
    let seeds: &[&[u8]] = &[DISPATCHER_SEED, router_id.as_ref(), &bump];

    let mut collected_count = 0u32;
    for (asset, group) in assets
        .iter()
        .zip(ctx.remaining_accounts.chunks(COLLECT_BATCH_GROUP))
    {
        let (ledger_info, aggregator_token, dispatcher_token, route) =
            (&group[0], &group[1], &group[2], &group[3]);

        require!(
            ledger_info.owner == &crate::ID && !ledger_info.data_is_empty(),
            RewardRouterError::LedgerNotOpen
        );
        let mut ledger = Account::<ReleaseLedger>::try_from(ledger_info)?;
        require_keys_eq!(ledger.aggregator, aggregator_key, RewardRouterError::LedgerNotOpen);
        require_keys_eq!(ledger.asset, *asset, RewardRouterError::InvalidAsset);
        require_keys_eq!(
            aggregator_token.key(),
            get_associated_token_address(&aggregator_key, asset),
            RewardRouterError::InvalidAsset
        );

        let destination = Account::<TokenAccount>::try_from(dispatcher_token)?;
        require_keys_eq!(destination.mint, *asset, RewardRouterError::InvalidAsset);
        require_keys_eq!(destination.owner, dispatcher_key, RewardRouterError::InvalidAsset);

        let balance = accessor::amount(aggregator_token)?;
        let owed = ledger.releasable(&accounts.aggregator, index, balance)?;
        if owed > 0 {
            pay_token(
                &accounts.aggregator,
                &mut ledger,
                index,
                aggregator_token.clone(),
                dispatcher_token.clone(),
                token_program.clone(),
            )?;
            ledger.exit(&crate::ID)?;
        }

        let (amount_in, base_amount) = if *asset == base_mint {
            require_keys_eq!(
                dispatcher_token.key(),
                base_treasury.key(),
                RewardRouterError::InvalidAsset
            );
            let untracked = accounts
                .dispatcher
                .untracked_balance(accessor::amount(&base_treasury)?);
            if untracked == 0 {
                continue;
            }
            (untracked, untracked)
        } else {
            let amount_in = accessor::amount(dispatcher_token)?;
            if amount_in == 0 {
                continue;
            }
            let router = checked_router(&accounts.dispatcher, accounts.conversion_router.as_ref())?;
            let base_amount = conversion_router::cpi::convert(
                router,
                route.clone(),
                dispatcher_token.clone(),
                base_treasury.clone(),
                accounts.dispatcher.to_account_info(),
                token_program.clone(),
                &[],
                ConvertArgs {
                    amount_in,
                    minimum_amount_out: 0,
                },
                &[seeds],
            )?;
            (amount_in, base_amount)
        };

        record_collection(&mut accounts.dispatcher, router_id, *asset, amount_in, base_amount)?;
        collected_count += 1;
    }

    require!(collected_count > 0, RewardRouterError::NothingDue);
    msg!("Collected fees for {} of {} assets", collected_count, assets.len());
    Ok(())
}

/// The conversion router account, checked against the dispatcher configuration.
fn checked_router<'info>(
    dispatcher: &RewardDispatcher,
    conversion_router: Option<&UncheckedAccount<'info>>,
) -> Result<AccountInfo<'info>> {
    let router = conversion_router.ok_or(RewardRouterError::InvalidConversionRouter)?;
    require_keys_eq!(
        router.key(),
        dispatcher.conversion_router,
        RewardRouterError::InvalidConversionRouter
    );
    require!(router.executable, RewardRouterError::InvalidConversionRouter);
    Ok(router.to_account_info())
}

fn record_collection(
    dispatcher: &mut RewardDispatcher,
    router_id: [u8; 32],
    asset: Pubkey,
    amount_in: u64,
    base_amount: u64,
) -> Result<()> {
    let pending_after = dispatcher.credit_pending(base_amount)?;

    emit!(FeesCollected {
        router_id,
        asset,
        amount_in,
        base_amount,
        pending_after,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}
