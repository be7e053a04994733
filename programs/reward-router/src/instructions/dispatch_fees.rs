use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::{
    constants::*,
    custody::transfer_signed,
    errors::RewardRouterError,
    events::{FeesDispatched, PoolRewarded},
    math::weighted_split,
    state::{Pool, PoolRegistry, RewardDispatcher},
};

#[derive(Accounts)]
#[instruction(router_id: [u8; 32])]
pub struct DispatchFees<'info> {
    #[account(
        mut,
        seeds = [DISPATCHER_SEED, router_id.as_ref()],
        bump = dispatcher.bump,
        constraint = dispatcher.is_initialized
    )]
    pub dispatcher: Box<Account<'info, RewardDispatcher>>,

    #[account(
        seeds = [REGISTRY_SEED, router_id.as_ref()],
        bump = registry.bump,
        constraint = registry.key() == dispatcher.registry
    )]
    pub registry: Box<Account<'info, PoolRegistry>>,

    #[account(mut, address = dispatcher.base_treasury)]
    pub base_treasury: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,

    // Remaining accounts are [pool, pool_vault] for every live pool, in
    // registry order
}

/// Splits the pending base asset across live pools by supply times boost.
///
/// Each reward is floored; the undistributed remainder stays pending for the
/// next cycle. Rewards raise `underlying_supply` without minting shares, so
/// every depositor's share value grows in proportion.
pub fn dispatch_fees<'info>(
    ctx: Context<'_, '_, 'info, 'info, DispatchFees<'info>>,
    router_id: [u8; 32],
) -> Result<()> {
    let registry = &ctx.accounts.registry;
    let remaining = ctx.remaining_accounts;
    require!(
        remaining.len() == registry.pools.len() * DISPATCH_POOL_GROUP,
        RewardRouterError::PoolAccountsMismatch
    );

    let mut pools = Vec::with_capacity(registry.pools.len());
    for (expected, group) in registry
        .pools
        .iter()
        .zip(remaining.chunks(DISPATCH_POOL_GROUP))
    {
        let pool_info = &group[0];
        let vault_info = &group[1];
        require_keys_eq!(pool_info.key(), *expected, RewardRouterError::PoolAccountsMismatch);

        let pool = Account::<Pool>::try_from(pool_info)?;
        require_keys_eq!(pool.vault, vault_info.key(), RewardRouterError::PoolAccountsMismatch);
        pools.push((pool, vault_info));
    }

    let weights: Vec<u128> = pools.iter().map(|(pool, _)| pool.weight()).collect();
    let pending_before = ctx.accounts.dispatcher.pending_distribution;
    let split = weighted_split(pending_before, &weights)?;
    require!(pending_before > 0, RewardRouterError::NothingPending);

    let dispatcher = &ctx.accounts.dispatcher;
    let bump = [dispatcher.bump];
    let seeds: &[&[u8]] = &[DISPATCHER_SEED, router_id.as_ref(), &bump];
    let timestamp = Clock::get()?.unix_timestamp;

    for ((pool, vault_info), (reward, weight)) in pools
        .iter_mut()
        .zip(split.rewards.iter().zip(weights.iter()))
    {
        if *reward == 0 {
            continue;
        }

        transfer_signed(
            ctx.accounts.token_program.to_account_info(),
            ctx.accounts.base_treasury.to_account_info(),
            (*vault_info).clone(),
            dispatcher.to_account_info(),
            &[seeds],
            *reward,
        )?;
        pool.inject_reward(*reward)?;
        pool.exit(&crate::ID)?;

        emit!(PoolRewarded {
            router_id,
            pool_id: pool.pool_id,
            weight: *weight,
            reward: *reward,
            underlying_after: pool.underlying_supply,
            timestamp,
        });
    }

    let pool_count = pools.len() as u32;
    let carried_forward = ctx.accounts.dispatcher.settle_dispatch(split.distributed)?;

    emit!(FeesDispatched {
        router_id,
        pending_before,
        distributed: split.distributed,
        carried_forward,
        total_weight: split.total_weight,
        pool_count,
        timestamp,
    });

    Ok(())
}
