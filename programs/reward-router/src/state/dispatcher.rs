use anchor_lang::prelude::*;

use crate::errors::RewardRouterError;

#[account]
#[derive(Default)]
pub struct RewardDispatcher {
    /// Unique router identifier shared with the registry
    pub router_id: [u8; 32],

    /// Administrative authority
    pub authority: Pubkey,

    /// Asset every collection is normalized into
    pub base_mint: Pubkey,

    /// Wrapped SOL mint used for the native leg
    pub wrapped_native_mint: Pubkey,

    /// Program invoked to convert foreign assets into the base asset
    pub conversion_router: Pubkey,

    /// Aggregator fees are collected from
    pub fee_aggregator: Pubkey,

    /// Registry rewards are dispatched into
    pub registry: Pubkey,

    /// Dispatcher-owned base asset token account
    pub base_treasury: Pubkey,

    /// Dispatcher-owned wrapped SOL token account
    pub wrapped_native_treasury: Pubkey,

    /// Base asset collected but not yet injected into pools
    pub pending_distribution: u64,

    /// Lifetime base asset credited to pending
    pub total_collected: u64,

    /// Lifetime base asset injected into pools
    pub total_dispatched: u64,

    /// Completed dispatch cycles
    pub dispatch_count: u64,

    /// Is the dispatcher initialized
    pub is_initialized: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

impl RewardDispatcher {
    pub const LEN: usize = 8 + // discriminator
        32 + // router_id
        32 + // authority
        32 + // base_mint
        32 + // wrapped_native_mint
        32 + // conversion_router
        32 + // fee_aggregator
        32 + // registry
        32 + // base_treasury
        32 + // wrapped_native_treasury
        8 + // pending_distribution
        8 + // total_collected
        8 + // total_dispatched
        8 + // dispatch_count
        1 + // is_initialized
        1 + // bump
        32; // _reserved

    pub fn credit_pending(&mut self, amount: u64) -> Result<u64> {
        self.pending_distribution = self
            .pending_distribution
            .checked_add(amount)
            .ok_or(RewardRouterError::MathOverflow)?;
        self.total_collected = self
            .total_collected
            .checked_add(amount)
            .ok_or(RewardRouterError::MathOverflow)?;
        Ok(self.pending_distribution)
    }

    /// Base-asset tokens in the treasury not yet accounted as pending.
    pub fn untracked_balance(&self, treasury_balance: u64) -> u64 {
        treasury_balance.saturating_sub(self.pending_distribution)
    }

    /// Closes a dispatch cycle. The undistributed remainder stays pending and
    /// joins the next cycle.
    pub fn settle_dispatch(&mut self, distributed: u64) -> Result<u64> {
        self.pending_distribution = self
            .pending_distribution
            .checked_sub(distributed)
            .ok_or(RewardRouterError::MathOverflow)?;
        self.total_dispatched = self
            .total_dispatched
            .checked_add(distributed)
            .ok_or(RewardRouterError::MathOverflow)?;
        self.dispatch_count = self.dispatch_count.saturating_add(1);
        Ok(self.pending_distribution)
    }
}
