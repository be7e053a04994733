use anchor_lang::prelude::*;

use crate::errors::RewardRouterError;
use super::FeeAggregator;

/// Per-asset release accounting for one aggregator.
///
/// Entitlement is derived from cumulative totals: what the aggregator holds now
/// plus what it has already paid out. Releases in any order therefore pay every
/// payee the same lifetime amount.
#[account]
#[derive(Default)]
pub struct ReleaseLedger {
    /// Associated aggregator
    pub aggregator: Pubkey,

    /// Asset mint, or `NATIVE_ASSET` for SOL
    pub asset: Pubkey,

    /// Released so far across all payees
    pub total_released: u64,

    /// Released so far per payee, indexed like `FeeAggregator::payees`
    pub released: Vec<u64>,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl ReleaseLedger {
    pub const BASE_LEN: usize = 8 + // discriminator
        32 + // aggregator
        32 + // asset
        8 + // total_released
        4 + // Vec length prefix
        1; // bump

    pub fn len(payee_count: usize) -> usize {
        Self::BASE_LEN + payee_count * 8
    }

    /// Sets up a fresh ledger; a ledger that already tracks payees is left as is.
    pub fn open(&mut self, aggregator: Pubkey, asset: Pubkey, payee_count: usize, bump: u8) {
        if self.released.len() == payee_count && self.aggregator == aggregator {
            return;
        }
        self.aggregator = aggregator;
        self.asset = asset;
        self.total_released = 0;
        self.released = vec![0; payee_count];
        self.bump = bump;
    }

    pub fn total_received(&self, current_balance: u64) -> Result<u64> {
        current_balance
            .checked_add(self.total_released)
            .ok_or_else(|| error!(RewardRouterError::MathOverflow))
    }

    pub fn released_to(&self, index: usize) -> u64 {
        self.released.get(index).copied().unwrap_or(0)
    }

    /// Amount currently owed to the payee at `index`.
    pub fn releasable(
        &self,
        aggregator: &FeeAggregator,
        index: usize,
        current_balance: u64,
    ) -> Result<u64> {
        let total_received = self.total_received(current_balance)?;
        let entitlement = aggregator.entitlement(index, total_received)?;
        Ok(entitlement.saturating_sub(self.released_to(index)))
    }

    /// Books a completed payment. Must run in the same instruction as the transfer.
    pub fn record_release(&mut self, index: usize, amount: u64) -> Result<()> {
        let slot = self
            .released
            .get_mut(index)
            .ok_or(RewardRouterError::PayeeNotFound)?;
        *slot = slot
            .checked_add(amount)
            .ok_or(RewardRouterError::MathOverflow)?;
        self.total_released = self
            .total_released
            .checked_add(amount)
            .ok_or(RewardRouterError::MathOverflow)?;
        Ok(())
    }

    /// Computes and books the payment owed to `index`, returning the amount.
    /// Fails with `NothingDue` when nothing is owed.
    pub fn settle(
        &mut self,
        aggregator: &FeeAggregator,
        index: usize,
        current_balance: u64,
    ) -> Result<u64> {
        let owed = self.releasable(aggregator, index, current_balance)?;
        require!(owed > 0, RewardRouterError::NothingDue);
        self.record_release(index, owed)?;
        Ok(owed)
    }
}
