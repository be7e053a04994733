use anchor_lang::prelude::*;

use crate::errors::RewardRouterError;

#[account]
#[derive(Default)]
pub struct Position {
    /// Pool the shares are held in
    pub pool: Pubkey,

    /// Depositor wallet
    pub owner: Pubkey,

    /// Share balance in `pool`
    pub shares: u64,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl Position {
    pub const LEN: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 + // shares
        1; // bump

    pub fn credit(&mut self, shares: u64) -> Result<()> {
        self.shares = self
            .shares
            .checked_add(shares)
            .ok_or(RewardRouterError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, shares: u64) -> Result<()> {
        self.shares = self
            .shares
            .checked_sub(shares)
            .ok_or(RewardRouterError::InsufficientShares)?;
        Ok(())
    }
}
