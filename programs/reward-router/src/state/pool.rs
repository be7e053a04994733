use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_BOOST, MAX_POOL_NAME_LEN},
    errors::RewardRouterError,
    math::mul_div_floor_u64,
};

/// Reward-bearing vault over the base asset.
///
/// Share price is `underlying_supply / total_shares` and is never stored.
/// `underlying_supply == 0` exactly when `total_shares == 0`.
#[account]
#[derive(Default)]
pub struct Pool {
    /// Registry this pool belongs to
    pub registry: Pubkey,

    /// Id assigned at creation, never reused
    pub pool_id: u64,

    /// Display name
    pub name: String,

    /// Accepts new deposits
    pub opened: bool,

    /// Smallest accepted deposit
    pub minimum_entry: u64,

    /// Distribution multiplier in hundredths
    pub boost: u64,

    /// Base asset held on behalf of depositors, rewards included
    pub underlying_supply: u64,

    /// Outstanding shares across all positions
    pub total_shares: u64,

    /// Token account holding the underlying supply
    pub vault: Pubkey,

    /// Linked into the registry's live list
    pub linked: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u8; 32],
}

/// Read-only view of a pool as returned by `get_pool_data`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct PoolData {
    pub name: String,
    pub opened: bool,
    pub minimum_entry: u64,
    pub boost: u64,
    pub underlying_supply: u64,
    pub total_shares: u64,
}

impl Pool {
    pub const LEN: usize = 8 + // discriminator
        32 + // registry
        8 + // pool_id
        4 + MAX_POOL_NAME_LEN + // name
        1 + // opened
        8 + // minimum_entry
        8 + // boost
        8 + // underlying_supply
        8 + // total_shares
        32 + // vault
        1 + // linked
        1 + // bump
        32; // _reserved

    pub fn validate_params(name: &str, boost: u64) -> Result<()> {
        require!(name.len() <= MAX_POOL_NAME_LEN, RewardRouterError::PoolNameTooLong);
        require!(boost > 0 && boost <= MAX_BOOST, RewardRouterError::InvalidBoost);
        Ok(())
    }

    /// Replaces the configurable fields. Supply and shares are untouched.
    pub fn configure(
        &mut self,
        name: String,
        opened: bool,
        minimum_entry: u64,
        boost: u64,
    ) -> Result<()> {
        Self::validate_params(&name, boost)?;
        self.name = name;
        self.opened = opened;
        self.minimum_entry = minimum_entry;
        self.boost = boost;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.total_shares == 0
    }

    pub fn data(&self) -> PoolData {
        PoolData {
            name: self.name.clone(),
            opened: self.opened,
            minimum_entry: self.minimum_entry,
            boost: self.boost,
            underlying_supply: self.underlying_supply,
            total_shares: self.total_shares,
        }
    }

    /// Distribution weight: supply times boost.
    pub fn weight(&self) -> u128 {
        self.underlying_supply as u128 * self.boost as u128
    }

    pub fn shares_for_deposit(&self, amount: u64) -> Result<u64> {
        if self.total_shares == 0 {
            return Ok(amount);
        }
        mul_div_floor_u64(amount, self.total_shares, self.underlying_supply)
    }

    pub fn payout_for_shares(&self, shares: u64) -> Result<u64> {
        if shares == 0 {
            return Ok(0);
        }
        require!(shares <= self.total_shares, RewardRouterError::InsufficientShares);
        mul_div_floor_u64(shares, self.underlying_supply, self.total_shares)
    }

    /// Books a deposit of `amount` and returns the minted shares.
    pub fn deposit(&mut self, amount: u64) -> Result<u64> {
        require!(self.opened, RewardRouterError::PoolClosed);
        require!(amount > 0, RewardRouterError::ZeroAmount);
        require!(amount >= self.minimum_entry, RewardRouterError::BelowMinimum);

        let minted = self.shares_for_deposit(amount)?;
        require!(minted > 0, RewardRouterError::ZeroShares);

        self.underlying_supply = self
            .underlying_supply
            .checked_add(amount)
            .ok_or(RewardRouterError::MathOverflow)?;
        self.total_shares = self
            .total_shares
            .checked_add(minted)
            .ok_or(RewardRouterError::MathOverflow)?;
        Ok(minted)
    }

    /// Books a withdrawal of `shares` held by a position with `held` shares and
    /// returns the base-asset payout. Allowed whether or not the pool is opened.
    pub fn withdraw(&mut self, held: u64, shares: u64) -> Result<u64> {
        require!(shares > 0, RewardRouterError::ZeroShares);
        require!(held >= shares, RewardRouterError::InsufficientShares);

        let payout = self.payout_for_shares(shares)?;
        self.total_shares -= shares;
        self.underlying_supply = self
            .underlying_supply
            .checked_sub(payout)
            .ok_or(RewardRouterError::MathOverflow)?;
        Ok(payout)
    }

    /// Adds reward to the underlying supply without minting shares.
    pub fn inject_reward(&mut self, amount: u64) -> Result<()> {
        self.underlying_supply = self
            .underlying_supply
            .checked_add(amount)
            .ok_or(RewardRouterError::MathOverflow)?;
        Ok(())
    }
}
