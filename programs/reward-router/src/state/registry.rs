use anchor_lang::prelude::*;

use crate::{constants::MAX_POOLS, errors::RewardRouterError};

/// Ordered live list of pools eligible for distribution.
///
/// Ids come from an append-only counter. Unlinking swaps the last entry into
/// the freed slot, so the list order carries no meaning.
#[account]
#[derive(Default)]
pub struct PoolRegistry {
    /// Router this registry belongs to
    pub router_id: [u8; 32],

    /// Administrative authority
    pub authority: Pubkey,

    /// Dispatcher allowed to inject rewards
    pub dispatcher: Pubkey,

    /// Base asset every pool holds
    pub base_mint: Pubkey,

    /// Next pool id to assign
    pub next_pool_id: u64,

    /// New deposits paused across all pools
    pub entry_paused: bool,

    /// Pools currently linked for distribution
    pub pools: Vec<Pubkey>,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl PoolRegistry {
    pub const LEN: usize = 8 + // discriminator
        32 + // router_id
        32 + // authority
        32 + // dispatcher
        32 + // base_mint
        8 + // next_pool_id
        1 + // entry_paused
        4 + MAX_POOLS * 32 + // pools
        1; // bump

    /// Number of pools ever created.
    pub fn pool_count(&self) -> u64 {
        self.next_pool_id
    }

    pub fn allocate_id(&mut self) -> Result<u64> {
        let id = self.next_pool_id;
        self.next_pool_id = id.checked_add(1).ok_or(RewardRouterError::MathOverflow)?;
        Ok(id)
    }

    pub fn is_linked(&self, pool: &Pubkey) -> bool {
        self.pools.contains(pool)
    }

    pub fn link(&mut self, pool: Pubkey) -> Result<()> {
        require!(!self.is_linked(&pool), RewardRouterError::PoolAlreadyLinked);
        require!(self.pools.len() < MAX_POOLS, RewardRouterError::TooManyPools);
        self.pools.push(pool);
        Ok(())
    }

    pub fn unlink(&mut self, pool: &Pubkey) -> Result<()> {
        let index = self
            .pools
            .iter()
            .position(|p| p == pool)
            .ok_or(RewardRouterError::PoolNotLinked)?;
        self.pools.swap_remove(index);
        Ok(())
    }
}
