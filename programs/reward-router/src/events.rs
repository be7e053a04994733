use anchor_lang::prelude::*;

#[event]
pub struct AggregatorInitialized {
    pub aggregator_id: [u8; 32],
    pub payee_count: u32,
    pub total_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct PaymentReleased {
    pub aggregator_id: [u8; 32],
    pub asset: Pubkey,
    pub payee: Pubkey,
    pub amount: u64,
    pub released_to_payee: u64,
    pub total_released: u64,
    pub timestamp: i64,
}

#[event]
pub struct RouterInitialized {
    pub router_id: [u8; 32],
    pub base_mint: Pubkey,
    pub conversion_router: Pubkey,
    pub fee_aggregator: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct FeeAggregatorUpdated {
    pub router_id: [u8; 32],
    pub previous: Pubkey,
    pub fee_aggregator: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct EntryPauseChanged {
    pub router_id: [u8; 32],
    pub paused: bool,
    pub timestamp: i64,
}

#[event]
pub struct PoolCreated {
    pub router_id: [u8; 32],
    pub pool_id: u64,
    pub pool: Pubkey,
    pub name: String,
    pub opened: bool,
    pub minimum_entry: u64,
    pub boost: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolUpdated {
    pub router_id: [u8; 32],
    pub pool_id: u64,
    pub name: String,
    pub opened: bool,
    pub minimum_entry: u64,
    pub boost: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolLinked {
    pub router_id: [u8; 32],
    pub pool_id: u64,
    pub boost: u64,
    pub live_pools: u32,
    pub timestamp: i64,
}

#[event]
pub struct PoolUnlinked {
    pub router_id: [u8; 32],
    pub pool_id: u64,
    pub live_pools: u32,
    pub timestamp: i64,
}

#[event]
pub struct FeesCollected {
    pub router_id: [u8; 32],
    pub asset: Pubkey,
    /// Asset units taken in, swept balances included
    pub amount_in: u64,
    pub base_amount: u64,
    pub pending_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct PendingSynced {
    pub router_id: [u8; 32],
    pub amount: u64,
    pub pending_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolRewarded {
    pub router_id: [u8; 32],
    pub pool_id: u64,
    pub weight: u128,
    pub reward: u64,
    pub underlying_after: u64,
    pub timestamp: i64,
}

#[event]
pub struct FeesDispatched {
    pub router_id: [u8; 32],
    pub pending_before: u64,
    pub distributed: u64,
    pub carried_forward: u64,
    pub total_weight: u128,
    pub pool_count: u32,
    pub timestamp: i64,
}

#[event]
pub struct PoolEntered {
    pub pool_id: u64,
    pub depositor: Pubkey,
    pub amount: u64,
    pub minted_shares: u64,
    pub position_shares: u64,
    pub timestamp: i64,
}

#[event]
pub struct PoolLeft {
    pub pool_id: u64,
    pub depositor: Pubkey,
    pub burned_shares: u64,
    pub payout: u64,
    pub position_shares: u64,
    pub timestamp: i64,
}
