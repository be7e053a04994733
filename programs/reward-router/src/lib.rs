use anchor_lang::prelude::*;

pub mod constants;
pub mod conversion_router;
pub mod custody;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;

use instructions::*;
use state::{Payee, PoolData};

declare_id!("RwdRouter1111111111111111111111111111111111");

#[program]
pub mod reward_router {
    use super::*;

    /// Create a fee aggregator with a fixed, weighted payee list
    pub fn initialize_aggregator(
        ctx: Context<InitializeAggregator>,
        aggregator_id: [u8; 32],
        payees: Vec<Payee>,
    ) -> Result<()> {
        instructions::initialize_aggregator(ctx, aggregator_id, payees)
    }

    /// Open release counters for one asset (a mint, or NATIVE_ASSET for SOL)
    pub fn open_release_ledger(
        ctx: Context<OpenReleaseLedger>,
        aggregator_id: [u8; 32],
        asset: Pubkey,
    ) -> Result<()> {
        instructions::open_release_ledger(ctx, aggregator_id, asset)
    }

    /// Pay one payee its outstanding share of the aggregator's SOL
    pub fn release_native(ctx: Context<ReleaseNative>, aggregator_id: [u8; 32]) -> Result<()> {
        instructions::release_native(ctx, aggregator_id)
    }

    /// Pay every payee passed as a remaining account its outstanding SOL
    pub fn release_native_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, ReleaseNativeBatch<'info>>,
        aggregator_id: [u8; 32],
    ) -> Result<()> {
        instructions::release_native_batch(ctx, aggregator_id)
    }

    /// Pay one payee its outstanding share of a token asset
    pub fn release_token(ctx: Context<ReleaseToken>, aggregator_id: [u8; 32]) -> Result<()> {
        instructions::release_token(ctx, aggregator_id)
    }

    /// Pay every payee token account passed as a remaining account
    pub fn release_token_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, ReleaseTokenBatch<'info>>,
        aggregator_id: [u8; 32],
    ) -> Result<()> {
        instructions::release_token_batch(ctx, aggregator_id)
    }

    /// Create the reward dispatcher, the pool registry and their treasuries
    pub fn initialize_router(
        ctx: Context<InitializeRouter>,
        router_id: [u8; 32],
        conversion_router: Pubkey,
        fee_aggregator: Pubkey,
    ) -> Result<()> {
        instructions::initialize_router(ctx, router_id, conversion_router, fee_aggregator)
    }

    /// Point the dispatcher at a different fee aggregator
    pub fn set_fee_aggregator(
        ctx: Context<SetFeeAggregator>,
        router_id: [u8; 32],
        fee_aggregator: Pubkey,
    ) -> Result<()> {
        instructions::set_fee_aggregator(ctx, router_id, fee_aggregator)
    }

    /// Pause or resume deposits across all pools
    pub fn set_entry_paused(
        ctx: Context<SetEntryPaused>,
        router_id: [u8; 32],
        paused: bool,
    ) -> Result<()> {
        instructions::set_entry_paused(ctx, router_id, paused)
    }

    /// Create a pool under the next id and link it for distribution
    pub fn create_pool(
        ctx: Context<CreatePool>,
        router_id: [u8; 32],
        name: String,
        opened: bool,
        minimum_entry: u64,
        boost: u64,
    ) -> Result<()> {
        instructions::create_pool(ctx, router_id, name, opened, minimum_entry, boost)
    }

    /// Replace a pool's name, entry settings and boost
    pub fn update_pool(
        ctx: Context<ManagePool>,
        router_id: [u8; 32],
        pool_id: u64,
        name: String,
        opened: bool,
        minimum_entry: u64,
        boost: u64,
    ) -> Result<()> {
        instructions::update_pool(ctx, router_id, pool_id, name, opened, minimum_entry, boost)
    }

    /// Re-link an unlinked pool with a new boost
    pub fn add_pool(
        ctx: Context<ManagePool>,
        router_id: [u8; 32],
        pool_id: u64,
        boost: u64,
    ) -> Result<()> {
        instructions::add_pool(ctx, router_id, pool_id, boost)
    }

    /// Unlink a pool from distribution
    pub fn remove_pool(ctx: Context<ManagePool>, router_id: [u8; 32], pool_id: u64) -> Result<()> {
        instructions::remove_pool(ctx, router_id, pool_id)
    }

    /// Release the dispatcher's SOL share and convert it into the base asset
    pub fn collect_native_fees<'info>(
        ctx: Context<'_, '_, 'info, 'info, CollectNativeFees<'info>>,
        router_id: [u8; 32],
        minimum_amount_out: u64,
    ) -> Result<()> {
        instructions::collect_native_fees(ctx, router_id, minimum_amount_out)
    }

    /// Release the dispatcher's share of one token and convert it into the base asset
    pub fn collect_token_fees<'info>(
        ctx: Context<'_, '_, 'info, 'info, CollectTokenFees<'info>>,
        router_id: [u8; 32],
        minimum_amount_out: u64,
    ) -> Result<()> {
        instructions::collect_token_fees(ctx, router_id, minimum_amount_out)
    }

    /// Collect several token assets in one pass
    pub fn collect_token_fees_batch<'info>(
        ctx: Context<'_, '_, 'info, 'info, CollectTokenFeesBatch<'info>>,
        router_id: [u8; 32],
        assets: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::collect_token_fees_batch(ctx, router_id, assets)
    }

    /// Account for base asset sent straight to the treasury
    pub fn sync_pending(ctx: Context<SyncPending>, router_id: [u8; 32]) -> Result<()> {
        instructions::sync_pending(ctx, router_id)
    }

    /// Split pending base asset across live pools (permissionless crank)
    pub fn dispatch_fees<'info>(
        ctx: Context<'_, '_, 'info, 'info, DispatchFees<'info>>,
        router_id: [u8; 32],
    ) -> Result<()> {
        instructions::dispatch_fees(ctx, router_id)
    }

    /// Deposit base asset into a pool for shares
    pub fn enter_pool(
        ctx: Context<EnterPool>,
        router_id: [u8; 32],
        pool_id: u64,
        amount: u64,
    ) -> Result<()> {
        instructions::enter_pool(ctx, router_id, pool_id, amount)
    }

    /// Redeem shares for their current base asset value
    pub fn leave_pool(
        ctx: Context<LeavePool>,
        router_id: [u8; 32],
        pool_id: u64,
        shares: u64,
    ) -> Result<()> {
        instructions::leave_pool(ctx, router_id, pool_id, shares)
    }

    pub fn get_pool_data(
        ctx: Context<GetPoolData>,
        router_id: [u8; 32],
        pool_id: u64,
    ) -> Result<PoolData> {
        instructions::get_pool_data(ctx, router_id, pool_id)
    }

    pub fn get_pool_count(ctx: Context<GetPoolCount>, router_id: [u8; 32]) -> Result<u64> {
        instructions::get_pool_count(ctx, router_id)
    }

    /// Shares a deposit of `amount` would mint at the current share price.
    pub fn convert_to_shares(
        ctx: Context<GetPoolData>,
        router_id: [u8; 32],
        pool_id: u64,
        amount: u64,
    ) -> Result<u64> {
        instructions::convert_to_shares(ctx, router_id, pool_id, amount)
    }

    /// Base-asset payout `shares` would redeem for at the current share price.
    pub fn convert_to_assets(
        ctx: Context<GetPoolData>,
        router_id: [u8; 32],
        pool_id: u64,
        shares: u64,
    ) -> Result<u64> {
        instructions::convert_to_assets(ctx, router_id, pool_id, shares)
    }

    pub fn get_pending_distribution(
        ctx: Context<GetPendingDistribution>,
        router_id: [u8; 32],
    ) -> Result<u64> {
        instructions::get_pending_distribution(ctx, router_id)
    }
}
