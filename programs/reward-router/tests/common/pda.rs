//! PDA derivation helpers.

use reward_router::constants::*;
use spl_associated_token_account::get_associated_token_address;

use super::setup::Pubkey;

pub fn find_aggregator_pda(aggregator_id: &[u8; 32]) -> Pubkey {
    Pubkey::find_program_address(&[AGGREGATOR_SEED, aggregator_id.as_ref()], &reward_router::ID).0
}

pub fn find_release_ledger_pda(aggregator: &Pubkey, asset: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[RELEASE_LEDGER_SEED, aggregator.as_ref(), asset.as_ref()],
        &reward_router::ID,
    )
    .0
}

pub fn find_dispatcher_pda(router_id: &[u8; 32]) -> Pubkey {
    Pubkey::find_program_address(&[DISPATCHER_SEED, router_id.as_ref()], &reward_router::ID).0
}

pub fn find_registry_pda(router_id: &[u8; 32]) -> Pubkey {
    Pubkey::find_program_address(&[REGISTRY_SEED, router_id.as_ref()], &reward_router::ID).0
}

pub fn find_wrapped_native_pda(dispatcher: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[WRAPPED_NATIVE_SEED, dispatcher.as_ref()], &reward_router::ID).0
}

pub fn find_pool_pda(registry: &Pubkey, pool_id: u64) -> Pubkey {
    Pubkey::find_program_address(
        &[POOL_SEED, registry.as_ref(), &pool_id.to_le_bytes()],
        &reward_router::ID,
    )
    .0
}

pub fn find_pool_vault_pda(pool: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[POOL_VAULT_SEED, pool.as_ref()], &reward_router::ID).0
}

pub fn find_position_pda(pool: &Pubkey, depositor: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[POSITION_SEED, pool.as_ref(), depositor.as_ref()],
        &reward_router::ID,
    )
    .0
}

pub fn associated_token(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}
