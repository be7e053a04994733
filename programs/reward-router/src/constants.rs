use anchor_lang::prelude::*;

/// PDA seeds
pub const AGGREGATOR_SEED: &[u8] = b"aggregator";
pub const RELEASE_LEDGER_SEED: &[u8] = b"release_ledger";
pub const DISPATCHER_SEED: &[u8] = b"dispatcher";
pub const WRAPPED_NATIVE_SEED: &[u8] = b"wrapped_native";
pub const REGISTRY_SEED: &[u8] = b"registry";
pub const POOL_SEED: &[u8] = b"pool";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";
pub const POSITION_SEED: &[u8] = b"position";

/// Sentinel asset key for native SOL held by an aggregator
pub const NATIVE_ASSET: Pubkey = Pubkey::new_from_array([0u8; 32]);

/// Aggregator limits
pub const MAX_PAYEES: usize = 16;

/// Registry limits
pub const MAX_POOLS: usize = 32;
pub const MAX_POOL_NAME_LEN: usize = 32;

/// Boost is expressed in hundredths: 100 = x1.00
pub const BOOST_PRECISION: u64 = 100;
pub const MAX_BOOST: u64 = 10_000;

/// Number of remaining accounts per asset in a batched collection
pub const COLLECT_BATCH_GROUP: usize = 4;

/// Number of remaining accounts per live pool in a dispatch
pub const DISPATCH_POOL_GROUP: usize = 2;

/// Anchor sighash of `global:convert`, the conversion router entrypoint
pub const CONVERT_DISCRIMINATOR: [u8; 8] = [0x7a, 0x50, 0xd4, 0xd0, 0x5c, 0xc8, 0x22, 0xa1];
