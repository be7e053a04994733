//! Program deployment and transaction helpers.
//!
//! The program is built against anchor's solana types while litesvm speaks
//! the 2.x sdk, so keys cross the boundary as raw bytes.

use anchor_lang::{AccountDeserialize, InstructionData, ToAccountMetas};
use litesvm::LiteSVM;
use reward_router::errors::RewardRouterError;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey as SdkPubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

pub use anchor_lang::prelude::Pubkey;

/// Built by `anchor build`
const PROGRAM_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../target/deploy/reward_router.so"
);

pub fn to_sdk(key: &Pubkey) -> SdkPubkey {
    SdkPubkey::new_from_array(key.to_bytes())
}

pub fn to_anchor(key: &SdkPubkey) -> Pubkey {
    Pubkey::new_from_array(key.to_bytes())
}

pub fn signer_key(keypair: &Keypair) -> Pubkey {
    to_anchor(&keypair.pubkey())
}

/// Deploy the reward router program
pub fn deploy_reward_router_program(svm: &mut LiteSVM) -> Pubkey {
    let program_data = std::fs::read(PROGRAM_PATH)
        .unwrap_or_else(|e| panic!("{} missing ({}); run `anchor build` first", PROGRAM_PATH, e));
    let _ = svm.add_program(to_sdk(&reward_router::ID), &program_data);
    reward_router::ID
}

/// A reward router instruction from its anchor accounts and arguments, with
/// `remaining` appended after the named accounts.
pub fn router_instruction(
    accounts: impl ToAccountMetas,
    args: impl InstructionData,
    remaining: Vec<AccountMeta>,
) -> Instruction {
    let mut metas: Vec<AccountMeta> = accounts
        .to_account_metas(None)
        .into_iter()
        .map(|meta| AccountMeta {
            pubkey: to_sdk(&meta.pubkey),
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        })
        .collect();
    metas.extend(remaining);

    Instruction {
        program_id: to_sdk(&reward_router::ID),
        accounts: metas,
        data: args.data(),
    }
}

pub fn writable(key: &Pubkey) -> AccountMeta {
    AccountMeta::new(to_sdk(key), false)
}

/// Send `ix` paid by the first signer. The blockhash is expired afterwards so
/// an identical instruction can be sent again.
pub fn send(svm: &mut LiteSVM, ix: Instruction, signers: &[&Keypair]) -> Result<(), String> {
    let tx = Transaction::new_signed_with_payer(
        &[ix],
        Some(&signers[0].pubkey()),
        signers,
        svm.latest_blockhash(),
    );
    let result = svm
        .send_transaction(tx)
        .map(|_| ())
        .map_err(|e| format!("{:?}", e));
    svm.expire_blockhash();
    result
}

pub fn fetch<T: AccountDeserialize>(svm: &LiteSVM, key: &Pubkey) -> T {
    let account = svm
        .get_account(&to_sdk(key))
        .unwrap_or_else(|| panic!("account {} missing", key));
    T::try_deserialize(&mut account.data.as_slice()).unwrap()
}

pub fn lamports(svm: &LiteSVM, key: &Pubkey) -> u64 {
    svm.get_account(&to_sdk(key)).map_or(0, |account| account.lamports)
}

pub fn account_closed(svm: &LiteSVM, key: &Pubkey) -> bool {
    svm.get_account(&to_sdk(key))
        .map_or(true, |account| account.lamports == 0 && account.data.is_empty())
}

pub fn new_funded_keypair(svm: &mut LiteSVM) -> Keypair {
    let keypair = Keypair::new();
    svm.airdrop(&keypair.pubkey(), 10_000_000_000).unwrap();
    keypair
}

/// Assert that `result` failed with the given program error.
pub fn assert_router_error(result: Result<(), String>, error: RewardRouterError) {
    let name = format!("{:?}", error);
    let code = error as u32 + anchor_lang::error::ERROR_CODE_OFFSET;
    let err = result.expect_err(&format!("expected {}", name));
    assert!(
        err.contains(&format!("Custom({})", code)),
        "expected {} ({}), got {}",
        name,
        code,
        err
    );
}
