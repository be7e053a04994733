//! Mock SPL Token accounts written straight into the svm.

use litesvm::LiteSVM;
use solana_sdk::account::Account;

use super::setup::{to_sdk, Pubkey};

const MINT_LEN: usize = 82;
const TOKEN_ACCOUNT_LEN: usize = 165;
const AMOUNT_OFFSET: usize = 64;

/// Write an initialized mint at `mint`
pub fn create_mock_mint_at(svm: &mut LiteSVM, mint: Pubkey, decimals: u8) {
    // SPL Token mint layout (82 bytes)
    let mut data = vec![0u8; MINT_LEN];
    // mint_authority (COption<Pubkey>) left as None
    data[44] = decimals;
    data[45] = 1; // is_initialized

    let account = Account {
        lamports: svm.minimum_balance_for_rent_exemption(MINT_LEN),
        data,
        owner: to_sdk(&spl_token::ID),
        executable: false,
        rent_epoch: 0,
    };
    svm.set_account(to_sdk(&mint), account).unwrap();
}

pub fn create_mock_mint(svm: &mut LiteSVM, decimals: u8) -> Pubkey {
    let mint = Pubkey::new_unique();
    create_mock_mint_at(svm, mint, decimals);
    mint
}

/// Write an initialized token account at `address` holding `amount` of `mint`
pub fn create_mock_token_account_at(
    svm: &mut LiteSVM,
    address: Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) {
    // SPL Token account layout (165 bytes)
    let mut data = vec![0u8; TOKEN_ACCOUNT_LEN];
    data[0..32].copy_from_slice(mint.as_ref());
    data[32..64].copy_from_slice(owner.as_ref());
    data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].copy_from_slice(&amount.to_le_bytes());
    // delegate (COption<Pubkey>) at 72 left as None
    data[108] = 1; // state: Initialized

    let account = Account {
        lamports: svm.minimum_balance_for_rent_exemption(TOKEN_ACCOUNT_LEN),
        data,
        owner: to_sdk(&spl_token::ID),
        executable: false,
        rent_epoch: 0,
    };
    svm.set_account(to_sdk(&address), account).unwrap();
}

pub fn create_mock_token_account(
    svm: &mut LiteSVM,
    mint: &Pubkey,
    owner: &Pubkey,
    amount: u64,
) -> Pubkey {
    let address = Pubkey::new_unique();
    create_mock_token_account_at(svm, address, mint, owner, amount);
    address
}

pub fn token_balance(svm: &LiteSVM, account: &Pubkey) -> u64 {
    let data = svm.get_account(&to_sdk(account)).unwrap().data;
    u64::from_le_bytes(data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].try_into().unwrap())
}

/// Overwrite the balance of an existing non-native token account
pub fn set_token_balance(svm: &mut LiteSVM, account: &Pubkey, amount: u64) {
    let mut state = svm.get_account(&to_sdk(account)).unwrap();
    state.data[AMOUNT_OFFSET..AMOUNT_OFFSET + 8].copy_from_slice(&amount.to_le_bytes());
    svm.set_account(to_sdk(account), state).unwrap();
}
