//! Asset movement helpers shared by the aggregator, dispatcher and pools.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};
use solana_program::program_option::COption;
use spl_token::state::Account as SplTokenAccount;

use crate::errors::RewardRouterError;

/// Spendable lamports of a program-owned account: everything above rent exemption.
pub fn native_balance(account: &AccountInfo) -> Result<u64> {
    let rent_floor = Rent::get()?.minimum_balance(account.data_len());
    Ok(account.lamports().saturating_sub(rent_floor))
}

/// Moves lamports out of an account owned by this program.
pub fn move_lamports(from: &AccountInfo, to: &AccountInfo, amount: u64) -> Result<()> {
    require!(
        to.is_writable && !to.executable,
        RewardRouterError::TransferFailed
    );
    require!(
        native_balance(from)? >= amount,
        RewardRouterError::InsufficientBalance
    );

    let from_after = from
        .lamports()
        .checked_sub(amount)
        .ok_or(RewardRouterError::MathOverflow)?;
    let to_after = to
        .lamports()
        .checked_add(amount)
        .ok_or(RewardRouterError::MathOverflow)?;
    **from.try_borrow_mut_lamports()? = from_after;
    **to.try_borrow_mut_lamports()? = to_after;
    Ok(())
}

/// SPL transfer signed by one of this program's PDAs.
pub fn transfer_signed<'info>(
    token_program: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    token::transfer(
        CpiContext::new_with_signer(
            token_program,
            Transfer {
                from,
                to,
                authority,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// `spender` may move `amount` out of `source`: as its owner, or as a delegate
/// with a large enough allowance. The balance must cover `amount` either way.
pub fn check_spend_authority(
    source: &SplTokenAccount,
    spender: &Pubkey,
    amount: u64,
) -> Result<()> {
    let authorized = source.owner == *spender
        || (source.delegate == COption::Some(*spender) && source.delegated_amount >= amount);
    require!(authorized, RewardRouterError::TransferNotAuthorized);
    require!(source.amount >= amount, RewardRouterError::InsufficientBalance);
    Ok(())
}
