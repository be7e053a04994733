use anchor_lang::prelude::*;

use crate::{constants::MAX_PAYEES, errors::RewardRouterError, math::mul_div_floor_u64};

/// A payee and its fixed share weight.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payee {
    pub account: Pubkey,
    pub shares: u64,
}

impl Payee {
    pub const LEN: usize = 32 + 8;
}

#[account]
#[derive(Default)]
pub struct FeeAggregator {
    /// Unique aggregator identifier
    pub aggregator_id: [u8; 32],

    /// Authority that created the aggregator
    pub authority: Pubkey,

    /// Ordered payee list, immutable after initialization
    pub payees: Vec<Payee>,

    /// Sum of all payee shares
    pub total_shares: u64,

    /// Is the aggregator initialized
    pub is_initialized: bool,

    /// Bump seed for PDA derivation
    pub bump: u8,
}

impl FeeAggregator {
    pub const BASE_LEN: usize = 8 + // discriminator
        32 + // aggregator_id
        32 + // authority
        4 + // Vec length prefix
        8 + // total_shares
        1 + // is_initialized
        1; // bump

    pub fn len(payee_count: usize) -> usize {
        Self::BASE_LEN + payee_count * Payee::LEN
    }

    /// Checks the payee list and returns the total share weight.
    pub fn validate_payees(payees: &[Payee]) -> Result<u64> {
        require!(!payees.is_empty(), RewardRouterError::InvalidPayees);
        require!(payees.len() <= MAX_PAYEES, RewardRouterError::TooManyPayees);

        let mut total = 0u64;
        for (i, payee) in payees.iter().enumerate() {
            require!(payee.shares > 0, RewardRouterError::InvalidPayees);
            require!(
                payee.account != Pubkey::default(),
                RewardRouterError::InvalidPayees
            );
            require!(
                payees[..i].iter().all(|p| p.account != payee.account),
                RewardRouterError::InvalidPayees
            );
            total = total
                .checked_add(payee.shares)
                .ok_or(RewardRouterError::MathOverflow)?;
        }
        Ok(total)
    }

    pub fn payee_index(&self, account: &Pubkey) -> Result<usize> {
        self.payees
            .iter()
            .position(|p| p.account == *account)
            .ok_or_else(|| error!(RewardRouterError::PayeeNotFound))
    }

    /// Lifetime entitlement of the payee at `index` out of `total_received`.
    pub fn entitlement(&self, index: usize, total_received: u64) -> Result<u64> {
        let payee = self
            .payees
            .get(index)
            .ok_or(RewardRouterError::PayeeNotFound)?;
        mul_div_floor_u64(total_received, payee.shares, self.total_shares)
    }
}
