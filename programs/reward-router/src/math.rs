use anchor_lang::prelude::*;

use crate::errors::RewardRouterError;

/// floor(a * b / denominator) in u128, failing on overflow or a zero denominator.
pub fn mul_div_floor(a: u128, b: u128, denominator: u128) -> Result<u128> {
    require!(denominator > 0, RewardRouterError::MathOverflow);
    let product = a.checked_mul(b).ok_or(RewardRouterError::MathOverflow)?;
    Ok(product / denominator)
}

/// u64 flavour of [`mul_div_floor`]; the quotient must fit back into u64.
pub fn mul_div_floor_u64(a: u64, b: u64, denominator: u64) -> Result<u64> {
    let quotient = mul_div_floor(a as u128, b as u128, denominator as u128)?;
    u64::try_from(quotient).map_err(|_| error!(RewardRouterError::MathOverflow))
}

/// Result of splitting a pending amount across weighted pools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedSplit {
    pub rewards: Vec<u64>,
    pub distributed: u64,
    pub remainder: u64,
    pub total_weight: u128,
}

/// Splits `amount` proportionally to `weights` with floor rounding.
///
/// Fails with `NoEligibleWeight` when the weights sum to zero, so value is never
/// assigned without principal to scale against. The remainder is always below
/// the number of weighted entries.
pub fn weighted_split(amount: u64, weights: &[u128]) -> Result<WeightedSplit> {
    let mut total_weight = 0u128;
    for weight in weights {
        total_weight = total_weight
            .checked_add(*weight)
            .ok_or(RewardRouterError::MathOverflow)?;
    }
    require!(total_weight > 0, RewardRouterError::NoEligibleWeight);

    let mut rewards = Vec::with_capacity(weights.len());
    let mut distributed = 0u64;
    for weight in weights {
        let reward = mul_div_floor(amount as u128, *weight, total_weight)?;
        // reward <= amount because weight <= total_weight
        let reward = reward as u64;
        distributed = distributed
            .checked_add(reward)
            .ok_or(RewardRouterError::MathOverflow)?;
        rewards.push(reward);
    }

    Ok(WeightedSplit {
        rewards,
        distributed,
        remainder: amount - distributed,
        total_weight,
    })
}
