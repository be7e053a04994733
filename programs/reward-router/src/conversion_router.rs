use anchor_lang::prelude::*;
use anchor_spl::token::accessor;
use bytemuck::{Pod, Zeroable};

use crate::{constants::CONVERT_DISCRIMINATOR, errors::RewardRouterError};

/// Payload of the router `convert` instruction, after the discriminator.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct ConvertArgs {
    pub amount_in: u64,
    pub minimum_amount_out: u64,
}

impl ConvertArgs {
    pub fn instruction_data(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(8 + std::mem::size_of::<ConvertArgs>());
        data.extend_from_slice(&CONVERT_DISCRIMINATOR);
        data.extend_from_slice(bytemuck::bytes_of(self));
        data
    }

    pub fn from_instruction_data(data: &[u8]) -> Result<Self> {
        require!(
            data.len() == 8 + std::mem::size_of::<ConvertArgs>()
                && data[..8] == CONVERT_DISCRIMINATOR,
            RewardRouterError::ConversionFailed
        );
        let args = bytemuck::try_pod_read_unaligned::<ConvertArgs>(&data[8..])
            .map_err(|_| RewardRouterError::ConversionFailed)?;
        Ok(args)
    }
}

/// Base-asset gained by a token account between two balance reads.
pub fn balance_gain(before: u64, after: u64) -> Result<u64> {
    let gained = after.saturating_sub(before);
    require!(gained > 0, RewardRouterError::ConversionFailed);
    Ok(gained)
}

/// CPI helpers for the external conversion router
pub mod cpi {
    use super::*;
    use solana_program::{instruction::Instruction, program::invoke_signed};

    /// Converts `amount_in` of `source` into the base asset held by `destination`.
    ///
    /// The router's rate is not checked here. The returned amount is the
    /// destination balance delta, so base asset parked elsewhere by the router
    /// never counts as collected.
    #[allow(clippy::too_many_arguments)]
    pub fn convert<'info>(
        router_program: AccountInfo<'info>,
        route: AccountInfo<'info>,
        source: AccountInfo<'info>,
        destination: AccountInfo<'info>,
        authority: AccountInfo<'info>,
        token_program: AccountInfo<'info>,
        extra_accounts: &[AccountInfo<'info>],
        args: ConvertArgs,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<u64> {
        require!(args.amount_in > 0, RewardRouterError::ZeroAmount);

        let mut accounts = vec![
            AccountMeta::new(route.key(), false),
            AccountMeta::new(source.key(), false),
            AccountMeta::new(destination.key(), false),
            AccountMeta::new_readonly(authority.key(), true),
            AccountMeta::new_readonly(token_program.key(), false),
        ];
        accounts.extend(extra_accounts.iter().map(|a| AccountMeta {
            pubkey: a.key(),
            is_signer: a.is_signer,
            is_writable: a.is_writable,
        }));

        let instruction = Instruction {
            program_id: router_program.key(),
            accounts,
            data: args.instruction_data(),
        };

        let balance_before = accessor::amount(&destination)?;

        let mut infos = vec![
            route,
            source,
            destination.clone(),
            authority,
            token_program,
            router_program,
        ];
        infos.extend(extra_accounts.iter().cloned());

        invoke_signed(&instruction, &infos, signer_seeds)?;

        let balance_after = accessor::amount(&destination)?;
        balance_gain(balance_before, balance_after)
    }
}
