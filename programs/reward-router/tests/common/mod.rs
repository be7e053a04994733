//! Shared litesvm helpers for reward-router tests.

pub mod instructions;
pub mod mock_accounts;
pub mod pda;
pub mod setup;

pub use instructions::*;
pub use mock_accounts::*;
pub use pda::*;
pub use setup::*;
