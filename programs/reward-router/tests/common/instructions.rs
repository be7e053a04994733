//! Instruction helpers around a deployed router: one aggregator paying the
//! dispatcher 20% and a team wallet 80%, and a dispatcher feeding its pools.

use anchor_lang::solana_program::sysvar;
use anchor_lang::system_program;
use litesvm::LiteSVM;
use reward_router::{
    accounts, instruction,
    state::{Payee, Pool, RewardDispatcher},
};
use solana_sdk::instruction::AccountMeta;
use solana_sdk::signature::Keypair;

use super::mock_accounts::*;
use super::pda::*;
use super::setup::*;

pub const DISPATCHER_SHARES: u64 = 2_000;
pub const TEAM_SHARES: u64 = 8_000;

pub struct TestRouter {
    pub svm: LiteSVM,
    pub authority: Keypair,
    pub router_id: [u8; 32],
    pub aggregator_id: [u8; 32],
    pub aggregator: Pubkey,
    pub team: Pubkey,
    pub dispatcher: Pubkey,
    pub registry: Pubkey,
    pub base_mint: Pubkey,
    pub base_treasury: Pubkey,
    pub wrapped_native_treasury: Pubkey,
    pub conversion_router: Pubkey,
}

impl TestRouter {
    /// Router over a fresh 6-decimal base mint
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Router whose base asset is wrapped SOL, so no conversion is needed
    pub fn with_native_base() -> Self {
        Self::build(true)
    }

    fn build(native_base: bool) -> Self {
        let mut svm = LiteSVM::new();
        deploy_reward_router_program(&mut svm);
        create_mock_mint_at(&mut svm, spl_token::native_mint::ID, 9);

        let base_mint = if native_base {
            spl_token::native_mint::ID
        } else {
            create_mock_mint(&mut svm, 6)
        };
        let authority = new_funded_keypair(&mut svm);
        let router_id = [9u8; 32];
        let aggregator_id = [7u8; 32];

        let dispatcher = find_dispatcher_pda(&router_id);
        let router = TestRouter {
            authority,
            router_id,
            aggregator_id,
            aggregator: find_aggregator_pda(&aggregator_id),
            team: Pubkey::new_unique(),
            dispatcher,
            registry: find_registry_pda(&router_id),
            base_mint,
            base_treasury: associated_token(&dispatcher, &base_mint),
            wrapped_native_treasury: find_wrapped_native_pda(&dispatcher),
            conversion_router: Pubkey::new_unique(),
            svm,
        };
        router.initialize()
    }

    fn initialize(mut self) -> Self {
        let ix = router_instruction(
            accounts::InitializeAggregator {
                aggregator: self.aggregator,
                authority: signer_key(&self.authority),
                system_program: system_program::ID,
            },
            instruction::InitializeAggregator {
                aggregator_id: self.aggregator_id,
                payees: vec![
                    Payee { account: self.dispatcher, shares: DISPATCHER_SHARES },
                    Payee { account: self.team, shares: TEAM_SHARES },
                ],
            },
            vec![],
        );
        send(&mut self.svm, ix, &[&self.authority]).expect("initialize_aggregator should succeed");

        let ix = router_instruction(
            accounts::InitializeRouter {
                dispatcher: self.dispatcher,
                registry: self.registry,
                base_mint: self.base_mint,
                wrapped_native_mint: spl_token::native_mint::ID,
                base_treasury: self.base_treasury,
                wrapped_native_treasury: self.wrapped_native_treasury,
                authority: signer_key(&self.authority),
                token_program: spl_token::ID,
                associated_token_program: spl_associated_token_account::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            },
            instruction::InitializeRouter {
                router_id: self.router_id,
                conversion_router: self.conversion_router,
                fee_aggregator: self.aggregator,
            },
            vec![],
        );
        send(&mut self.svm, ix, &[&self.authority]).expect("initialize_router should succeed");
        self
    }

    // ------------------------------------------------------------------
    // Pools
    // ------------------------------------------------------------------

    /// Create an open pool with no minimum entry and return its id.
    pub fn create_pool(&mut self, boost: u64) -> Result<u64, String> {
        let pool_id = self.registry_next_pool_id();
        let pool = find_pool_pda(&self.registry, pool_id);
        let ix = router_instruction(
            accounts::CreatePool {
                registry: self.registry,
                pool,
                base_mint: self.base_mint,
                pool_vault: find_pool_vault_pda(&pool),
                authority: signer_key(&self.authority),
                token_program: spl_token::ID,
                system_program: system_program::ID,
                rent: sysvar::rent::ID,
            },
            instruction::CreatePool {
                router_id: self.router_id,
                name: format!("POOL_{}", pool_id),
                opened: true,
                minimum_entry: 0,
                boost,
            },
            vec![],
        );
        send(&mut self.svm, ix, &[&self.authority]).map(|_| pool_id)
    }

    pub fn close_pool(&mut self, pool_id: u64) -> Result<(), String> {
        let current = self.pool(pool_id);
        let ix = router_instruction(
            self.manage_pool_accounts(pool_id),
            instruction::UpdatePool {
                router_id: self.router_id,
                pool_id,
                name: current.name,
                opened: false,
                minimum_entry: current.minimum_entry,
                boost: current.boost,
            },
            vec![],
        );
        send(&mut self.svm, ix, &[&self.authority])
    }

    pub fn remove_pool(&mut self, pool_id: u64) -> Result<(), String> {
        let ix = router_instruction(
            self.manage_pool_accounts(pool_id),
            instruction::RemovePool { router_id: self.router_id, pool_id },
            vec![],
        );
        send(&mut self.svm, ix, &[&self.authority])
    }

    fn manage_pool_accounts(&self, pool_id: u64) -> accounts::ManagePool {
        accounts::ManagePool {
            registry: self.registry,
            pool: find_pool_pda(&self.registry, pool_id),
            authority: signer_key(&self.authority),
        }
    }

    pub fn enter_pool(
        &mut self,
        depositor: &Keypair,
        pool_id: u64,
        source: Pubkey,
        amount: u64,
    ) -> Result<(), String> {
        let pool = find_pool_pda(&self.registry, pool_id);
        let depositor_key = signer_key(depositor);
        let ix = router_instruction(
            accounts::EnterPool {
                registry: self.registry,
                pool,
                pool_vault: find_pool_vault_pda(&pool),
                position: find_position_pda(&pool, &depositor_key),
                source,
                depositor: depositor_key,
                token_program: spl_token::ID,
                system_program: system_program::ID,
            },
            instruction::EnterPool { router_id: self.router_id, pool_id, amount },
            vec![],
        );
        send(&mut self.svm, ix, &[depositor])
    }

    pub fn leave_pool(
        &mut self,
        depositor: &Keypair,
        pool_id: u64,
        destination: Pubkey,
        shares: u64,
    ) -> Result<(), String> {
        let pool = find_pool_pda(&self.registry, pool_id);
        let depositor_key = signer_key(depositor);
        let ix = router_instruction(
            accounts::LeavePool {
                registry: self.registry,
                pool,
                pool_vault: find_pool_vault_pda(&pool),
                position: find_position_pda(&pool, &depositor_key),
                destination,
                depositor: depositor_key,
                token_program: spl_token::ID,
                system_program: system_program::ID,
            },
            instruction::LeavePool { router_id: self.router_id, pool_id, shares },
            vec![],
        );
        send(&mut self.svm, ix, &[depositor])
    }

    pub fn set_entry_paused(&mut self, paused: bool) -> Result<(), String> {
        let ix = router_instruction(
            accounts::SetEntryPaused {
                registry: self.registry,
                authority: signer_key(&self.authority),
            },
            instruction::SetEntryPaused { router_id: self.router_id, paused },
            vec![],
        );
        send(&mut self.svm, ix, &[&self.authority])
    }

    /// A funded depositor holding `amount` of the base asset.
    pub fn new_depositor(&mut self, amount: u64) -> (Keypair, Pubkey) {
        let depositor = new_funded_keypair(&mut self.svm);
        let source =
            create_mock_token_account(&mut self.svm, &self.base_mint, &signer_key(&depositor), amount);
        (depositor, source)
    }

    // ------------------------------------------------------------------
    // Aggregator releases
    // ------------------------------------------------------------------

    pub fn release_native(&mut self, caller: &Keypair, payee: Pubkey) -> Result<(), String> {
        let ix = router_instruction(
            accounts::ReleaseNative {
                aggregator: self.aggregator,
                release_ledger: find_release_ledger_pda(
                    &self.aggregator,
                    &reward_router::constants::NATIVE_ASSET,
                ),
                payee,
                payer: signer_key(caller),
                system_program: system_program::ID,
            },
            instruction::ReleaseNative { aggregator_id: self.aggregator_id },
            vec![],
        );
        send(&mut self.svm, ix, &[caller])
    }

    /// Release to every wallet in `payees`, passed only as remaining accounts.
    pub fn release_native_batch(&mut self, caller: &Keypair, payees: &[Pubkey]) -> Result<(), String> {
        let ix = router_instruction(
            accounts::ReleaseNativeBatch {
                aggregator: self.aggregator,
                release_ledger: find_release_ledger_pda(
                    &self.aggregator,
                    &reward_router::constants::NATIVE_ASSET,
                ),
                payer: signer_key(caller),
                system_program: system_program::ID,
            },
            instruction::ReleaseNativeBatch { aggregator_id: self.aggregator_id },
            payees.iter().map(writable).collect(),
        );
        send(&mut self.svm, ix, &[caller])
    }

    pub fn release_token(
        &mut self,
        caller: &Keypair,
        mint: Pubkey,
        payee_token: Pubkey,
    ) -> Result<(), String> {
        let ix = router_instruction(
            accounts::ReleaseToken {
                aggregator: self.aggregator,
                asset_mint: mint,
                release_ledger: find_release_ledger_pda(&self.aggregator, &mint),
                aggregator_token: associated_token(&self.aggregator, &mint),
                payee_token,
                payer: signer_key(caller),
                token_program: spl_token::ID,
                system_program: system_program::ID,
            },
            instruction::ReleaseToken { aggregator_id: self.aggregator_id },
            vec![],
        );
        send(&mut self.svm, ix, &[caller])
    }

    /// Send native fees to the aggregator.
    pub fn fund_aggregator_native(&mut self, lamports: u64) {
        self.svm.airdrop(&to_sdk(&self.aggregator), lamports).unwrap();
    }

    /// Place `amount` of `mint` in the aggregator's associated token account.
    pub fn fund_aggregator_token(&mut self, mint: &Pubkey, amount: u64) -> Pubkey {
        let address = associated_token(&self.aggregator, mint);
        create_mock_token_account_at(&mut self.svm, address, mint, &self.aggregator, amount);
        address
    }

    // ------------------------------------------------------------------
    // Collection and dispatch
    // ------------------------------------------------------------------

    pub fn collect_native_fees(&mut self, caller: &Keypair) -> Result<(), String> {
        let ix = router_instruction(
            accounts::CollectNativeFees {
                dispatcher: self.dispatcher,
                aggregator: self.aggregator,
                release_ledger: find_release_ledger_pda(
                    &self.aggregator,
                    &reward_router::constants::NATIVE_ASSET,
                ),
                wrapped_native_treasury: self.wrapped_native_treasury,
                base_treasury: self.base_treasury,
                route: None,
                conversion_router: None,
                payer: signer_key(caller),
                token_program: spl_token::ID,
                system_program: system_program::ID,
            },
            instruction::CollectNativeFees { router_id: self.router_id, minimum_amount_out: 0 },
            vec![],
        );
        send(&mut self.svm, ix, &[caller])
    }

    pub fn collect_token_fees(
        &mut self,
        caller: &Keypair,
        mint: Pubkey,
        dispatcher_token: Option<Pubkey>,
    ) -> Result<(), String> {
        let ix = router_instruction(
            accounts::CollectTokenFees {
                dispatcher: self.dispatcher,
                aggregator: self.aggregator,
                asset_mint: mint,
                release_ledger: find_release_ledger_pda(&self.aggregator, &mint),
                aggregator_token: associated_token(&self.aggregator, &mint),
                base_treasury: self.base_treasury,
                dispatcher_token,
                route: None,
                conversion_router: None,
                payer: signer_key(caller),
                token_program: spl_token::ID,
                system_program: system_program::ID,
            },
            instruction::CollectTokenFees { router_id: self.router_id, minimum_amount_out: 0 },
            vec![],
        );
        send(&mut self.svm, ix, &[caller])
    }

    pub fn sync_pending(&mut self, caller: &Keypair) -> Result<(), String> {
        let ix = router_instruction(
            accounts::SyncPending {
                dispatcher: self.dispatcher,
                base_treasury: self.base_treasury,
            },
            instruction::SyncPending { router_id: self.router_id },
            vec![],
        );
        send(&mut self.svm, ix, &[caller])
    }

    /// `[pool, pool_vault]` for every live pool, in registry order
    pub fn live_pool_accounts(&self) -> Vec<AccountMeta> {
        let registry: reward_router::state::PoolRegistry = fetch(&self.svm, &self.registry);
        registry
            .pools
            .iter()
            .flat_map(|pool| [writable(pool), writable(&find_pool_vault_pda(pool))])
            .collect()
    }

    pub fn dispatch_fees_with(
        &mut self,
        caller: &Keypair,
        pool_accounts: Vec<AccountMeta>,
    ) -> Result<(), String> {
        let ix = router_instruction(
            accounts::DispatchFees {
                dispatcher: self.dispatcher,
                registry: self.registry,
                base_treasury: self.base_treasury,
                token_program: spl_token::ID,
            },
            instruction::DispatchFees { router_id: self.router_id },
            pool_accounts,
        );
        send(&mut self.svm, ix, &[caller])
    }

    pub fn dispatch_fees(&mut self, caller: &Keypair) -> Result<(), String> {
        let pool_accounts = self.live_pool_accounts();
        self.dispatch_fees_with(caller, pool_accounts)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn dispatcher_state(&self) -> RewardDispatcher {
        fetch(&self.svm, &self.dispatcher)
    }

    pub fn pending(&self) -> u64 {
        self.dispatcher_state().pending_distribution
    }

    pub fn pool(&self, pool_id: u64) -> Pool {
        fetch(&self.svm, &find_pool_pda(&self.registry, pool_id))
    }

    pub fn pool_vault(&self, pool_id: u64) -> Pubkey {
        find_pool_vault_pda(&find_pool_pda(&self.registry, pool_id))
    }

    pub fn position(&self, pool_id: u64, depositor: &Keypair) -> Pubkey {
        find_position_pda(&find_pool_pda(&self.registry, pool_id), &signer_key(depositor))
    }

    fn registry_next_pool_id(&self) -> u64 {
        let registry: reward_router::state::PoolRegistry = fetch(&self.svm, &self.registry);
        registry.next_pool_id
    }
}
