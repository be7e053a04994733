pub mod initialize_aggregator;
pub mod open_release_ledger;
pub mod release;
pub mod initialize_router;
pub mod admin;
pub mod manage_pools;
pub mod collect_fees;
pub mod sync_pending;
pub mod dispatch_fees;
pub mod enter_pool;
pub mod leave_pool;
pub mod queries;

pub use initialize_aggregator::*;
pub use open_release_ledger::*;
pub use release::*;
pub use initialize_router::*;
pub use admin::*;
pub use manage_pools::*;
pub use collect_fees::*;
pub use sync_pending::*;
pub use dispatch_fees::*;
pub use enter_pool::*;
pub use leave_pool::*;
pub use queries::*;
