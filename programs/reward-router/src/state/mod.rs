pub mod aggregator;
pub mod release_ledger;
pub mod dispatcher;
pub mod registry;
pub mod pool;
pub mod position;

pub use aggregator::*;
pub use release_ledger::*;
pub use dispatcher::*;
pub use registry::*;
pub use pool::*;
pub use position::*;
