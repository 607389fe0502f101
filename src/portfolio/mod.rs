pub mod ledger;
pub mod performance;
pub mod valuation;

pub use ledger::*;
pub use performance::*;
pub use valuation::*;
