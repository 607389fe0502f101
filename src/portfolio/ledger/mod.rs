pub mod cost_basis_calculator;
mod ledger_model;


pub use cost_basis_calculator::reconstruct_holding_at;
pub use ledger_model::HoldingState;
