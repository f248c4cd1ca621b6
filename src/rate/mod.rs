//! Interest rate recovery for level-installment loans

pub mod annuity;
mod solver;

pub use annuity::{installment_for_rate, pays_no_interest, present_value, total_payback};
pub use solver::{compute_monthly_rate, RateSolution, RateSolver, SolveOutcome, SolverConfig};
