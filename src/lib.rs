//! Installment Rate - implied interest rates for installment-loan proposals
//!
//! This library provides:
//! - Ordinary annuity present value and level-installment arithmetic
//! - Bisection recovery of the periodic rate from principal, count and installment
//! - Proposal quoting (monthly and total interest) with optional validation
//! - CSV loading and parallel batch quoting of proposal exports

pub mod rate;
pub mod proposal;
pub mod batch;

// Re-export commonly used types
pub use rate::{compute_monthly_rate, RateSolution, RateSolver, SolveOutcome, SolverConfig};
pub use proposal::{LoanTerms, Proposal, ProposalError, ProposalRates};
pub use batch::{quote_batch, summarize, write_quotes, BatchSummary, QuotedProposal};
