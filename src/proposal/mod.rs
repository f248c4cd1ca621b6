//! Sales proposals: loan terms, quoted rates and CSV loading

mod data;
mod error;
pub mod loader;

pub use data::{LoanTerms, Proposal, ProposalRates};
pub use error::ProposalError;
pub use loader::{load_proposals, load_proposals_from_reader};
