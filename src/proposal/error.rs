//! Errors raised while validating or loading proposals

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProposalError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("installment count must be at least 1")]
    NoInstallments,

    #[error("total payback {total_payback:.2} does not exceed principal {principal:.2}")]
    NoInterest { principal: f64, total_payback: f64 },

    #[error("failed to read proposals: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed proposal row: {0}")]
    Csv(#[from] csv::Error),
}
