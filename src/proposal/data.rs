//! Loan terms of a sales proposal and the rates quoted for it

use serde::{Deserialize, Serialize};

use super::ProposalError;
use crate::rate::{pays_no_interest, total_payback, RateSolver, SolveOutcome};

/// Cash-flow parameters of an installment loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount disbursed to the borrower
    pub principal: f64,

    /// Number of equal installments
    pub installment_count: u32,

    /// Amount paid per installment
    pub installment_value: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, installment_count: u32, installment_value: f64) -> Self {
        Self {
            principal,
            installment_count,
            installment_value,
        }
    }

    pub fn total_payback(&self) -> f64 {
        total_payback(self.installment_count, self.installment_value)
    }

    /// Check the terms describe a loan that carries interest.
    ///
    /// Quoting does not require this; terms that fail it simply quote at 0.
    pub fn validate(&self) -> Result<(), ProposalError> {
        if !(self.principal.is_finite() && self.principal > 0.0) {
            return Err(ProposalError::NonPositive {
                field: "principal",
                value: self.principal,
            });
        }
        if self.installment_count == 0 {
            return Err(ProposalError::NoInstallments);
        }
        if !(self.installment_value.is_finite() && self.installment_value > 0.0) {
            return Err(ProposalError::NonPositive {
                field: "installment value",
                value: self.installment_value,
            });
        }

        if pays_no_interest(self.principal, self.installment_count, self.installment_value) {
            return Err(ProposalError::NoInterest {
                principal: self.principal,
                total_payback: self.total_payback(),
            });
        }

        Ok(())
    }

    /// Monthly and total interest implied by these terms
    pub fn quote(&self, solver: &RateSolver) -> ProposalRates {
        let solution =
            solver.solve_detailed(self.principal, self.installment_count, self.installment_value);

        ProposalRates {
            monthly_rate: solution.rate,
            total_interest_rate: solution.rate * self.installment_count as f64,
            total_payback: self.total_payback(),
            outcome: solution.outcome,
        }
    }
}

/// Rates shown on a proposal, as decimals (0.02 = 2%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProposalRates {
    pub monthly_rate: f64,

    /// Monthly rate times the installment count (simple, not compounded)
    pub total_interest_rate: f64,

    pub total_payback: f64,

    pub outcome: SolveOutcome,
}

impl ProposalRates {
    pub fn monthly_rate_pct(&self) -> f64 {
        self.monthly_rate * 100.0
    }

    pub fn total_interest_pct(&self) -> f64 {
        self.total_interest_rate * 100.0
    }
}

/// A proposal as loaded from a sales export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub proposal_id: String,
    pub terms: LoanTerms,
}
