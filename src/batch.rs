//! Batch quoting of proposal exports
//!
//! Each proposal is solved independently, so the batch runs on the rayon pool
//! and results come back in input order.

use crate::proposal::{Proposal, ProposalRates};
use crate::rate::{RateSolver, SolveOutcome};
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;

/// A proposal together with its quoted rates
#[derive(Debug, Clone, Serialize)]
pub struct QuotedProposal {
    pub proposal: Proposal,
    pub rates: ProposalRates,
}

/// Counts over a quoted batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub count: usize,
    pub converged: usize,
    pub exhausted: usize,
    /// Quotes at the 0 sentinel (no interest or degenerate terms)
    pub zero_rate: usize,
    /// Mean monthly rate over quotes with a non-zero rate
    pub mean_monthly_rate: Option<f64>,
}

/// Quote every proposal in parallel
pub fn quote_batch(proposals: &[Proposal], solver: &RateSolver) -> Vec<QuotedProposal> {
    proposals
        .par_iter()
        .map(|proposal| QuotedProposal {
            proposal: proposal.clone(),
            rates: proposal.terms.quote(solver),
        })
        .collect()
}

pub fn summarize(quotes: &[QuotedProposal]) -> BatchSummary {
    let mut summary = BatchSummary {
        count: quotes.len(),
        ..Default::default()
    };
    let mut rate_sum = 0.0;

    for quote in quotes {
        match quote.rates.outcome {
            SolveOutcome::Converged => summary.converged += 1,
            SolveOutcome::Exhausted => summary.exhausted += 1,
            SolveOutcome::NoInterest | SolveOutcome::DegenerateInput => {}
        }
        if quote.rates.monthly_rate == 0.0 {
            summary.zero_rate += 1;
        } else {
            rate_sum += quote.rates.monthly_rate;
        }
    }

    let priced = summary.count - summary.zero_rate;
    if priced > 0 {
        summary.mean_monthly_rate = Some(rate_sum / priced as f64);
    }

    summary
}

/// Write quotes as CSV
pub fn write_quotes<W: Write>(writer: W, quotes: &[QuotedProposal]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record([
        "ProposalID",
        "Principal",
        "Installments",
        "InstallmentValue",
        "TotalPayback",
        "MonthlyRate",
        "TotalInterestRate",
        "Outcome",
    ])?;

    for quote in quotes {
        let terms = &quote.proposal.terms;
        csv_writer.write_record([
            quote.proposal.proposal_id.clone(),
            format!("{:.2}", terms.principal),
            terms.installment_count.to_string(),
            format!("{:.2}", terms.installment_value),
            format!("{:.2}", quote.rates.total_payback),
            format!("{:.8}", quote.rates.monthly_rate),
            format!("{:.8}", quote.rates.total_interest_rate),
            quote.rates.outcome.as_str().to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proposal::{load_proposals_from_reader, LoanTerms};
    use approx::assert_relative_eq;

    fn sample_proposals() -> Vec<Proposal> {
        vec![
            Proposal { proposal_id: "A".into(), terms: LoanTerms::new(3000.0, 18, 216.50) },
            Proposal { proposal_id: "B".into(), terms: LoanTerms::new(1000.0, 10, 99.0) },
            Proposal { proposal_id: "C".into(), terms: LoanTerms::new(0.0, 10, 100.0) },
            Proposal { proposal_id: "D".into(), terms: LoanTerms::new(100.0, 2, 1000.0) },
        ]
    }

    #[test]
    fn test_quote_batch_preserves_order() {
        let proposals = sample_proposals();
        let quotes = quote_batch(&proposals, &RateSolver::default());

        let ids: Vec<_> = quotes.iter().map(|q| q.proposal.proposal_id.as_str()).collect();
        assert_eq!(ids, ["A", "B", "C", "D"]);
        assert_eq!(quotes[0].rates.outcome, SolveOutcome::Converged);
        assert_eq!(quotes[1].rates.outcome, SolveOutcome::NoInterest);
        assert_eq!(quotes[2].rates.outcome, SolveOutcome::DegenerateInput);
        assert_eq!(quotes[3].rates.outcome, SolveOutcome::Exhausted);
    }

    #[test]
    fn test_summary() {
        let quotes = quote_batch(&sample_proposals(), &RateSolver::default());
        let summary = summarize(&quotes);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.converged, 1);
        assert_eq!(summary.exhausted, 1);
        assert_eq!(summary.zero_rate, 2);

        let expected = (quotes[0].rates.monthly_rate + quotes[3].rates.monthly_rate) / 2.0;
        assert_relative_eq!(summary.mean_monthly_rate.unwrap(), expected);
    }

    #[test]
    fn test_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary, BatchSummary::default());
    }

    #[test]
    fn test_write_quotes() {
        let input = "ProposalID,Principal,Installments,InstallmentValue\nP-1,3000,18,216.5\n";
        let proposals = load_proposals_from_reader(input.as_bytes()).unwrap();
        let quotes = quote_batch(&proposals, &RateSolver::default());

        let mut buffer = Vec::new();
        write_quotes(&mut buffer, &quotes).unwrap();
        let output = String::from_utf8(buffer).unwrap();

        let mut lines = output.lines();
        assert_eq!(
            lines.next().unwrap(),
            "ProposalID,Principal,Installments,InstallmentValue,TotalPayback,MonthlyRate,TotalInterestRate,Outcome"
        );
        assert_eq!(
            lines.next().unwrap(),
            "P-1,3000.00,18,216.50,3897.00,0.02911647,0.52409654,Converged"
        );
        assert!(lines.next().is_none());
    }
}
