//! Installment Rate CLI
//!
//! Quotes the implied monthly rate of a single proposal or of a CSV export

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use installment_rate::{
    batch, proposal::load_proposals, LoanTerms, RateSolver, SolveOutcome, SolverConfig,
};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "installment_rate", version, about = "Implied interest rates for installment loans")]
struct Cli {
    #[command(flatten)]
    solver: SolverArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SolverArgs {
    /// Absolute tolerance on the present value
    #[arg(long, global = true, default_value_t = SolverConfig::default().tolerance)]
    tolerance: f64,

    /// Maximum bisection steps
    #[arg(long, global = true, default_value_t = SolverConfig::default().max_iterations)]
    max_iterations: u32,
}

impl SolverArgs {
    fn to_config(&self) -> SolverConfig {
        SolverConfig {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
            ..SolverConfig::default()
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Quote a single proposal
    Solve {
        #[arg(long)]
        principal: f64,

        #[arg(long)]
        installments: u32,

        #[arg(long)]
        installment_value: f64,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Quote every proposal in a CSV file
    Batch {
        /// CSV with ProposalID,Principal,Installments,InstallmentValue
        #[arg(long)]
        input: PathBuf,

        /// Output CSV (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct SolveResponse {
    terms: LoanTerms,
    monthly_rate_pct: f64,
    total_interest_pct: f64,
    total_payback: f64,
    outcome: SolveOutcome,
    /// Why the terms quote at 0%, when they fail validation
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Quote the terms, keeping any validation failure as a warning
fn solve_response(terms: LoanTerms, solver: &RateSolver) -> SolveResponse {
    let warning = terms.validate().err().map(|err| err.to_string());
    let rates = terms.quote(solver);

    SolveResponse {
        terms,
        monthly_rate_pct: rates.monthly_rate_pct(),
        total_interest_pct: rates.total_interest_pct(),
        total_payback: rates.total_payback,
        outcome: rates.outcome,
        warning,
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let solver = RateSolver::new(cli.solver.to_config());

    match cli.command {
        Command::Solve { principal, installments, installment_value, json } => {
            let terms = LoanTerms::new(principal, installments, installment_value);
            let response = solve_response(terms, &solver);
            if let Some(warning) = &response.warning {
                log::warn!("{}; quoting at 0%", warning);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("Principal:       {:.2}", terms.principal);
                println!("Installments:    {} x {:.2}", terms.installment_count, terms.installment_value);
                println!("Total payback:   {:.2}", response.total_payback);
                println!("Monthly rate:    {:.4}%", response.monthly_rate_pct);
                println!("Total interest:  {:.4}%", response.total_interest_pct);
            }
        }

        Command::Batch { input, output } => {
            let start = Instant::now();
            let proposals = load_proposals(&input)
                .with_context(|| format!("loading proposals from {}", input.display()))?;

            let quotes = batch::quote_batch(&proposals, &solver);

            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    batch::write_quotes(BufWriter::new(file), &quotes)?;
                    log::info!("quotes written to {}", path.display());
                }
                None => batch::write_quotes(io::stdout().lock(), &quotes)?,
            }

            let summary = batch::summarize(&quotes);
            eprintln!(
                "Quoted {} proposals in {:?}: {} converged, {} exhausted, {} at 0%",
                summary.count,
                start.elapsed(),
                summary.converged,
                summary.exhausted,
                summary.zero_rate,
            );
            if let Some(mean) = summary.mean_monthly_rate {
                eprintln!("Mean monthly rate: {:.4}%", mean * 100.0);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_response_json() {
        let response = solve_response(LoanTerms::new(3000.0, 18, 216.50), &RateSolver::default());
        assert!(response.warning.is_none());

        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["outcome"], "Converged");
        assert_eq!(json["terms"]["installment_count"], 18);
        assert!((json["monthly_rate_pct"].as_f64().unwrap() - 2.9116474).abs() < 1e-6);
        assert!(json.get("warning").is_none());
    }

    #[test]
    fn test_solve_response_carries_validation_warning() {
        let response = solve_response(LoanTerms::new(1000.0, 10, 99.0), &RateSolver::default());

        assert_eq!(response.outcome, SolveOutcome::NoInterest);
        assert_eq!(response.monthly_rate_pct, 0.0);
        assert_eq!(
            response.warning.as_deref(),
            Some("total payback 990.00 does not exceed principal 1000.00")
        );
    }
}
