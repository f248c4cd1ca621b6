//! Implied periodic rate of an installment loan
//!
//! Recovers the rate at which the present value of the installments equals
//! the principal, using bisection on `[0, 1]` (widened once to `[0, 2]`).
//!
//! The solver never fails. Every input it cannot price maps to a rate of `0`,
//! which therefore means either "no interest" or "degenerate input". Use
//! [`RateSolver::solve_detailed`] when the two need to be told apart.

use serde::{Deserialize, Serialize};

use super::annuity::{pays_no_interest, present_value};

/// Bisection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Absolute tolerance on `PV(rate) - principal`
    pub tolerance: f64,

    /// Hard cap on bisection steps
    pub max_iterations: u32,

    /// Upper end of the initial bracket (1.0 = 100% per period)
    pub initial_upper: f64,

    /// Upper end used when `PV(initial_upper)` still exceeds the principal.
    /// Applied once, without re-checking the bracket.
    pub widened_upper: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            initial_upper: 1.0,
            widened_upper: 2.0,
        }
    }
}

/// How a solve ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveOutcome {
    /// Non-positive or non-finite principal, count or installment
    DegenerateInput,
    /// Total payback at or below the principal
    NoInterest,
    /// PV matched the principal within tolerance
    Converged,
    /// Iteration cap reached; the last midpoint is returned
    Exhausted,
}

impl SolveOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolveOutcome::DegenerateInput => "DegenerateInput",
            SolveOutcome::NoInterest => "NoInterest",
            SolveOutcome::Converged => "Converged",
            SolveOutcome::Exhausted => "Exhausted",
        }
    }
}

/// Result of a solve with diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSolution {
    /// Periodic rate (0 for both sentinel outcomes)
    pub rate: f64,
    /// Bisection steps performed
    pub iterations: u32,
    /// `PV(rate) - principal` at the returned rate
    pub residual: f64,
    pub outcome: SolveOutcome,
}

impl RateSolution {
    fn sentinel(outcome: SolveOutcome) -> Self {
        Self {
            rate: 0.0,
            iterations: 0,
            residual: 0.0,
            outcome,
        }
    }
}

/// Bisection solver for the implied periodic rate
#[derive(Debug, Clone, Default)]
pub struct RateSolver {
    config: SolverConfig,
}

impl RateSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Periodic rate implied by the loan terms, or `0` when none is computable
    pub fn solve(&self, principal: f64, installment_count: u32, installment_value: f64) -> f64 {
        self.solve_detailed(principal, installment_count, installment_value)
            .rate
    }

    /// Same as [`solve`](Self::solve), reporting how the search ended
    pub fn solve_detailed(
        &self,
        principal: f64,
        installment_count: u32,
        installment_value: f64,
    ) -> RateSolution {
        let valid = principal.is_finite()
            && installment_value.is_finite()
            && principal > 0.0
            && installment_value > 0.0
            && installment_count > 0;
        if !valid {
            return RateSolution::sentinel(SolveOutcome::DegenerateInput);
        }

        if pays_no_interest(principal, installment_count, installment_value) {
            return RateSolution::sentinel(SolveOutcome::NoInterest);
        }

        let pv = |rate: f64| present_value(rate, installment_count, installment_value);

        let mut low = 0.0_f64;
        let mut high = self.config.initial_upper;
        if pv(high) > principal {
            log::debug!(
                "PV at {} still above principal {}, widening bracket to {}",
                high,
                principal,
                self.config.widened_upper
            );
            high = self.config.widened_upper;
        }

        let mut mid = low;
        let mut residual = pv(mid) - principal;

        for iteration in 0..self.config.max_iterations {
            mid = (low + high) / 2.0;
            residual = pv(mid) - principal;

            if residual.abs() < self.config.tolerance {
                log::trace!("converged to {} after {} iterations", mid, iteration + 1);
                return RateSolution {
                    rate: mid,
                    iterations: iteration + 1,
                    residual,
                    outcome: SolveOutcome::Converged,
                };
            }

            if residual > 0.0 {
                low = mid;
            } else {
                high = mid;
            }
        }

        log::debug!(
            "no convergence after {} iterations (principal {}, {} x {}), residual {:.3e}",
            self.config.max_iterations,
            principal,
            installment_count,
            installment_value,
            residual
        );

        RateSolution {
            rate: mid,
            iterations: self.config.max_iterations,
            residual,
            outcome: SolveOutcome::Exhausted,
        }
    }
}

/// Implied periodic rate with the default solver settings.
///
/// Returns `0` for degenerate inputs and for loans that pay back no more than
/// the principal.
pub fn compute_monthly_rate(principal: f64, installment_count: u32, installment_value: f64) -> f64 {
    RateSolver::default().solve(principal, installment_count, installment_value)
}
