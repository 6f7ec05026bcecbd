//! Minimum level premium solve
//!
//! Finds the smallest annual premium, to the cent, that keeps the account
//! value strictly positive at maturity. Relies on the final account value
//! being non-decreasing in premium, which holds whenever loads and charges
//! are non-negative.

use crate::rates::{RateSet, MATURITY_AGE};
use super::engine::ProjectionEngine;
use super::record::ProjectionRecord;
use thiserror::Error;

/// Solver tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig {
    /// Initial upper bracket is face amount divided by this
    pub initial_bracket_divisor: f64,

    /// Bisection stops once the bracket is no wider than this
    pub tolerance: f64,

    /// Maximum number of times the upper bracket may double
    pub max_doublings: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_bracket_divisor: 100.0,
            tolerance: 0.005,
            max_doublings: 64,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The doubling bracket search never leaves zero for a non-positive face
    #[error("Face amount must be positive to solve for premium, got {0}")]
    NonPositiveFaceAmount(f64),

    #[error("Issue age {0} is at or past maturity")]
    IssueAgeOutOfRange(u8),

    #[error("No solvent premium found after {doublings} doublings (last tried {last_premium:.2})")]
    BracketNotFound { doublings: u32, last_premium: f64 },
}

/// Bisection solver for the minimum solvent premium
#[derive(Debug, Clone, Copy)]
pub struct PremiumSolver<'r> {
    engine: ProjectionEngine<'r>,
    config: SolverConfig,
}

impl<'r> PremiumSolver<'r> {
    pub fn new(rates: &'r RateSet) -> Self {
        Self::with_config(rates, SolverConfig::default())
    }

    pub fn with_config(rates: &'r RateSet, config: SolverConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(rates),
            config,
        }
    }

    /// Solve and return the projection at the solved premium
    pub fn solve(&self, issue_age: u8, face_amount: f64) -> Result<ProjectionRecord, SolveError> {
        if face_amount.is_nan() || face_amount <= 0.0 {
            return Err(SolveError::NonPositiveFaceAmount(face_amount));
        }
        if issue_age >= MATURITY_AGE {
            return Err(SolveError::IssueAgeOutOfRange(issue_age));
        }

        let project = |premium: f64| self.engine.project(issue_age, face_amount, premium);

        // Expand the bracket until the upper end is solvent
        let mut lo = 0.0;
        let mut hi = face_amount / self.config.initial_bracket_divisor;
        let mut doublings = 0;
        while !project(hi).is_solvent() {
            if doublings >= self.config.max_doublings {
                return Err(SolveError::BracketNotFound { doublings, last_premium: hi });
            }
            lo = hi;
            hi *= 2.0;
            doublings += 1;
        }

        // Bisect; lo stays insolvent, hi stays solvent
        let mut mid = hi;
        let mut iterations = 0;
        while hi - lo > self.config.tolerance {
            mid = (lo + hi) / 2.0;
            if project(mid).is_solvent() {
                hi = mid;
            } else {
                lo = mid;
            }
            iterations += 1;
        }

        // Rounding to the cent may land just below the boundary
        let mut cents = (mid * 100.0).round();
        let mut record = project(cents / 100.0);
        if !record.is_solvent() {
            cents += 1.0;
            record = project(cents / 100.0);
        }

        log::debug!(
            "Solved premium {:.2} for age {} face {:.0} ({} doublings, {} bisections)",
            record.annual_premium,
            issue_age,
            face_amount,
            doublings,
            iterations
        );

        Ok(record)
    }
}

/// Solve for the minimum annual premium with default solver settings
pub fn solve_min_premium(rates: &RateSet, issue_age: u8, face_amount: f64) -> Result<ProjectionRecord, SolveError> {
    PremiumSolver::new(rates).solve(issue_age, face_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use crate::rates::sample::sample_rates;

    #[test]
    fn test_solved_premium_is_minimal() {
        let rates = sample_rates(35);
        let record = solve_min_premium(&rates, 35, 100_000.0).unwrap();
        let premium = record.annual_premium;

        assert!(record.is_solvent());
        assert_eq!(record.rows()[0].premium, premium);
        assert!(!project(&rates, 35, 100_000.0, premium - 0.01).is_solvent());
    }

    #[test]
    fn test_solved_premium_is_whole_cents() {
        let rates = sample_rates(50);
        let premium = solve_min_premium(&rates, 50, 250_000.0).unwrap().annual_premium;

        assert!(((premium * 100.0).round() - premium * 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_bracket_expansion_for_old_issue_age() {
        // At 90 the premium exceeds face / 100, so the bracket must double
        let rates = sample_rates(90);
        let record = solve_min_premium(&rates, 90, 100_000.0).unwrap();

        assert!(record.annual_premium > 1_000.0);
        assert!(record.is_solvent());
        assert!(!project(&rates, 90, 100_000.0, record.annual_premium - 0.01).is_solvent());
    }

    #[test]
    fn test_final_value_monotone_in_premium() {
        let rates = sample_rates(35);
        let finals: Vec<f64> = (0..40)
            .map(|i| project(&rates, 35, 100_000.0, i as f64 * 100.0).final_value())
            .collect();

        for pair in finals.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
    }

    #[test]
    fn test_non_positive_face_is_rejected() {
        let rates = sample_rates(35);

        assert_eq!(
            solve_min_premium(&rates, 35, 0.0).unwrap_err(),
            SolveError::NonPositiveFaceAmount(0.0)
        );
        assert!(matches!(
            solve_min_premium(&rates, 35, -5.0),
            Err(SolveError::NonPositiveFaceAmount(_))
        ));
        assert!(solve_min_premium(&rates, 35, f64::NAN).is_err());
    }

    #[test]
    fn test_issue_age_at_maturity_is_rejected() {
        let rates = sample_rates(35);
        assert_eq!(
            solve_min_premium(&rates, 121, 100_000.0).unwrap_err(),
            SolveError::IssueAgeOutOfRange(121)
        );
    }

    #[test]
    fn test_bracket_limit() {
        let rates = sample_rates(35);
        let config = SolverConfig { max_doublings: 0, initial_bracket_divisor: 1e9, ..SolverConfig::default() };

        let err = PremiumSolver::with_config(&rates, config).solve(35, 100_000.0).unwrap_err();
        assert!(matches!(err, SolveError::BracketNotFound { doublings: 0, .. }));
    }
}
