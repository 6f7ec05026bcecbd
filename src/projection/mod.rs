//! Projection engine and premium solver

mod state;
mod engine;
mod record;
mod solver;

pub use state::ProjectionState;
pub use engine::{ProjectionEngine, project};
pub use record::{MonthlyRow, ProjectionRecord, ProjectionSummary};
pub use solver::{PremiumSolver, SolverConfig, SolveError, solve_min_premium};
