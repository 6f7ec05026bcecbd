//! Universal life projection system - account value projections and premium solves
//!
//! This library provides:
//! - Month-by-month account value projections to maturity at age 121
//! - Bisection solve for the minimum premium that keeps a policy solvent
//! - Rate tables keyed by gender, risk class and issue age, loaded from CSV
//! - Batch execution over a fixed worker pool, with sequential and rayon
//!   executors for throughput comparison

pub mod rates;
pub mod policy;
pub mod projection;
pub mod dispatch;

// Re-export commonly used types
pub use rates::{RateKind, RateSet, RateProvider, RateTables, CsvRateProvider, CachedRateProvider, RateError};
pub use policy::PolicyScenario;
pub use projection::{ProjectionEngine, ProjectionRecord, MonthlyRow, PremiumSolver, project, solve_min_premium};
pub use dispatch::{BatchConfig, BatchOutcome, Job, JobKind, JobRequest, run_batch};
