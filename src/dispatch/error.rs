//! Batch dispatch errors

use crate::policy::PolicyScenario;
use crate::projection::SolveError;
use crate::rates::RateError;
use thiserror::Error;

/// Input rejected before any worker starts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DispatchError {
    #[error("Invalid job kind '{0}', must be 'project' or 'solve'")]
    InvalidJobKind(String),

    #[error("Worker count must be at least 1")]
    NoWorkers,

    #[error("Projection job has no annual premium: {0}")]
    MissingPremium(String),
}

/// Failure of a batch run
#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Invalid(#[from] DispatchError),

    /// Rate data could not be loaded; aborts the whole batch
    #[error("Rate data unavailable for {scenario}: {source}")]
    Rates {
        scenario: Box<PolicyScenario>,
        #[source]
        source: RateError,
    },

    #[error("Premium solve failed for {scenario}: {source}")]
    Solve {
        scenario: Box<PolicyScenario>,
        #[source]
        source: SolveError,
    },

    #[error("{0} worker(s) panicked")]
    WorkerPanicked(usize),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
