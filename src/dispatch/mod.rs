//! Batch execution of projection and solve jobs

mod error;
mod job;
mod pool;
mod compare;

pub use error::{BatchError, DispatchError};
pub use job::{Job, JobKind, JobRequest, default_jobs};
pub use pool::{BatchConfig, BatchOutcome, run_batch, run_jobs, DEFAULT_WORKERS};
pub use compare::{run_sequential, run_par_iter};
