//! Rate data acquisition errors

use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a `RateSet`: the underlying tables are missing,
/// unreadable, or malformed. No projection can proceed without rate data,
/// so callers treat this as fatal for the job that requested it.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("Failed to open rate table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse rate table: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed {table} table: {reason}")]
    Malformed { table: &'static str, reason: String },

    #[error("Issue age {0} is outside the supported range 0-120")]
    IssueAgeOutOfRange(u8),
}
