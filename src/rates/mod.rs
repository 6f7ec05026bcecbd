//! Rate data consumed by the projection engine
//!
//! A `RateSet` holds the seven annual rate series for one
//! (gender, risk class, issue age) combination. Series are indexed by
//! policy year minus one and always carry `MAX_POLICY_YEARS` entries.

mod series;
mod error;
mod tables;
mod cache;
pub mod loader;
#[cfg(test)]
pub(crate) mod sample;

pub use series::{RateKind, RateSeries, RateSet, MAX_POLICY_YEARS};
pub use error::RateError;
pub use tables::{ProductConstants, RateTables, PerUnitRow, CoiRow, CorridorRow, MATURITY_AGE};
pub use cache::CachedRateProvider;
pub use loader::CsvRateProvider;

/// Source of rate sets for projection jobs
///
/// Implementations must be deterministic: the same key always yields the same
/// `RateSet`. Providers are shared by reference across dispatcher workers.
pub trait RateProvider: Send + Sync {
    fn get_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError>;
}

impl<P: RateProvider + ?Sized> RateProvider for &P {
    fn get_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
        (**self).get_rates(gender, risk_class, issue_age)
    }
}

impl<P: RateProvider + ?Sized> RateProvider for Box<P> {
    fn get_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
        (**self).get_rates(gender, risk_class, issue_age)
    }
}
