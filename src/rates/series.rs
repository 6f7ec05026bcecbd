//! Fixed-size rate series keyed by a closed set of rate kinds

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Number of policy years covered by every rate series (issue age 0 to maturity at 121)
pub const MAX_POLICY_YEARS: usize = 121;

/// The seven annual rate series a projection needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateKind {
    /// Percentage of gross premium deducted as load
    PremiumLoad,
    /// Annual policy fee in dollars, charged monthly
    PolicyFee,
    /// Annual charge per 1,000 of face amount, charged monthly
    PerUnit,
    /// Minimum ratio of death benefit to account value
    CorridorFactor,
    /// Monthly discount factor applied to the death benefit before computing NAAR
    NaarDiscount,
    /// Annual cost of insurance rate per 1,000 of NAAR
    CostOfInsurance,
    /// Effective monthly interest rate credited to positive account value
    Interest,
}

impl RateKind {
    pub const ALL: [RateKind; 7] = [
        RateKind::PremiumLoad,
        RateKind::PolicyFee,
        RateKind::PerUnit,
        RateKind::CorridorFactor,
        RateKind::NaarDiscount,
        RateKind::CostOfInsurance,
        RateKind::Interest,
    ];

    fn slot(self) -> usize {
        match self {
            RateKind::PremiumLoad => 0,
            RateKind::PolicyFee => 1,
            RateKind::PerUnit => 2,
            RateKind::CorridorFactor => 3,
            RateKind::NaarDiscount => 4,
            RateKind::CostOfInsurance => 5,
            RateKind::Interest => 6,
        }
    }

    /// Value used for policy years the source tables do not cover
    pub fn default_value(self) -> f64 {
        match self {
            RateKind::CorridorFactor => 1.0,
            _ => 0.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RateKind::PremiumLoad => "premium_load",
            RateKind::PolicyFee => "policy_fee",
            RateKind::PerUnit => "per_unit",
            RateKind::CorridorFactor => "corridor_factor",
            RateKind::NaarDiscount => "naar_discount",
            RateKind::CostOfInsurance => "coi",
            RateKind::Interest => "interest",
        }
    }
}

/// Annual rates where index 0 is policy year 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateSeries([f64; MAX_POLICY_YEARS]);

impl RateSeries {
    /// Series with the same rate in every policy year
    pub fn constant(value: f64) -> Self {
        Self([value; MAX_POLICY_YEARS])
    }

    pub fn from_array(values: [f64; MAX_POLICY_YEARS]) -> Self {
        Self(values)
    }

    /// Rate in force for a 1-indexed policy year
    pub fn for_policy_year(&self, policy_year: u32) -> f64 {
        self.0[policy_year as usize - 1]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

}

impl Index<usize> for RateSeries {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

impl IndexMut<usize> for RateSeries {
    fn index_mut(&mut self, idx: usize) -> &mut f64 {
        &mut self.0[idx]
    }
}

/// All rate series for one (gender, risk class, issue age) combination
#[derive(Debug, Clone, PartialEq)]
pub struct RateSet {
    series: [RateSeries; 7],
}

impl RateSet {
    /// Rate set where every series holds its kind's default value
    pub fn with_defaults() -> Self {
        Self {
            series: RateKind::ALL.map(|kind| RateSeries::constant(kind.default_value())),
        }
    }

    pub fn get(&self, kind: RateKind) -> &RateSeries {
        &self.series[kind.slot()]
    }

    pub fn set(&mut self, kind: RateKind, series: RateSeries) {
        self.series[kind.slot()] = series;
    }

    /// Builder-style variant of `set`
    pub fn with(mut self, kind: RateKind, series: RateSeries) -> Self {
        self.set(kind, series);
        self
    }
}

impl Default for RateSet {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Index<RateKind> for RateSet {
    type Output = RateSeries;

    fn index(&self, kind: RateKind) -> &RateSeries {
        self.get(kind)
    }
}

impl IndexMut<RateKind> for RateSet {
    fn index_mut(&mut self, kind: RateKind) -> &mut RateSeries {
        &mut self.series[kind.slot()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_by_kind() {
        let rates = RateSet::with_defaults();

        for kind in RateKind::ALL {
            assert_eq!(rates[kind].as_slice().len(), MAX_POLICY_YEARS);
        }
        assert!(rates[RateKind::CorridorFactor].as_slice().iter().all(|&r| r == 1.0));
        assert!(rates[RateKind::CostOfInsurance].as_slice().iter().all(|&r| r == 0.0));
    }

    #[test]
    fn test_policy_year_indexing() {
        let mut series = RateSeries::constant(0.0);
        series[0] = 1.5;
        series[120] = 9.0;

        assert_eq!(series.for_policy_year(1), 1.5);
        assert_eq!(series.for_policy_year(121), 9.0);
    }

    #[test]
    fn test_set_replaces_only_one_kind() {
        let rates = RateSet::with_defaults().with(RateKind::Interest, RateSeries::constant(0.002));

        assert_eq!(rates[RateKind::Interest][5], 0.002);
        assert_eq!(rates[RateKind::PremiumLoad][5], 0.0);
    }
}
