//! Synthetic rates for unit tests

use super::{ProductConstants, RateKind, RateSeries, RateSet, MAX_POLICY_YEARS};

/// Rate set with a level per-unit load in years 1-10, a COI rate growing
/// about 9% per year of attained age, and a corridor grading from 2.5 at
/// age 40 down to 1.0 at 95
pub(crate) fn sample_rates(issue_age: u8) -> RateSet {
    let constants = ProductConstants::default();
    let mut per_unit = RateSeries::constant(0.0);
    let mut coi = RateSeries::constant(0.0);
    let mut corridor = RateSeries::constant(1.0);

    for idx in 0..MAX_POLICY_YEARS {
        let attained = issue_age as f64 + idx as f64;
        if idx < 10 {
            per_unit[idx] = 0.6;
        }
        coi[idx] = (0.6 * (0.09 * (attained - 30.0)).exp()).min(1000.0);
        corridor[idx] = if attained <= 40.0 {
            2.5
        } else if attained < 95.0 {
            2.5 - 1.5 * (attained - 40.0) / 55.0
        } else {
            1.0
        };
    }

    RateSet::with_defaults()
        .with(RateKind::PremiumLoad, RateSeries::constant(constants.premium_load))
        .with(RateKind::PolicyFee, RateSeries::constant(constants.policy_fee))
        .with(RateKind::PerUnit, per_unit)
        .with(RateKind::CorridorFactor, corridor)
        .with(RateKind::NaarDiscount, RateSeries::constant(constants.monthly_naar_discount()))
        .with(RateKind::CostOfInsurance, coi)
        .with(RateKind::Interest, RateSeries::constant(constants.monthly_interest_rate()))
}
