//! Core projection engine for monthly account value projections

use crate::policy::{projection_months, PolicyScenario};
use crate::rates::{RateKind, RateSet};
use super::record::{MonthlyRow, ProjectionRecord};
use super::state::ProjectionState;

/// Projection engine bound to one policy's rate set
///
/// Projections are pure: the same rates, issue age, face amount and premium
/// always produce an identical record.
#[derive(Debug, Clone, Copy)]
pub struct ProjectionEngine<'r> {
    rates: &'r RateSet,
}

impl<'r> ProjectionEngine<'r> {
    pub fn new(rates: &'r RateSet) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'r RateSet {
        self.rates
    }

    /// Run projection for a scenario; a missing premium projects with zero premium
    pub fn project_scenario(&self, scenario: &PolicyScenario) -> ProjectionRecord {
        self.project(
            scenario.issue_age,
            scenario.face_amount,
            scenario.annual_premium.unwrap_or(0.0),
        )
    }

    /// Project from issue to maturity, paying `annual_premium` on every anniversary
    pub fn project(&self, issue_age: u8, face_amount: f64, annual_premium: f64) -> ProjectionRecord {
        let months = projection_months(issue_age);
        let mut record = ProjectionRecord::new(issue_age, face_amount, annual_premium, months as usize);
        let mut state = ProjectionState::at_issue(issue_age);

        for _month in 1..=months {
            state.advance_month();
            let row = self.calculate_month(&mut state, face_amount, annual_premium);
            record.push_row(row);
        }

        record
    }

    /// Roll the account value forward one month
    fn calculate_month(&self, state: &mut ProjectionState, face_amount: f64, annual_premium: f64) -> MonthlyRow {
        let rates = self.rates;
        let year = state.policy_year;
        let rate = |kind: RateKind| rates[kind].for_policy_year(year);

        let premium = if state.is_anniversary() { annual_premium } else { 0.0 };
        let premium_load = premium * rate(RateKind::PremiumLoad);
        let expense_charge =
            (rate(RateKind::PolicyFee) + rate(RateKind::PerUnit) * face_amount / 1000.0) / 12.0;

        let av_for_db = state.start_value + premium - premium_load - expense_charge;
        let death_benefit = face_amount.max(rate(RateKind::CorridorFactor) * av_for_db);
        let naar = (death_benefit * rate(RateKind::NaarDiscount) - av_for_db.max(0.0)).max(0.0);
        let coi_charge = (naar / 1000.0) * (rate(RateKind::CostOfInsurance) / 12.0);

        let av_for_interest = av_for_db - coi_charge;
        let interest = av_for_interest.max(0.0) * rate(RateKind::Interest);
        let value_end = av_for_interest + interest;

        state.end_value = value_end;

        MonthlyRow {
            projection_month: state.projection_month,
            policy_year: state.policy_year,
            month_in_policy_year: state.month_in_policy_year,
            attained_age: state.attained_age,
            value_start: state.start_value,
            premium,
            premium_load,
            expense_charge,
            death_benefit,
            naar,
            coi_charge,
            interest,
            value_end,
        }
    }
}

/// Project one policy with the given rates
pub fn project(rates: &RateSet, issue_age: u8, face_amount: f64, annual_premium: f64) -> ProjectionRecord {
    ProjectionEngine::new(rates).project(issue_age, face_amount, annual_premium)
}
