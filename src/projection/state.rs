//! Projection state tracking for a single policy

use crate::policy::{month_in_policy_year, policy_year};

/// State of a policy at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed)
    pub projection_month: u32,

    /// Policy year (1-indexed)
    pub policy_year: u32,

    /// Month within policy year (1-12)
    pub month_in_policy_year: u32,

    /// Attained age
    pub attained_age: u8,

    /// Issue age, fixed for the life of the projection
    issue_age: u8,

    /// Beginning of period account value
    pub start_value: f64,

    /// End of period account value
    pub end_value: f64,
}

impl ProjectionState {
    /// Initialize state at issue, before the first month
    pub fn at_issue(issue_age: u8) -> Self {
        Self {
            projection_month: 0,
            policy_year: 0,
            month_in_policy_year: 0,
            attained_age: issue_age,
            issue_age,
            start_value: 0.0,
            end_value: 0.0,
        }
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.projection_month += 1;

        self.policy_year = policy_year(self.projection_month);
        self.month_in_policy_year = month_in_policy_year(self.projection_month);
        self.attained_age = self.issue_age.saturating_add((self.policy_year - 1) as u8);

        // BOP value comes from prior EOP
        self.start_value = self.end_value;
    }

    /// Premium is collected on each policy anniversary
    pub fn is_anniversary(&self) -> bool {
        self.month_in_policy_year == 1
    }
}
