//! Policy scenario definitions

use crate::rates::MATURITY_AGE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference scenario used by the benchmark: male non-smoker, age 35, 100k face
pub const DEFAULT_GENDER: &str = "M";
pub const DEFAULT_RISK_CLASS: &str = "NS";
pub const DEFAULT_ISSUE_AGE: u8 = 35;
pub const DEFAULT_FACE_AMOUNT: f64 = 100_000.0;
pub const DEFAULT_PREMIUM: f64 = 1255.03;

/// A single universal life policy to project or solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyScenario {
    /// Gender code as it appears in the COI table (e.g. "M", "F")
    pub gender: String,

    /// Risk class code as it appears in the COI table (e.g. "NS", "SM")
    pub risk_class: String,

    /// Issue age (0-120)
    pub issue_age: u8,

    /// Face amount of the death benefit
    pub face_amount: f64,

    /// Level annual premium paid on each policy anniversary.
    /// Absent for premium solves.
    #[serde(default)]
    pub annual_premium: Option<f64>,
}

impl PolicyScenario {
    pub fn new(
        gender: impl Into<String>,
        risk_class: impl Into<String>,
        issue_age: u8,
        face_amount: f64,
        annual_premium: Option<f64>,
    ) -> Self {
        Self {
            gender: gender.into(),
            risk_class: risk_class.into(),
            issue_age,
            face_amount,
            annual_premium,
        }
    }

    /// The reference scenario with its known solved premium
    pub fn reference() -> Self {
        Self::new(
            DEFAULT_GENDER,
            DEFAULT_RISK_CLASS,
            DEFAULT_ISSUE_AGE,
            DEFAULT_FACE_AMOUNT,
            Some(DEFAULT_PREMIUM),
        )
    }

    /// Number of monthly steps from issue to maturity
    pub fn projection_months(&self) -> u32 {
        projection_months(self.issue_age)
    }

    /// Attained age at a 1-indexed projection month
    pub fn attained_age(&self, projection_month: u32) -> u8 {
        let policy_year = policy_year(projection_month);
        self.issue_age.saturating_add((policy_year - 1) as u8)
    }
}

impl fmt::Display for PolicyScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} age {} face {:.2}",
            self.gender, self.risk_class, self.issue_age, self.face_amount
        )?;
        if let Some(premium) = self.annual_premium {
            write!(f, " premium {:.2}", premium)?;
        }
        Ok(())
    }
}

/// Number of monthly steps from `issue_age` to maturity at age 121
pub fn projection_months(issue_age: u8) -> u32 {
    12 * MATURITY_AGE.saturating_sub(issue_age) as u32
}

/// Policy year (1-indexed) at a 1-indexed projection month
pub fn policy_year(projection_month: u32) -> u32 {
    projection_month.saturating_sub(1) / 12 + 1
}

/// Month within policy year (1-12) at a 1-indexed projection month
pub fn month_in_policy_year(projection_month: u32) -> u32 {
    (projection_month.saturating_sub(1) % 12) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_timing() {
        let scenario = PolicyScenario::reference();

        // Month 1: policy year 1, month 1
        assert_eq!(policy_year(1), 1);
        assert_eq!(month_in_policy_year(1), 1);
        assert_eq!(scenario.attained_age(1), 35);

        // Month 12: policy year 1, month 12, still age 35
        assert_eq!(policy_year(12), 1);
        assert_eq!(month_in_policy_year(12), 12);
        assert_eq!(scenario.attained_age(12), 35);

        // Month 13: policy year 2, month 1
        assert_eq!(policy_year(13), 2);
        assert_eq!(month_in_policy_year(13), 1);
        assert_eq!(scenario.attained_age(13), 36);
    }

    #[test]
    fn test_projection_months() {
        assert_eq!(PolicyScenario::reference().projection_months(), 1032);
        assert_eq!(projection_months(0), 1452);
        assert_eq!(projection_months(120), 12);
        assert_eq!(projection_months(121), 0);
    }

    #[test]
    fn test_display_includes_premium_when_present() {
        let text = PolicyScenario::reference().to_string();
        assert_eq!(text, "M/NS age 35 face 100000.00 premium 1255.03");

        let solve = PolicyScenario::new("F", "SM", 50, 250_000.0, None);
        assert_eq!(solve.to_string(), "F/SM age 50 face 250000.00");
    }
}
