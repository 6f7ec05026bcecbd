//! In-memory rate tables and the product constants layered on top of them

use super::{RateError, RateKind, RateProvider, RateSeries, RateSet, MAX_POLICY_YEARS};
use serde::{Deserialize, Serialize};

/// Maturity age; projections run until the insured attains this age
pub const MATURITY_AGE: u8 = 121;

/// Rates that do not come from a table lookup
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConstants {
    /// Premium load as a fraction of gross premium
    pub premium_load: f64,
    /// Annual policy fee in dollars
    pub policy_fee: f64,
    /// Nominal annual rate used to discount the death benefit for NAAR
    pub naar_discount_rate: f64,
    /// Annual effective interest rate credited to the account value
    pub interest_rate: f64,
}

impl Default for ProductConstants {
    fn default() -> Self {
        Self {
            premium_load: 0.06,
            policy_fee: 120.0,
            naar_discount_rate: 0.01,
            interest_rate: 0.03,
        }
    }
}

impl ProductConstants {
    /// Monthly NAAR discount factor: (1 + i)^(-1/12)
    pub fn monthly_naar_discount(&self) -> f64 {
        f64::powf(1.0 + self.naar_discount_rate, -1.0 / 12.0)
    }

    /// Effective monthly credited rate: (1 + i)^(1/12) - 1
    pub fn monthly_interest_rate(&self) -> f64 {
        f64::powf(1.0 + self.interest_rate, 1.0 / 12.0) - 1.0
    }

    /// Load constants from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Per-unit expense rate by issue age and policy year
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PerUnitRow {
    #[serde(rename = "Issue_Age")]
    pub issue_age: u8,
    #[serde(rename = "Policy_Year")]
    pub policy_year: u32,
    #[serde(rename = "Rate")]
    pub rate: f64,
}

/// Cost of insurance rate by gender, risk class, issue age and policy year
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CoiRow {
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Risk_Class")]
    pub risk_class: String,
    #[serde(rename = "Issue_Age")]
    pub issue_age: u8,
    #[serde(rename = "Policy_Year")]
    pub policy_year: u32,
    #[serde(rename = "Rate")]
    pub rate: f64,
}

/// Corridor factor by attained age
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CorridorRow {
    #[serde(rename = "Attained_Age")]
    pub attained_age: u8,
    #[serde(rename = "Rate")]
    pub rate: f64,
}

/// Parsed rate tables held in memory
///
/// Building a `RateSet` from these tables performs no I/O. When a table holds
/// several rows for the same key, the last one wins.
#[derive(Debug, Clone, Default)]
pub struct RateTables {
    pub per_unit: Vec<PerUnitRow>,
    pub coi: Vec<CoiRow>,
    pub corridor: Vec<CorridorRow>,
    pub constants: ProductConstants,
}

impl RateTables {
    pub fn new(
        per_unit: Vec<PerUnitRow>,
        coi: Vec<CoiRow>,
        corridor: Vec<CorridorRow>,
        constants: ProductConstants,
    ) -> Self {
        Self { per_unit, coi, corridor, constants }
    }

    pub fn with_constants(mut self, constants: ProductConstants) -> Self {
        self.constants = constants;
        self
    }

    /// Assemble the rate set for one policy
    pub fn build_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
        if issue_age >= MATURITY_AGE {
            return Err(RateError::IssueAgeOutOfRange(issue_age));
        }

        let mut per_unit = RateSeries::constant(RateKind::PerUnit.default_value());
        for row in self.per_unit.iter().filter(|r| r.issue_age == issue_age) {
            per_unit[policy_year_index("per_unit", row.policy_year)?] = row.rate;
        }

        let mut coi = RateSeries::constant(RateKind::CostOfInsurance.default_value());
        for row in self.coi.iter().filter(|r| {
            r.issue_age == issue_age && r.gender == gender && r.risk_class == risk_class
        }) {
            coi[policy_year_index("coi", row.policy_year)?] = row.rate;
        }

        // Attained ages past the final policy year fall outside the window
        let mut corridor = RateSeries::constant(RateKind::CorridorFactor.default_value());
        for row in self.corridor.iter().filter(|r| r.attained_age >= issue_age) {
            let idx = (row.attained_age - issue_age) as usize;
            if idx < MAX_POLICY_YEARS {
                corridor[idx] = row.rate;
            }
        }

        let c = &self.constants;
        Ok(RateSet::with_defaults()
            .with(RateKind::PremiumLoad, RateSeries::constant(c.premium_load))
            .with(RateKind::PolicyFee, RateSeries::constant(c.policy_fee))
            .with(RateKind::PerUnit, per_unit)
            .with(RateKind::CorridorFactor, corridor)
            .with(RateKind::NaarDiscount, RateSeries::constant(c.monthly_naar_discount()))
            .with(RateKind::CostOfInsurance, coi)
            .with(RateKind::Interest, RateSeries::constant(c.monthly_interest_rate())))
    }
}

impl RateProvider for RateTables {
    fn get_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
        self.build_rates(gender, risk_class, issue_age)
    }
}

fn policy_year_index(table: &'static str, policy_year: u32) -> Result<usize, RateError> {
    if policy_year == 0 || policy_year as usize > MAX_POLICY_YEARS {
        return Err(RateError::Malformed {
            table,
            reason: format!("policy year {} outside 1-{}", policy_year, MAX_POLICY_YEARS),
        });
    }
    Ok(policy_year as usize - 1)
}
