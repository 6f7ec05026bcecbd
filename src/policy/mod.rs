//! Policy scenarios and scenario file loading

mod data;
pub mod loader;

pub use data::{
    PolicyScenario, projection_months, policy_year, month_in_policy_year,
    DEFAULT_GENDER, DEFAULT_RISK_CLASS, DEFAULT_ISSUE_AGE, DEFAULT_FACE_AMOUNT, DEFAULT_PREMIUM,
};
pub use loader::{load_scenarios, load_scenarios_from_reader};
