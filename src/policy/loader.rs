//! Load policy scenarios from CSV
//!
//! Expected columns: `Gender,Risk_Class,Issue_Age,Face_Amount,Annual_Premium`.
//! `Annual_Premium` may be left blank for scenarios that will be solved.

use super::PolicyScenario;
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "Risk_Class")]
    risk_class: String,
    #[serde(rename = "Issue_Age")]
    issue_age: u8,
    #[serde(rename = "Face_Amount")]
    face_amount: f64,
    #[serde(rename = "Annual_Premium", default)]
    annual_premium: Option<f64>,
}

impl CsvRow {
    fn to_scenario(self) -> Result<PolicyScenario, Box<dyn Error>> {
        if self.issue_age > 120 {
            return Err(format!("Issue age {} exceeds 120", self.issue_age).into());
        }
        if let Some(premium) = self.annual_premium {
            if premium < 0.0 {
                return Err(format!("Negative annual premium: {}", premium).into());
            }
        }

        Ok(PolicyScenario::new(
            self.gender.trim(),
            self.risk_class.trim(),
            self.issue_age,
            self.face_amount,
            self.annual_premium,
        ))
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<PolicyScenario>, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    Ok(scenarios)
}

/// Load scenarios from any reader (e.g., string buffer, network stream)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<PolicyScenario>, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.to_scenario()?);
    }

    Ok(scenarios)
}
