//! Projection output structures

use serde::{Deserialize, Serialize};
use std::io::Write;

/// A single row of projection output for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    // Timing
    pub projection_month: u32,
    pub policy_year: u32,
    pub month_in_policy_year: u32,
    pub attained_age: u8,

    // Account value roll-forward
    pub value_start: f64,
    pub premium: f64,
    pub premium_load: f64,
    pub expense_charge: f64,
    pub death_benefit: f64,
    pub naar: f64,
    pub coi_charge: f64,
    pub interest: f64,
    pub value_end: f64,
}

/// Complete month-by-month projection of one policy from issue to maturity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub issue_age: u8,
    pub face_amount: f64,

    /// Level annual premium the projection was run with
    pub annual_premium: f64,

    rows: Vec<MonthlyRow>,
}

impl ProjectionRecord {
    pub fn new(issue_age: u8, face_amount: f64, annual_premium: f64, capacity: usize) -> Self {
        Self {
            issue_age,
            face_amount,
            annual_premium,
            rows: Vec::with_capacity(capacity),
        }
    }

    /// Monthly rows, month 1 first
    pub fn rows(&self) -> &[MonthlyRow] {
        &self.rows
    }

    pub(super) fn push_row(&mut self, row: MonthlyRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ending account value of the final month (0 for an empty projection)
    pub fn final_value(&self) -> f64 {
        self.rows.last().map(|r| r.value_end).unwrap_or(0.0)
    }

    /// Policy survives to maturity with a strictly positive account value
    pub fn is_solvent(&self) -> bool {
        self.final_value() > 0.0
    }

    pub fn summary(&self) -> ProjectionSummary {
        let total_premium: f64 = self.rows.iter().map(|r| r.premium).sum();
        let total_premium_load: f64 = self.rows.iter().map(|r| r.premium_load).sum();
        let total_expense_charges: f64 = self.rows.iter().map(|r| r.expense_charge).sum();
        let total_coi_charges: f64 = self.rows.iter().map(|r| r.coi_charge).sum();
        let total_interest: f64 = self.rows.iter().map(|r| r.interest).sum();

        // First month the account value ends at or below zero
        let first_lapse_month = self
            .rows
            .iter()
            .find(|r| r.value_end <= 0.0)
            .map(|r| r.projection_month);

        ProjectionSummary {
            total_months: self.rows.len() as u32,
            annual_premium: self.annual_premium,
            total_premium,
            total_premium_load,
            total_expense_charges,
            total_coi_charges,
            total_interest,
            final_value: self.final_value(),
            first_lapse_month,
        }
    }

    /// Write every monthly row as CSV with a header line
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &self.rows {
            csv_writer.serialize(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub annual_premium: f64,
    pub total_premium: f64,
    pub total_premium_load: f64,
    pub total_expense_charges: f64,
    pub total_coi_charges: f64,
    pub total_interest: f64,
    pub final_value: f64,
    pub first_lapse_month: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: u32, value_end: f64) -> MonthlyRow {
        MonthlyRow {
            projection_month: month,
            policy_year: 1,
            month_in_policy_year: month,
            attained_age: 60,
            value_start: 0.0,
            premium: if month == 1 { 100.0 } else { 0.0 },
            premium_load: 0.0,
            expense_charge: 10.0,
            death_benefit: 1000.0,
            naar: 1000.0,
            coi_charge: 1.0,
            interest: 0.0,
            value_end,
        }
    }

    #[test]
    fn test_empty_record() {
        let record = ProjectionRecord::new(121, 1000.0, 0.0, 0);
        assert!(record.is_empty());
        assert_eq!(record.final_value(), 0.0);
        assert!(!record.is_solvent());
    }

    #[test]
    fn test_summary_totals() {
        let mut record = ProjectionRecord::new(60, 1000.0, 100.0, 3);
        record.push_row(row(1, 50.0));
        record.push_row(row(2, -2.0));
        record.push_row(row(3, 4.0));

        let summary = record.summary();
        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.total_premium, 100.0);
        assert_eq!(summary.total_expense_charges, 30.0);
        assert_eq!(summary.final_value, 4.0);
        assert_eq!(summary.first_lapse_month, Some(2));
        assert!(record.is_solvent());

        let months: Vec<u32> = record.rows().iter().map(|r| r.projection_month).collect();
        assert_eq!(months, vec![1, 2, 3]);
    }

    #[test]
    fn test_csv_export() {
        let mut record = ProjectionRecord::new(60, 1000.0, 100.0, 1);
        record.push_row(row(1, 50.0));

        let mut out = Vec::new();
        record.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("projection_month,policy_year,month_in_policy_year"));
        assert!(lines.next().unwrap().starts_with("1,1,1,60,"));
        assert!(lines.next().is_none());
    }
}
