//! Shared rate fixtures for integration tests

#![allow(dead_code)]

use ul_projection::RateTables;

/// Build rate tables for M/NS and F/NS at every issue age below maturity
pub fn fixture_tables() -> RateTables {
    let mut per_unit = String::from("Issue_Age,Policy_Year,Rate\n");
    let mut coi = String::from("Gender,Risk_Class,Issue_Age,Policy_Year,Rate\n");
    let mut corridor = String::from("Attained_Age,Rate\n");

    for age in 0u32..=120 {
        for year in 1..=10 {
            per_unit.push_str(&format!("{},{},{}\n", age, year, 0.6));
        }
        for year in 1..=(121 - age) {
            let attained = (age + year - 1) as f64;
            let male = (0.6 * (0.09 * (attained - 30.0)).exp()).min(1000.0);
            coi.push_str(&format!("M,NS,{},{},{}\n", age, year, male));
            coi.push_str(&format!("F,NS,{},{},{}\n", age, year, male * 0.8));
        }
        let factor = match age {
            0..=40 => 2.5,
            41..=94 => 2.5 - 1.5 * (age - 40) as f64 / 55.0,
            _ => 1.0,
        };
        corridor.push_str(&format!("{},{}\n", age, factor));
    }

    RateTables::from_readers(per_unit.as_bytes(), coi.as_bytes(), corridor.as_bytes())
        .expect("fixture tables should parse")
}
