//! CSV-based rate table loader
//!
//! Loads rate tables from CSV files in data/rates/

use super::{CoiRow, CorridorRow, PerUnitRow, ProductConstants, RateError, RateProvider, RateSet, RateTables};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Default path to rate table directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

pub const PER_UNIT_FILE: &str = "unit_load.csv";
pub const COI_FILE: &str = "coi.csv";
pub const CORRIDOR_FILE: &str = "corridor_factors.csv";

fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, RateError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        rows.push(result?);
    }

    Ok(rows)
}

fn open(path: PathBuf) -> Result<File, RateError> {
    File::open(&path).map_err(|source| RateError::Io { path, source })
}

/// Load per-unit rates (`Issue_Age,Policy_Year,Rate`) from any reader
pub fn load_per_unit_from_reader<R: Read>(reader: R) -> Result<Vec<PerUnitRow>, RateError> {
    read_rows(reader)
}

/// Load COI rates (`Gender,Risk_Class,Issue_Age,Policy_Year,Rate`) from any reader
pub fn load_coi_from_reader<R: Read>(reader: R) -> Result<Vec<CoiRow>, RateError> {
    read_rows(reader)
}

/// Load corridor factors (`Attained_Age,Rate`) from any reader
pub fn load_corridor_from_reader<R: Read>(reader: R) -> Result<Vec<CorridorRow>, RateError> {
    read_rows(reader)
}

pub fn load_per_unit(dir: &Path) -> Result<Vec<PerUnitRow>, RateError> {
    load_per_unit_from_reader(open(dir.join(PER_UNIT_FILE))?)
}

pub fn load_coi(dir: &Path) -> Result<Vec<CoiRow>, RateError> {
    load_coi_from_reader(open(dir.join(COI_FILE))?)
}

pub fn load_corridor(dir: &Path) -> Result<Vec<CorridorRow>, RateError> {
    load_corridor_from_reader(open(dir.join(CORRIDOR_FILE))?)
}

impl RateTables {
    /// Load all tables from the default path
    pub fn load_default() -> Result<Self, RateError> {
        Self::load_from(Path::new(DEFAULT_RATES_PATH))
    }

    /// Load all tables from a specific directory
    pub fn load_from(dir: &Path) -> Result<Self, RateError> {
        let tables = Self {
            per_unit: load_per_unit(dir)?,
            coi: load_coi(dir)?,
            corridor: load_corridor(dir)?,
            constants: ProductConstants::default(),
        };
        log::debug!(
            "Loaded rate tables from {}: {} per-unit, {} COI, {} corridor rows",
            dir.display(),
            tables.per_unit.len(),
            tables.coi.len(),
            tables.corridor.len()
        );
        Ok(tables)
    }

    /// Load all tables from in-memory readers
    pub fn from_readers<A: Read, B: Read, C: Read>(per_unit: A, coi: B, corridor: C) -> Result<Self, RateError> {
        Ok(Self {
            per_unit: load_per_unit_from_reader(per_unit)?,
            coi: load_coi_from_reader(coi)?,
            corridor: load_corridor_from_reader(corridor)?,
            constants: ProductConstants::default(),
        })
    }
}

/// Provider that reads the CSV tables from disk on every request
///
/// Nothing is cached between calls, so repeated jobs for the same policy
/// reload identical data. Wrap in `CachedRateProvider` to avoid the reload.
#[derive(Debug, Clone)]
pub struct CsvRateProvider {
    dir: PathBuf,
    constants: ProductConstants,
}

impl CsvRateProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            constants: ProductConstants::default(),
        }
    }

    pub fn with_constants(mut self, constants: ProductConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for CsvRateProvider {
    fn default() -> Self {
        Self::new(DEFAULT_RATES_PATH)
    }
}

impl RateProvider for CsvRateProvider {
    fn get_rates(&self, gender: &str, risk_class: &str, issue_age: u8) -> Result<RateSet, RateError> {
        RateTables::load_from(&self.dir)?
            .with_constants(self.constants)
            .build_rates(gender, risk_class, issue_age)
    }
}
