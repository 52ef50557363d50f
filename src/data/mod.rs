use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::models::{MonthlyTradeRecord, TradeRecord, YearlyTotal};
use crate::utils::{DashboardError, Result};

pub mod yearly;
pub mod monthly;
pub mod partners;

pub const YEARLY_FILE: &str = "1gesamt_deutschland.csv";
pub const MONTHLY_FILE: &str = "gesamt_deutschland_monthly.csv";
pub const PARTNERS_FILE: &str = "df_grouped.csv";

/// The three trade tables, loaded once at startup and never modified
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub yearly: Vec<YearlyTotal>,
    pub monthly: Vec<MonthlyTradeRecord>,
    pub partners: Vec<TradeRecord>,
}

impl Dataset {
    /// Load and validate every table under `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        info!("Loading trade tables from {}", dir.display());

        let yearly = yearly::load(open_table(dir, YEARLY_FILE)?, YEARLY_FILE)?;
        let monthly = monthly::load(open_table(dir, MONTHLY_FILE)?, MONTHLY_FILE)?;
        let partners = partners::load(open_table(dir, PARTNERS_FILE)?, PARTNERS_FILE)?;

        info!(
            "Loaded {} yearly totals, {} monthly rows, {} partner rows",
            yearly.len(),
            monthly.len(),
            partners.len()
        );

        Ok(Dataset { yearly, monthly, partners })
    }

    pub fn yearly_years(&self) -> Vec<i32> {
        distinct_years(self.yearly.iter().map(|r| r.year))
    }

    pub fn monthly_years(&self) -> Vec<i32> {
        distinct_years(self.monthly.iter().map(|r| r.year))
    }

    pub fn partner_years(&self) -> Vec<i32> {
        distinct_years(self.partners.iter().map(|r| r.year))
    }
}

fn open_table(dir: &Path, file: &str) -> Result<File> {
    let path = dir.join(file);
    File::open(&path).map_err(|e| {
        error!("Cannot open {}: {}", path.display(), e);
        DashboardError::Io(e)
    })
}

fn distinct_years(years: impl Iterator<Item = i32>) -> Vec<i32> {
    let mut years: Vec<i32> = years.collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Deserialize every row of a CSV table, tagging failures with the file name and line
pub(crate) fn read_rows<T, R>(reader: R, file: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.len();
    debug!("{} has {} columns", file, headers);

    let mut rows = Vec::new();
    for (index, row) in csv_reader.deserialize::<T>().enumerate() {
        let row = row.map_err(|e| DashboardError::invalid_data(file, format!("line {}: {}", index + 2, e)))?;
        rows.push(row);
    }

    debug!("Read {} rows from {}", rows.len(), file);
    Ok(rows)
}

/// Values must be finite and non-negative
pub(crate) fn check_value(file: &str, line: usize, column: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(DashboardError::invalid_data(
            file,
            format!("line {}: {} must be a non-negative number, got {}", line, column, value),
        ))
    }
}
