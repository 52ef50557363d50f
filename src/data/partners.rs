use std::collections::HashSet;
use std::io::Read;

use crate::models::{Metric, TradeRecord};
use crate::utils::{DashboardError, Result};

use super::{check_value, read_rows};

/// Read per-country rows with their precomputed rankings.
///
/// Every rank must be at least 1 and unique within its (year, metric).
/// Input order is preserved; it decides ties when ranking by value.
pub fn load<R: Read>(reader: R, file: &str) -> Result<Vec<TradeRecord>> {
    let rows: Vec<TradeRecord> = read_rows(reader, file)?;

    let mut seen_ranks = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;
        if row.country.is_empty() {
            return Err(DashboardError::invalid_data(file, format!("line {}: empty country name", line)));
        }
        check_value(file, line, "export_wert", row.export_value)?;
        check_value(file, line, "import_wert", row.import_value)?;
        check_value(file, line, "handelsvolumen_wert", row.volume_value)?;

        for metric in Metric::ALL {
            let rank = row.rank(metric);
            if rank == 0 {
                return Err(DashboardError::invalid_data(
                    file,
                    format!("line {}: {} rank of {} must be 1 or more", line, metric, row.country),
                ));
            }
            if !seen_ranks.insert((row.year, metric, rank)) {
                return Err(DashboardError::invalid_data(
                    file,
                    format!(
                        "line {}: {} rank {} in {} is already taken ({})",
                        line, metric, rank, row.year, row.country
                    ),
                ));
            }
        }
    }

    Ok(rows)
}
