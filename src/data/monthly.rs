use std::collections::HashSet;
use std::io::Read;

use crate::models::MonthlyTradeRecord;
use crate::utils::{DashboardError, Result};

use super::{check_value, read_rows};

/// Read monthly totals. Rows come back ordered by (year, month).
pub fn load<R: Read>(reader: R, file: &str) -> Result<Vec<MonthlyTradeRecord>> {
    let mut rows: Vec<MonthlyTradeRecord> = read_rows(reader, file)?;

    let mut seen = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;
        if !(1..=12).contains(&row.month) {
            return Err(DashboardError::invalid_data(
                file,
                format!("line {}: month {} is outside 1-12", line, row.month),
            ));
        }
        check_value(file, line, "export_wert", row.export_value)?;
        check_value(file, line, "import_wert", row.import_value)?;
        check_value(file, line, "handelsvolumen_wert", row.volume_value)?;
        if !seen.insert((row.year, row.month)) {
            return Err(DashboardError::invalid_data(
                file,
                format!("line {}: {}-{:02} appears more than once", line, row.year, row.month),
            ));
        }
    }

    rows.sort_by_key(|r| (r.year, r.month));
    Ok(rows)
}
