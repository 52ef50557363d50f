use std::collections::HashSet;
use std::io::Read;

use crate::models::YearlyTotal;
use crate::utils::{DashboardError, Result};

use super::{check_value, read_rows};

/// Read yearly totals, one row per year, returned in ascending year order
pub fn load<R: Read>(reader: R, file: &str) -> Result<Vec<YearlyTotal>> {
    let mut rows: Vec<YearlyTotal> = read_rows(reader, file)?;

    let mut seen = HashSet::new();
    for (index, row) in rows.iter().enumerate() {
        let line = index + 2;
        check_value(file, line, "gesamt_export", row.export_total)?;
        check_value(file, line, "gesamt_import", row.import_total)?;
        check_value(file, line, "gesamt_handelsvolumen", row.volume_total)?;
        if !seen.insert(row.year) {
            return Err(DashboardError::invalid_data(
                file,
                format!("line {}: year {} appears more than once", line, row.year),
            ));
        }
    }

    rows.sort_by_key(|r| r.year);
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Jahr,gesamt_export,gesamt_import,gesamt_handelsvolumen\n";

    #[test]
    fn test_load_sorts_by_year() {
        let csv = format!("{}2009,803e9,664e9,1467e9\n2008,984e9,805e9,1789e9\n", HEADER);
        let rows = load(csv.as_bytes(), "yearly.csv").unwrap();
        assert_eq!(rows.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2008, 2009]);
        assert_eq!(rows[0].export_total, 984e9);
    }

    #[test]
    fn test_load_accepts_float_years_and_extra_columns() {
        let csv = "Unnamed: 0,Jahr,gesamt_export,gesamt_import,gesamt_handelsvolumen\n0,2024.0,1,2,3\n";
        let rows = load(csv.as_bytes(), "yearly.csv").unwrap();
        assert_eq!(rows[0].year, 2024);
    }

    #[test]
    fn test_load_rejects_duplicate_year() {
        let csv = format!("{}2024,1,1,2\n2024,1,1,2\n", HEADER);
        let err = load(csv.as_bytes(), "yearly.csv").unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_load_rejects_negative_total() {
        let csv = format!("{}2024,-1,1,2\n", HEADER);
        assert!(matches!(
            load(csv.as_bytes(), "yearly.csv"),
            Err(DashboardError::InvalidData { .. })
        ));
    }
}
