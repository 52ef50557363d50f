//! Trade table models

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::utils::DashboardError;

/// Which trade figure a ranking or chart refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Export,
    Import,
    /// Export plus import
    Volume,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Export, Metric::Import, Metric::Volume];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Export => "export",
            Metric::Import => "import",
            Metric::Volume => "volume",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "export" => Ok(Metric::Export),
            "import" => Ok(Metric::Import),
            "volume" | "handelsvolumen" => Ok(Metric::Volume),
            other => Err(DashboardError::InvalidArgument(format!(
                "unknown metric '{}', expected one of: export, import, volume",
                other
            ))),
        }
    }
}

/// Accepts `2024` as well as `2024.0`, which is how pandas writes integer
/// columns that once held a NaN
fn whole_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || raw.fract() != 0.0 {
        return Err(de::Error::custom(format!("expected a whole number, got {}", raw)));
    }
    T::try_from(raw as i64).map_err(|_| de::Error::custom(format!("{} is out of range", raw)))
}

/// One trading partner in one year, with a value and a 1-based rank per metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(rename = "Land")]
    pub country: String,
    #[serde(rename = "Jahr", deserialize_with = "whole_number")]
    pub year: i32,
    #[serde(rename = "export_wert")]
    pub export_value: f64,
    #[serde(rename = "import_wert")]
    pub import_value: f64,
    #[serde(rename = "handelsvolumen_wert")]
    pub volume_value: f64,
    #[serde(rename = "export_ranking", deserialize_with = "whole_number")]
    pub export_rank: u32,
    #[serde(rename = "import_ranking", deserialize_with = "whole_number")]
    pub import_rank: u32,
    #[serde(rename = "handelsvolumen_ranking", deserialize_with = "whole_number")]
    pub volume_rank: u32,
}

impl TradeRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Export => self.export_value,
            Metric::Import => self.import_value,
            Metric::Volume => self.volume_value,
        }
    }

    pub fn rank(&self, metric: Metric) -> u32 {
        match metric {
            Metric::Export => self.export_rank,
            Metric::Import => self.import_rank,
            Metric::Volume => self.volume_rank,
        }
    }
}

/// Germany-wide totals for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTradeRecord {
    #[serde(rename = "Jahr", deserialize_with = "whole_number")]
    pub year: i32,
    #[serde(rename = "Monat", deserialize_with = "whole_number")]
    pub month: u32,
    #[serde(rename = "export_wert")]
    pub export_value: f64,
    #[serde(rename = "import_wert")]
    pub import_value: f64,
    #[serde(rename = "handelsvolumen_wert")]
    pub volume_value: f64,
}

impl MonthlyTradeRecord {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Export => self.export_value,
            Metric::Import => self.import_value,
            Metric::Volume => self.volume_value,
        }
    }
}

/// Germany-wide totals for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyTotal {
    #[serde(rename = "Jahr", deserialize_with = "whole_number")]
    pub year: i32,
    #[serde(rename = "gesamt_export")]
    pub export_total: f64,
    #[serde(rename = "gesamt_import")]
    pub import_total: f64,
    #[serde(rename = "gesamt_handelsvolumen")]
    pub volume_total: f64,
}

impl YearlyTotal {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Export => self.export_total,
            Metric::Import => self.import_total,
            Metric::Volume => self.volume_total,
        }
    }
}
