use tracing::debug;

use crate::models::{ChartSpec, Metric, MonthlyTradeRecord, Series, TradeRecord};
use crate::utils::{DashboardError, Locale, Result};

/// Upper bound on ticks per axis; anything larger means the step does not fit the data
pub const MAX_TICKS: usize = 1000;

/// Axis scaling and chart assembly.
///
/// Holds nothing but the label locale, so every method is a pure function of
/// its arguments and the configurator can be copied freely between requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartConfigurator {
    locale: Locale,
}

impl ChartConfigurator {
    pub fn new(locale: Locale) -> Self {
        ChartConfigurator { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Human-scaled label: 1e9 and up in billions, 1e6 in millions, 1e3 in thousands.
    /// The quotient is printed without decimals; a boundary value takes the larger unit.
    /// The unit is picked from the raw value before rounding, so 999_999.6 reads "1000 K".
    pub fn format_magnitude(&self, value: f64) -> String {
        let [billions, millions, thousands] = self.locale.magnitude_suffixes();
        if value >= 1e9 {
            format!("{:.0}{}", value / 1e9, billions)
        } else if value >= 1e6 {
            format!("{:.0}{}", value / 1e6, millions)
        } else if value >= 1e3 {
            format!("{:.0}{}", value / 1e3, thousands)
        } else {
            format!("{:.0}", value)
        }
    }

    /// Ticks 0, step, 2*step, ... up to the first multiple of `step` that is >= `max_value`
    pub fn compute_ticks(&self, max_value: f64, step: f64) -> Result<(Vec<f64>, Vec<String>)> {
        if !step.is_finite() || step <= 0.0 {
            return Err(DashboardError::InvalidArgument(format!(
                "tick step must be a positive number, got {}",
                step
            )));
        }
        if !max_value.is_finite() || max_value < 0.0 {
            return Err(DashboardError::InvalidArgument(format!(
                "maximum value must be a non-negative number, got {}",
                max_value
            )));
        }

        let intervals = (max_value / step).ceil();
        if intervals >= MAX_TICKS as f64 {
            return Err(DashboardError::InvalidArgument(format!(
                "tick step {} is too small for a maximum of {} (more than {} ticks)",
                step, max_value, MAX_TICKS
            )));
        }

        let mut intervals = intervals as usize;
        // Division can overshoot by one ulp, e.g. 0.30000000000000004 / 0.1
        if intervals > 0 && (intervals - 1) as f64 * step >= max_value {
            intervals -= 1;
        }

        let values: Vec<f64> = (0..=intervals).map(|i| i as f64 * step).collect();
        let labels = values.iter().map(|v| self.format_magnitude(*v)).collect();
        Ok((values, labels))
    }

    /// Month labels for the given rows, in row order
    pub fn month_labels(&self, rows: &[&MonthlyTradeRecord]) -> Vec<String> {
        rows.iter()
            .map(|r| {
                self.locale
                    .month_label(r.month)
                    .map(str::to_string)
                    .unwrap_or_else(|| r.month.to_string())
            })
            .collect()
    }

    /// Assemble a chart whose y axis covers the largest value of any series
    pub fn build_chart_spec(
        &self,
        title: &str,
        x_axis_title: &str,
        y_axis_title: &str,
        categories: Vec<String>,
        series: Vec<Series>,
        tick_step: f64,
    ) -> Result<ChartSpec> {
        for s in &series {
            if s.values.len() != categories.len() {
                return Err(DashboardError::InvalidArgument(format!(
                    "series '{}' has {} values for {} categories",
                    s.name,
                    s.values.len(),
                    categories.len()
                )));
            }
            if let Some(bad) = s.values.iter().find(|v| !v.is_finite() || **v < 0.0) {
                return Err(DashboardError::InvalidArgument(format!(
                    "series '{}' contains {}, values must be non-negative numbers",
                    s.name, bad
                )));
            }
        }

        let max_value = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max);
        let (tick_values, tick_labels) = self.compute_ticks(max_value, tick_step)?;

        debug!(
            "Built chart '{}': {} categories, {} series, max {}, {} ticks",
            title,
            categories.len(),
            series.len(),
            max_value,
            tick_values.len()
        );

        Ok(ChartSpec {
            title: title.to_string(),
            x_axis_title: x_axis_title.to_string(),
            y_axis_title: y_axis_title.to_string(),
            x_labels: categories,
            series,
            tick_values,
            tick_labels,
        })
    }

    /// Give several charts one common y axis, scaled to the largest value among them
    pub fn share_axis(&self, specs: &mut [ChartSpec], tick_step: f64) -> Result<()> {
        let max_value = specs.iter().map(ChartSpec::max_value).fold(0.0, f64::max);
        let (tick_values, tick_labels) = self.compute_ticks(max_value, tick_step)?;
        for spec in specs.iter_mut() {
            spec.tick_values = tick_values.clone();
            spec.tick_labels = tick_labels.clone();
        }
        Ok(())
    }
}

/// Partners ranked within the top `n` for `metric` in `year`, largest value first.
/// Ties keep input order. A year without rows gives an empty list.
pub fn top_n_by_rank(records: &[TradeRecord], metric: Metric, year: i32, n: usize) -> Vec<&TradeRecord> {
    let mut rows: Vec<&TradeRecord> = records
        .iter()
        .filter(|r| r.year == year && (r.rank(metric) as usize) <= n)
        .collect();
    rows.sort_by(|a, b| b.value(metric).total_cmp(&a.value(metric)));
    rows
}

/// Rows of one year in input order; missing months stay missing
pub fn monthly_series_for_year(records: &[MonthlyTradeRecord], year: i32) -> Vec<&MonthlyTradeRecord> {
    records.iter().filter(|r| r.year == year).collect()
}
