//! Chart specification models

use serde::{Deserialize, Serialize};

/// How a series is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    Line,
}

/// One named data series, one value per x category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    /// `#rrggbb`
    pub color: String,
    pub kind: SeriesKind,
}

impl Series {
    pub fn bar(name: &str, values: Vec<f64>, color: &str) -> Self {
        Series {
            name: name.to_string(),
            values,
            color: color.to_string(),
            kind: SeriesKind::Bar,
        }
    }

    pub fn line(name: &str, values: Vec<f64>, color: &str) -> Self {
        Series {
            name: name.to_string(),
            values,
            color: color.to_string(),
            kind: SeriesKind::Line,
        }
    }
}

/// Everything a renderer needs to draw one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
    pub tick_values: Vec<f64>,
    pub tick_labels: Vec<String>,
}

impl ChartSpec {
    /// True when there is nothing to plot
    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }

    /// Largest value across all series, 0 for an empty chart
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Top of the y axis
    pub fn y_max(&self) -> f64 {
        self.tick_values.last().copied().unwrap_or(0.0)
    }
}
