//! Data models for the trade dashboard
//!
//! Trade tables as loaded from CSV, the chart specification handed to the
//! renderer, and the sidebar navigation tree.

pub mod trade;
pub mod chart;
pub mod nav;

pub use trade::{Metric, TradeRecord, MonthlyTradeRecord, YearlyTotal};
pub use chart::{ChartSpec, Series, SeriesKind};
pub use nav::{NavNode, PLACEHOLDER_PATH};
