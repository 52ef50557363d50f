use std::fmt;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::data::Dataset;
use crate::models::{ChartSpec, Metric, Series};
use crate::services::chart_service::{monthly_series_for_year, top_n_by_rank, ChartConfigurator};
use crate::utils::{DashboardError, Result};

/// Yearly totals run into the trillions, so they get a coarser grid
pub const OVERVIEW_TICK_STEP: f64 = 500e9;
pub const MONTHLY_TICK_STEP: f64 = 50e9;
pub const TOP_PARTNERS_TICK_STEP: f64 = 50e9;

const LINE_COLORS: [&str; 3] = ["#1f77b4", "#ff7f0e", "#2ca02c"];
const LINE_NAMES: [&str; 3] = ["Exportvolumen", "Importvolumen", "Gesamthandelsvolumen"];
const VALUE_AXIS: &str = "Wert in €";

/// The pages of the dashboard that have content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPage {
    Overview,
    Monthly,
    TopPartners,
}

impl DashboardPage {
    pub const ALL: [DashboardPage; 3] = [DashboardPage::Overview, DashboardPage::Monthly, DashboardPage::TopPartners];

    pub fn path(&self) -> &'static str {
        match self {
            DashboardPage::Overview => "/gesamt-export-import-handelsvolumen",
            DashboardPage::Monthly => "/monatlicher-handelsverlauf",
            DashboardPage::TopPartners => "/top-10-handelspartner",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|p| p.path() == path)
    }

    pub fn charts(&self) -> &'static [ChartId] {
        match self {
            DashboardPage::Overview => &[ChartId::Overview],
            DashboardPage::Monthly => &[ChartId::Monthly],
            DashboardPage::TopPartners => &[ChartId::TopExport, ChartId::TopImport, ChartId::TopVolume],
        }
    }

    /// Whether the page depends on a selected year
    pub fn has_year_selector(&self) -> bool {
        !matches!(self, DashboardPage::Overview)
    }

    /// Years offered in the selector
    pub fn available_years(&self, dataset: &Dataset) -> Vec<i32> {
        match self {
            DashboardPage::Overview => dataset.yearly_years(),
            DashboardPage::Monthly => dataset.monthly_years(),
            DashboardPage::TopPartners => dataset.partner_years(),
        }
    }
}

/// Addressable chart, used by the image and JSON endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    Overview,
    Monthly,
    TopExport,
    TopImport,
    TopVolume,
}

impl ChartId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::Overview => "overview",
            ChartId::Monthly => "monthly",
            ChartId::TopExport => "top-export",
            ChartId::TopImport => "top-import",
            ChartId::TopVolume => "top-volume",
        }
    }

    pub fn page(&self) -> DashboardPage {
        match self {
            ChartId::Overview => DashboardPage::Overview,
            ChartId::Monthly => DashboardPage::Monthly,
            ChartId::TopExport | ChartId::TopImport | ChartId::TopVolume => DashboardPage::TopPartners,
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartId {
    type Err = DashboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "overview" => Ok(ChartId::Overview),
            "monthly" => Ok(ChartId::Monthly),
            "top-export" => Ok(ChartId::TopExport),
            "top-import" => Ok(ChartId::TopImport),
            "top-volume" => Ok(ChartId::TopVolume),
            other => Err(DashboardError::NotFound(format!("no chart named '{}'", other))),
        }
    }
}

/// Year to show: the requested one, else the configured default if it has data,
/// else the latest year with data
pub fn resolve_year(requested: Option<i32>, default_year: i32, available: &[i32]) -> i32 {
    if let Some(year) = requested {
        return year;
    }
    if available.contains(&default_year) {
        return default_year;
    }
    match available.last() {
        Some(latest) => {
            warn!("No data for default year {}, showing {} instead", default_year, latest);
            *latest
        }
        None => default_year,
    }
}

/// Export, import and volume totals per year since the first year on record
pub fn overview_chart(dataset: &Dataset, configurator: &ChartConfigurator) -> Result<ChartSpec> {
    let categories = dataset.yearly.iter().map(|r| r.year.to_string()).collect();
    let series = Metric::ALL
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            let values = dataset.yearly.iter().map(|r| r.value(*metric)).collect();
            Series::line(LINE_NAMES[i], values, LINE_COLORS[i])
        })
        .collect();

    configurator.build_chart_spec(
        "Entwicklung von Export, Import und Handelsvolumen",
        "Jahr",
        VALUE_AXIS,
        categories,
        series,
        OVERVIEW_TICK_STEP,
    )
}

/// Month-by-month totals for one year
pub fn monthly_chart(dataset: &Dataset, configurator: &ChartConfigurator, year: i32) -> Result<ChartSpec> {
    let rows = monthly_series_for_year(&dataset.monthly, year);
    if rows.is_empty() {
        debug!("No monthly rows for {}", year);
    }

    let categories = configurator.month_labels(&rows);
    let series = Metric::ALL
        .iter()
        .enumerate()
        .map(|(i, metric)| {
            let values = rows.iter().map(|r| r.value(*metric)).collect();
            Series::line(LINE_NAMES[i], values, LINE_COLORS[i])
        })
        .collect();

    configurator.build_chart_spec(
        &format!("Monatlicher Export-, Import- und Handelsverlauf Deutschlands im Jahr {}", year),
        "Monat",
        VALUE_AXIS,
        categories,
        series,
        MONTHLY_TICK_STEP,
    )
}

fn top_partner_texts(metric: Metric, n: usize, year: i32) -> (String, &'static str, &'static str, &'static str) {
    match metric {
        Metric::Export => (
            format!("Top {} Exportländer im Jahr {}", n, year),
            "Export Wert (Euro)",
            "Export",
            "#0000ff",
        ),
        Metric::Import => (
            format!("Top {} Importländer im Jahr {}", n, year),
            "Import Wert (Euro)",
            "Import",
            "#008000",
        ),
        Metric::Volume => (
            format!("Top {} Handelspartner (Handelsvolumen) im Jahr {}", n, year),
            "Handelsvolumen (Euro)",
            "Handelsvolumen",
            "#ffa500",
        ),
    }
}

/// Top `n` partners by export, import and volume, drawn on one common scale
pub fn top_partner_charts(
    dataset: &Dataset,
    configurator: &ChartConfigurator,
    year: i32,
    n: usize,
) -> Result<Vec<ChartSpec>> {
    let mut specs = Vec::with_capacity(Metric::ALL.len());
    for metric in Metric::ALL {
        let rows = top_n_by_rank(&dataset.partners, metric, year, n);
        let (title, y_axis, name, color) = top_partner_texts(metric, n, year);
        let categories = rows.iter().map(|r| r.country.clone()).collect();
        let values = rows.iter().map(|r| r.value(metric)).collect();

        specs.push(configurator.build_chart_spec(
            &title,
            "Land",
            y_axis,
            categories,
            vec![Series::bar(name, values, color)],
            TOP_PARTNERS_TICK_STEP,
        )?);
    }

    configurator.share_axis(&mut specs, TOP_PARTNERS_TICK_STEP)?;
    Ok(specs)
}

/// Build one chart by id
pub fn chart_spec(
    dataset: &Dataset,
    configurator: &ChartConfigurator,
    id: ChartId,
    year: i32,
    top_n: usize,
) -> Result<ChartSpec> {
    let metric = match id {
        ChartId::Overview => return overview_chart(dataset, configurator),
        ChartId::Monthly => return monthly_chart(dataset, configurator, year),
        ChartId::TopExport => Metric::Export,
        ChartId::TopImport => Metric::Import,
        ChartId::TopVolume => Metric::Volume,
    };

    // all three are built so the shared axis matches what the page shows
    let specs = top_partner_charts(dataset, configurator, year, top_n)?;
    let index = Metric::ALL.iter().position(|m| *m == metric).unwrap_or_default();
    specs
        .into_iter()
        .nth(index)
        .ok_or_else(|| DashboardError::NotFound(format!("chart '{}'", id)))
}

/// Every chart of a page, in display order
pub fn page_charts(
    dataset: &Dataset,
    configurator: &ChartConfigurator,
    page: DashboardPage,
    year: i32,
    top_n: usize,
) -> Result<Vec<(ChartId, ChartSpec)>> {
    match page {
        DashboardPage::Overview => Ok(vec![(ChartId::Overview, overview_chart(dataset, configurator)?)]),
        DashboardPage::Monthly => Ok(vec![(ChartId::Monthly, monthly_chart(dataset, configurator, year)?)]),
        DashboardPage::TopPartners => {
            let specs = top_partner_charts(dataset, configurator, year, top_n)?;
            Ok(page.charts().iter().copied().zip(specs).collect())
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{MonthlyTradeRecord, TradeRecord, YearlyTotal};
    use crate::utils::Locale;

    pub(crate) fn sample_dataset() -> Dataset {
        let partner = |country: &str, export: f64, import: f64, ranks: (u32, u32, u32)| TradeRecord {
            country: country.to_string(),
            year: 2024,
            export_value: export,
            import_value: import,
            volume_value: export + import,
            export_rank: ranks.0,
            import_rank: ranks.1,
            volume_rank: ranks.2,
        };
        let month = |month: u32, export: f64| MonthlyTradeRecord {
            year: 2024,
            month,
            export_value: export,
            import_value: export * 0.9,
            volume_value: export * 1.9,
        };

        Dataset {
            yearly: vec![
                YearlyTotal { year: 2023, export_total: 1562e9, import_total: 1366e9, volume_total: 2928e9 },
                YearlyTotal { year: 2024, export_total: 1550e9, import_total: 1310e9, volume_total: 2860e9 },
            ],
            monthly: vec![month(1, 128e9), month(2, 131e9), month(4, 126e9)],
            partners: vec![
                partner("USA", 150e9, 90e9, (2, 2, 2)),
                partner("China", 200e9, 160e9, (1, 1, 1)),
                partner("Polen", 96e9, 78e9, (3, 3, 3)),
            ],
        }
    }

    #[test]
    fn test_page_paths_round_trip() {
        for page in DashboardPage::ALL {
            assert_eq!(DashboardPage::from_path(page.path()), Some(page));
        }
        assert_eq!(DashboardPage::from_path("/top-10-handelspartner/"), Some(DashboardPage::TopPartners));
        assert_eq!(DashboardPage::from_path("/unbekannt"), None);
    }

    #[test]
    fn test_unknown_chart_id_is_not_found() {
        assert!(matches!("pie".parse::<ChartId>(), Err(DashboardError::NotFound(_))));
        assert_eq!("top-volume".parse::<ChartId>().unwrap(), ChartId::TopVolume);
    }

    #[test]
    fn test_resolve_year() {
        assert_eq!(resolve_year(Some(2019), 2024, &[2023, 2024]), 2019);
        assert_eq!(resolve_year(None, 2024, &[2023, 2024]), 2024);
        assert_eq!(resolve_year(None, 2025, &[2022, 2023]), 2023);
        assert_eq!(resolve_year(None, 2024, &[]), 2024);
    }

    #[test]
    fn test_overview_chart_uses_coarse_ticks() {
        let spec = overview_chart(&sample_dataset(), &ChartConfigurator::new(Locale::De)).unwrap();
        assert_eq!(spec.x_labels, vec!["2023", "2024"]);
        assert_eq!(spec.series.len(), 3);
        assert_eq!(spec.tick_values.last().copied(), Some(3000e9));
        assert_eq!(spec.tick_labels[1], "500 Mrd");
    }

    #[test]
    fn test_monthly_chart_skips_missing_months() {
        let spec = monthly_chart(&sample_dataset(), &ChartConfigurator::new(Locale::De), 2024).unwrap();
        assert_eq!(spec.x_labels, vec!["Jan", "Feb", "Apr"]);
        assert!(spec.title.ends_with("2024"));
    }

    #[test]
    fn test_monthly_chart_for_unknown_year_is_empty() {
        let spec = monthly_chart(&sample_dataset(), &ChartConfigurator::default(), 1990).unwrap();
        assert!(spec.is_empty());
        assert_eq!(spec.tick_values, vec![0.0]);
    }

    #[test]
    fn test_top_partner_charts_share_axis() {
        let specs = top_partner_charts(&sample_dataset(), &ChartConfigurator::default(), 2024, 2).unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].x_labels, vec!["China", "USA"]);
        assert_eq!(specs[0].title, "Top 2 Exportländer im Jahr 2024");
        // volume of China (360e9) sets the scale for all three
        for spec in &specs {
            assert_eq!(spec.y_max(), 400e9);
        }
    }

    #[test]
    fn test_chart_spec_matches_page_chart() {
        let dataset = sample_dataset();
        let configurator = ChartConfigurator::default();
        let single = chart_spec(&dataset, &configurator, ChartId::TopImport, 2024, 10).unwrap();
        let page = page_charts(&dataset, &configurator, DashboardPage::TopPartners, 2024, 10).unwrap();
        assert_eq!(page[1].0, ChartId::TopImport);
        assert_eq!(page[1].1, single);
    }
}
