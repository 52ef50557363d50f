use std::sync::Arc;

use chrono::{DateTime, Local};

use crate::config::DashboardConfig;
use crate::data::Dataset;
use crate::services::chart_service::ChartConfigurator;
use crate::services::render_service::RenderOptions;
use crate::utils::Locale;

/// Shared, read-only state handed to every route handler
pub struct AppState {
    pub config: DashboardConfig,
    pub dataset: Dataset,
    pub configurator: ChartConfigurator,
    pub render_options: RenderOptions,
    pub loaded_at: DateTime<Local>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Arc<Self> {
        let configurator = ChartConfigurator::new(config.locale);
        let render_options = RenderOptions {
            width: config.chart_width,
            height: config.chart_height,
            empty_label: no_data_label(config.locale).to_string(),
        };

        Arc::new(Self {
            config,
            dataset,
            configurator,
            render_options,
            loaded_at: Local::now(),
        })
    }

    pub fn locale(&self) -> Locale {
        self.configurator.locale()
    }
}

pub fn no_data_label(locale: Locale) -> &'static str {
    match locale {
        Locale::De => "Keine Daten für die Auswahl vorhanden",
        Locale::En => "No data for this selection",
    }
}
