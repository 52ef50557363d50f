//! HTML pages of the dashboard
//!
//! Each page is the shared layout (sidebar + footer) around a heading, an
//! optional year selector, and one inline SVG chart with its data table per
//! chart of the page.

pub mod layout;

use tracing::{debug, info};

use crate::models::NavNode;
use crate::services::nav_service::{find_leaf, NAVIGATION};
use crate::services::page_service::{self, DashboardPage};
use crate::services::render_service::render_svg;
use crate::state::AppState;
use crate::utils::html::escape;
use crate::utils::{Result, Table};

pub use layout::{render_layout, render_year_select};

const PROMPT: &str = "Bitte eine Kategorie auswählen.";

fn heading(page: DashboardPage, top_n: usize) -> String {
    match page {
        DashboardPage::Overview => "Gesamter Export-, Import- und Handelsvolumen-Verlauf Deutschlands".to_string(),
        DashboardPage::Monthly => "Monatlicher Handelsverlauf".to_string(),
        DashboardPage::TopPartners => format!("Top {} Handelsländer Deutschlands", top_n),
    }
}

fn footer(state: &AppState) -> String {
    format!("Daten geladen am {}", state.loaded_at.format("%d.%m.%Y %H:%M"))
}

/// Landing page: sidebar and a prompt to pick a category
pub fn render_start(state: &AppState, path: &str) -> String {
    let content = format!("<h3>{}</h3>\n", escape(PROMPT));
    render_layout("Deutschlands Außenhandel", &NAVIGATION, path, &content, &footer(state))
}

/// Page for paths outside the navigation
pub fn render_not_found(state: &AppState, path: &str) -> String {
    let content = format!(
        "<h1>Seite nicht gefunden</h1>\n<p>Unter <code>{}</code> gibt es keine Auswertung.</p>\n<h3>{}</h3>\n",
        escape(path),
        escape(PROMPT)
    );
    render_layout("Seite nicht gefunden", &NAVIGATION, path, &content, &footer(state))
}

/// Render a dashboard page for the requested (or default) year
pub fn render_page(state: &AppState, page: DashboardPage, requested_year: Option<i32>) -> Result<String> {
    let years = page.available_years(&state.dataset);
    let year = page_service::resolve_year(requested_year, state.config.default_year, &years);
    info!("📊 Rendering {} for {}", page.path(), year);

    let title = heading(page, state.config.top_n);
    let mut content = format!("<h1>{}</h1>\n", escape(&title));
    if page.has_year_selector() {
        content.push_str(&render_year_select(page.path(), &years, year));
    }

    let charts = page_service::page_charts(&state.dataset, &state.configurator, page, year, state.config.top_n)?;
    for (id, spec) in &charts {
        let svg = render_svg(spec, &state.render_options)?;
        content.push_str(&format!("<section class=\"chart\" id=\"chart-{}\">\n{}\n", id, svg));

        let table = Table::from_chart(spec, state.locale());
        if !table.is_empty() {
            content.push_str("<details class=\"chart-data\">\n<summary>Daten</summary>\n");
            content.push_str(&table.render());
            content.push_str("</details>\n");
        }
        content.push_str("</section>\n");
    }
    debug!("{} rendered with {} charts", page.path(), charts.len());

    let document_title = find_leaf(&NAVIGATION, page.path())
        .map(NavNode::title)
        .unwrap_or(title.as_str());
    Ok(render_layout(document_title, &NAVIGATION, page.path(), &content, &footer(state)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::services::page_service::tests::sample_dataset;

    fn state() -> std::sync::Arc<AppState> {
        AppState::new(DashboardConfig::default(), sample_dataset())
    }

    #[test]
    fn test_start_page_prompts_for_category() {
        let html = render_start(&state(), "/");
        assert!(html.contains("Bitte eine Kategorie auswählen."));
        assert!(html.contains("<nav class=\"sidebar\">"));
    }

    #[test]
    fn test_not_found_page_escapes_path() {
        let html = render_not_found(&state(), "/<script>");
        assert!(html.contains("Seite nicht gefunden"));
        assert!(html.contains("/&lt;script&gt;"));
    }

    #[test]
    fn test_top_partner_page_has_three_charts() {
        let html = render_page(&state(), DashboardPage::TopPartners, Some(2024)).unwrap();
        assert!(html.contains("<h1>Top 10 Handelsländer Deutschlands</h1>"));
        assert_eq!(html.matches("<section class=\"chart\"").count(), 3);
        assert!(html.contains("id=\"chart-top-volume\""));
        assert!(html.contains("200.000.000.000 €"));
        assert!(html.contains("nav-link active"));
    }

    #[test]
    fn test_overview_page_has_no_year_selector() {
        let html = render_page(&state(), DashboardPage::Overview, None).unwrap();
        assert!(!html.contains("<select"));
        assert_eq!(html.matches("<section class=\"chart\"").count(), 1);
    }

    #[test]
    fn test_unknown_year_renders_empty_chart() {
        let html = render_page(&state(), DashboardPage::Monthly, Some(1990)).unwrap();
        assert!(html.contains("Keine Daten für die Auswahl vorhanden"));
        assert!(!html.contains("<summary>Daten</summary>"));
    }
}
