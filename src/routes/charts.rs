use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::debug;

use super::YearQuery;
use crate::models::{ChartSpec, NavNode};
use crate::services::nav_service::NAVIGATION;
use crate::services::page_service::{self, ChartId};
use crate::services::render_service::render_svg;
use crate::state::AppState;
use crate::utils::DashboardError;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/charts/:id/svg", get(chart_svg))
        .route("/api/charts/:id", get(chart_json))
        .route("/api/navigation", get(navigation))
}

fn build(state: &AppState, id: &str, query: YearQuery) -> Result<ChartSpec, DashboardError> {
    let id: ChartId = id.parse()?;
    let years = id.page().available_years(&state.dataset);
    let year = page_service::resolve_year(query.jahr, state.config.default_year, &years);
    debug!("Chart {} requested for {}", id, year);
    page_service::chart_spec(&state.dataset, &state.configurator, id, year, state.config.top_n)
}

/// GET /charts/{id}/svg - the rendered chart on its own
async fn chart_svg(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: YearQuery,
) -> Result<impl IntoResponse, DashboardError> {
    let spec = build(&state, &id, query)?;
    let svg = render_svg(&spec, &state.render_options)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

/// GET /api/charts/{id} - chart description as JSON
async fn chart_json(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: YearQuery,
) -> Result<Json<ChartSpec>, DashboardError> {
    build(&state, &id, query).map(Json)
}

/// GET /api/navigation - the sidebar tree
async fn navigation() -> Json<Vec<NavNode>> {
    Json(NAVIGATION.clone())
}
