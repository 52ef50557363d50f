use std::sync::Arc;

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use super::YearQuery;
use crate::pages;
use crate::services::page_service::DashboardPage;
use crate::state::AppState;
use crate::utils::DashboardError;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(start))
        .route(DashboardPage::Overview.path(), get(overview))
        .route(DashboardPage::Monthly.path(), get(monthly))
        .route(DashboardPage::TopPartners.path(), get(top_partners))
}

/// GET / - category prompt
async fn start(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(pages::render_start(&state, "/"))
}

async fn overview(
    State(state): State<Arc<AppState>>,
    query: YearQuery,
) -> Result<Html<String>, DashboardError> {
    render(&state, DashboardPage::Overview, query)
}

async fn monthly(
    State(state): State<Arc<AppState>>,
    query: YearQuery,
) -> Result<Html<String>, DashboardError> {
    render(&state, DashboardPage::Monthly, query)
}

async fn top_partners(
    State(state): State<Arc<AppState>>,
    query: YearQuery,
) -> Result<Html<String>, DashboardError> {
    render(&state, DashboardPage::TopPartners, query)
}

fn render(state: &AppState, page: DashboardPage, query: YearQuery) -> Result<Html<String>, DashboardError> {
    pages::render_page(state, page, query.jahr).map(Html)
}

/// Anything unrouted gets the layout with a not-found notice.
/// Page paths with a trailing slash still resolve to their page.
pub async fn not_found(
    State(state): State<Arc<AppState>>,
    query: YearQuery,
    uri: Uri,
) -> Response {
    if let Some(page) = DashboardPage::from_path(uri.path()) {
        return render(&state, page, query).into_response();
    }
    (StatusCode::NOT_FOUND, Html(pages::render_not_found(&state, uri.path()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use crate::services::page_service::tests::sample_dataset;

    fn state() -> Arc<AppState> {
        AppState::new(DashboardConfig::default(), sample_dataset())
    }

    #[tokio::test]
    async fn test_monthly_page_uses_requested_year() {
        let Html(html) = monthly(State(state()), YearQuery { jahr: Some(2024) }).await.unwrap();
        assert!(html.contains("im Jahr 2024"));
        assert!(html.contains("Apr"));
    }

    #[tokio::test]
    async fn test_start_page() {
        let Html(html) = start(State(state())).await;
        assert!(html.contains("Bitte eine Kategorie auswählen."));
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let uri: Uri = "/laenderprofil".parse().unwrap();
        let response = not_found(State(state()), YearQuery::default(), uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("/laenderprofil"));
    }

    #[tokio::test]
    async fn test_trailing_slash_resolves_page() {
        let uri: Uri = "/top-10-handelspartner/".parse().unwrap();
        let response = not_found(State(state()), YearQuery { jahr: Some(2024) }, uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Top 10 Handelsländer Deutschlands"));
    }
}
