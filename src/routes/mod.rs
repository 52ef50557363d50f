pub mod charts;
pub mod pages;
pub mod system;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::utils::DashboardError;

/// `?jahr=2024` (or `?year=2024`) on pages and chart endpoints
#[derive(Debug, Default)]
pub struct YearQuery {
    pub jahr: Option<i32>,
}

impl YearQuery {
    /// An empty value means no year; anything else must parse as one
    pub fn from_uri(uri: &Uri) -> Result<Self, DashboardError> {
        let Query(params) = Query::<HashMap<String, String>>::try_from_uri(uri)
            .map_err(|e| DashboardError::InvalidArgument(e.body_text()))?;

        let raw = params
            .get("jahr")
            .or_else(|| params.get("year"))
            .map(|v| v.trim())
            .filter(|v| !v.is_empty());
        let jahr = match raw {
            None => None,
            Some(v) => Some(
                v.parse()
                    .map_err(|_| DashboardError::InvalidArgument(format!("'{}' is not a year", v)))?,
            ),
        };
        Ok(YearQuery { jahr })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for YearQuery
where
    S: Send + Sync,
{
    type Rejection = DashboardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        YearQuery::from_uri(&parts.uri)
    }
}

/// Assemble the dashboard router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(pages::routes())
        .merge(charts::routes())
        .merge(system::routes())
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn query(uri: &str) -> Result<YearQuery, DashboardError> {
        YearQuery::from_uri(&uri.parse::<Uri>().unwrap())
    }

    #[test]
    fn test_year_query_accepts_both_names() {
        assert_eq!(query("/monatlicher-handelsverlauf?jahr=2023").unwrap().jahr, Some(2023));
        assert_eq!(query("/api/charts/monthly?year=2024").unwrap().jahr, Some(2024));
        assert_eq!(query("/monatlicher-handelsverlauf").unwrap().jahr, None);
        assert_eq!(query("/monatlicher-handelsverlauf?jahr=").unwrap().jahr, None);
    }

    #[tokio::test]
    async fn test_malformed_year_is_json_400() {
        let err = query("/monatlicher-handelsverlauf?jahr=abc").unwrap_err();
        assert!(matches!(err, DashboardError::InvalidArgument(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("'abc' is not a year"));
    }
}
