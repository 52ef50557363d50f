use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

/// GET /health - liveness plus what was loaded at startup
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "loaded_at": state.loaded_at.to_rfc3339(),
        "locale": state.locale(),
        "rows": {
            "yearly": state.dataset.yearly.len(),
            "monthly": state.dataset.monthly.len(),
            "partners": state.dataset.partners.len(),
        },
    }))
}
