use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// Probes the database on every call, refreshing the verdict the storage gate uses.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.health.probe().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "database": "healthy" })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "database": "unhealthy",
                "description": e.to_string(),
            })),
        ),
    }
}
