use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "status": "ok",
        "candidates": state.candidate_service.len(),
        "analyzing": state.submissions.in_flight(),
    });
    (StatusCode::OK, Json(body))
}
