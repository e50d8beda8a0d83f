use axum::{extract::State, response::IntoResponse, Json};

use crate::{services::dashboard_service::compute_stats, AppState};

#[axum::debug_handler]
pub async fn get_dashboard_stats(State(state): State<AppState>) -> impl IntoResponse {
    let candidates = state.candidate_service.list();
    Json(compute_stats(&candidates, state.submissions.in_flight()))
}
