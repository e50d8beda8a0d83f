use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    dto::interview_dto::{CandidateForm, UpdateStatusPayload},
    error::{Error, Result},
    AppState,
};

#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.candidate_service.list())
}

/// Records a candidate without an interview. Analysis happens later through
/// the interview workflow.
#[axum::debug_handler]
pub async fn import_candidate(
    State(state): State<AppState>,
    Json(form): Json<CandidateForm>,
) -> Result<impl IntoResponse> {
    form.check()?;
    let candidate = state.candidate_service.import(&form)?;
    Ok((StatusCode::CREATED, Json(candidate)))
}

#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .get(id)
        .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;
    Ok(Json(candidate))
}

#[axum::debug_handler]
pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if !state.candidate_service.remove(id) {
        tracing::debug!(%id, "Delete requested for unknown candidate");
    }
    StatusCode::NO_CONTENT
}

#[axum::debug_handler]
pub async fn update_candidate_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse> {
    let candidate = state.candidate_service.update_status(id, payload.status)?;
    Ok(Json(candidate))
}
