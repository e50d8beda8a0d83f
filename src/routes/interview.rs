use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    dto::interview_dto::{CandidateForm, InFlightResponse, SubmitInterviewResponse},
    error::{Error, Result},
    services::{analysis_service::AnalysisInput, candidate_service::CandidateService},
    AppState,
};

/// Encodes the selected media, runs the analysis and commits the candidate.
/// The store is only touched once a complete analysis has come back.
#[axum::debug_handler]
pub async fn submit_interview(
    State(state): State<AppState>,
    Json(form): Json<CandidateForm>,
) -> Result<impl IntoResponse> {
    form.check()?;
    let sources = state.capture().submission_sources()?;
    let source = sources.source;

    let _analyzing = state.submissions.begin();
    tracing::info!(
        candidate = %form.name,
        position = %form.position,
        ?source,
        media_bytes = sources.media.size(),
        "Interview submitted"
    );

    let prepared = tokio::task::spawn_blocking(move || sources.encode())
        .await
        .map_err(|e| Error::Internal(format!("Media encoding task failed: {}", e)))??;

    let analysis = state
        .analysis_service
        .analyze(AnalysisInput {
            candidate_name: form.name.trim(),
            position: form.position.trim(),
            media: &prepared.media,
            cv: prepared.cv.as_ref(),
        })
        .await?;

    let candidate = CandidateService::interviewed(&form, prepared.cv_file_name, analysis);
    let candidate = state.candidate_service.insert(candidate)?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitInterviewResponse { candidate, source }),
    ))
}

#[axum::debug_handler]
pub async fn in_flight(State(state): State<AppState>) -> impl IntoResponse {
    Json(InFlightResponse {
        analyzing: state.submissions.in_flight(),
    })
}
