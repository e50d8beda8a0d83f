use axum::{extract::State, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    dto::question_dto::{FollowUpPayload, GenerateQuestionsPayload, GenerateQuestionsResponse},
    error::Result,
    AppState,
};

#[axum::debug_handler]
pub async fn generate_questions(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuestionsPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let questions = state
        .question_service
        .generate_questions(
            payload.position.trim(),
            payload.experience_level.trim(),
            payload.skills.trim(),
        )
        .await?;
    Ok(Json(GenerateQuestionsResponse { questions }))
}

#[axum::debug_handler]
pub async fn follow_up(
    State(state): State<AppState>,
    Json(payload): Json<FollowUpPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let suggestion = state
        .question_service
        .generate_follow_up(&payload.question, &payload.answer)
        .await?;
    Ok(Json(suggestion))
}
