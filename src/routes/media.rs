use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

use crate::{
    error::{Error, Result},
    services::capture_service::MediaPayload,
    AppState,
};

/// Reads the first multipart field called `name` into a payload.
async fn read_file_field(multipart: &mut Multipart, name: &str) -> Result<Option<MediaPayload>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(name) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let mime_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(|e| {
            tracing::error!("Failed to read {} bytes: {}", name, e);
            Error::Multipart(e)
        })?;
        return Ok(Some(MediaPayload::new(file_name, mime_type, data)));
    }
    Ok(None)
}

#[axum::debug_handler]
pub async fn media_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.capture().summary())
}

/// Tears the whole workflow down: selections, recording, device, playback.
#[axum::debug_handler]
pub async fn reset_media(State(state): State<AppState>) -> impl IntoResponse {
    let mut capture = state.capture();
    capture.reset();
    Json(capture.summary())
}

#[axum::debug_handler]
pub async fn upload_media(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let payload = read_file_field(&mut multipart, "media")
        .await?
        .ok_or_else(|| Error::BadRequest("Interview media file is required".into()))?;
    if payload.data.is_empty() {
        return Err(Error::BadRequest("Interview media file is empty".into()));
    }

    tracing::info!(
        file = ?payload.file_name,
        mime = %payload.mime_type,
        size = payload.size(),
        "Interview media selected"
    );
    let mut capture = state.capture();
    capture.select_upload(payload)?;
    Ok(Json(capture.summary()))
}

#[axum::debug_handler]
pub async fn upload_cv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let payload = read_file_field(&mut multipart, "cv")
        .await?
        .ok_or_else(|| Error::BadRequest("CV file is required".into()))?;
    if payload.data.is_empty() {
        return Err(Error::BadRequest("CV file is empty".into()));
    }

    tracing::info!(file = ?payload.file_name, size = payload.size(), "CV selected");
    let mut capture = state.capture();
    capture.select_cv(payload)?;
    Ok(Json(capture.summary()))
}

#[axum::debug_handler]
pub async fn clear_cv(State(state): State<AppState>) -> impl IntoResponse {
    let mut capture = state.capture();
    capture.clear_cv();
    Json(capture.summary())
}
