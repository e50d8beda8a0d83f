use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    dto::interview_dto::StartRecordingPayload,
    error::{Error, Result},
    services::recording_service::{CaptureError, PlaybackHandle},
    AppState,
};

#[axum::debug_handler]
pub async fn recording_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.capture().summary().recording)
}

/// An empty body starts a recording. A non-empty one must be a JSON
/// `StartRecordingPayload`.
fn parse_start_payload(headers: &HeaderMap, body: &[u8]) -> Result<StartRecordingPayload> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartRecordingPayload::default());
    }
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim_start().starts_with("application/json"))
        .unwrap_or(false);
    if !is_json {
        return Err(Error::BadRequest(
            "Device report must be sent as application/json".into(),
        ));
    }
    let Json(payload) = Json::<StartRecordingPayload>::from_bytes(body)
        .map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    Ok(payload)
}

/// `Idle -> Recording`. The client reports a failed microphone request in
/// the body instead of starting.
#[axum::debug_handler]
pub async fn start_recording(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let payload = parse_start_payload(&headers, &body)?;
    if let Some(report) = payload.error {
        let err = CaptureError::from_platform(&report.name, &report.message);
        tracing::warn!(name = %report.name, code = err.code(), "Microphone unavailable");
        return Err(err.into());
    }

    let (session, recording) = {
        let mut capture = state.capture();
        let session = capture.start_recording(&state.microphone)?;
        (session, capture.summary().recording)
    };
    spawn_elapsed_timer(state, session);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "session": session, "recording": recording })),
    ))
}

/// One tick per second for as long as `session` stays the live recording.
fn spawn_elapsed_timer(state: AppState, session: Uuid) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        interval.tick().await;
        loop {
            interval.tick().await;
            let live = {
                let mut capture = state.capture();
                capture.tick_session(session)
            };
            if !live {
                tracing::debug!(%session, "Recording timer stopped");
                break;
            }
        }
    });
}

#[axum::debug_handler]
pub async fn push_chunk(State(state): State<AppState>, chunk: Bytes) -> Result<impl IntoResponse> {
    let mut capture = state.capture();
    capture.push_chunk(chunk)?;
    Ok((StatusCode::ACCEPTED, Json(capture.summary().recording)))
}

#[axum::debug_handler]
pub async fn stop_recording(State(state): State<AppState>) -> impl IntoResponse {
    let mut capture = state.capture();
    if let Some(audio) = capture.stop_recording() {
        tracing::info!(
            size = audio.data.len(),
            elapsed = audio.elapsed_seconds,
            "Recording finished"
        );
    }
    Json(capture.summary().recording)
}

#[axum::debug_handler]
pub async fn delete_recording(State(state): State<AppState>) -> impl IntoResponse {
    state.capture().delete_recording();
    StatusCode::NO_CONTENT
}

#[axum::debug_handler]
pub async fn playback(
    State(state): State<AppState>,
    Path(token): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let capture = state.capture();
    let audio = capture
        .playback(PlaybackHandle(token))
        .ok_or_else(|| Error::NotFound("Recording is no longer available".into()))?;
    Ok(([(header::CONTENT_TYPE, audio.mime_type)], audio.data.clone()))
}
