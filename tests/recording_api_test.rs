mod common;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
};
use common::*;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

fn chunk(data: &'static [u8]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/recording/chunks")
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .body(Body::from(data))
        .unwrap()
}

#[tokio::test]
async fn record_stop_and_play_back() {
    let (app, state) = app_with(ScriptedModel::new(vec![]));

    let (status, body) = send(&app, empty_request("POST", "/api/recording/start")).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["recording"]["state"], "recording");
    assert!(state.microphone.is_in_use());

    let session: Uuid = serde_json::from_value(body["session"].clone()).unwrap();
    for _ in 0..3 {
        assert!(state.capture().tick_session(session));
    }

    let chunks: [&'static [u8]; 4] = [b"webm-header", b"", b"-frame-1", b"-frame-2"];
    for data in chunks {
        let (status, _) = send(&app, chunk(data)).await;
        assert_eq!(status, StatusCode::ACCEPTED);
    }

    let (status, recording) = send(&app, empty_request("POST", "/api/recording/stop")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recording["state"], "recorded");
    assert!(recording["elapsed_seconds"].as_u64().unwrap() >= 3);
    assert_eq!(recording["size"], 27);
    assert_eq!(recording["mime_type"], "audio/webm");
    assert!(!state.microphone.is_in_use());
    assert!(!state.capture().tick_session(session));

    let url = recording["playback_url"].as_str().unwrap().to_string();
    let res = app
        .clone()
        .oneshot(empty_request("GET", &url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "audio/webm");
    let audio = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&audio[..], b"webm-header-frame-1-frame-2");

    let (_, summary) = send(&app, empty_request("GET", "/api/media")).await;
    assert_eq!(summary["active_source"], "recording");

    let (status, _) = send(&app, empty_request("DELETE", "/api/recording")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, empty_request("GET", &url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, recording) = send(&app, empty_request("GET", "/api/recording")).await;
    assert_eq!(recording["state"], "idle");
    assert_eq!(recording["elapsed"], "0:00");
}

#[tokio::test]
async fn recorded_interview_can_be_submitted() {
    let model = ScriptedModel::new(vec![Ok(analysis_json(64, "Medium", "I"))]);
    let (app, state) = app_with(model);

    send(&app, empty_request("POST", "/api/recording/start")).await;
    send(&app, chunk(b"audio-bytes")).await;

    let (status, body) = send(
        &app,
        json_request("POST", "/api/interviews", candidate_form("Yusuf")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Stop the recording before submitting.");

    send(&app, empty_request("POST", "/api/recording/stop")).await;
    let (status, body) = send(
        &app,
        json_request("POST", "/api/interviews", candidate_form("Yusuf")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["source"], "recording");
    assert_eq!(state.candidate_service.len(), 1);

    let (status, _) = send(&app, empty_request("DELETE", "/api/media")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(state.capture().active_source().is_none());
}

#[tokio::test]
async fn device_failures_map_to_categories() {
    let (app, state) = app_with(ScriptedModel::new(vec![]));

    let cases = [
        ("NotFoundError", "Requested device not found", "capture_device_not_found"),
        ("NotAllowedError", "Permission denied", "capture_permission_denied"),
        ("PermissionDeniedError", "", "capture_permission_denied"),
        ("NotReadableError", "Could not start audio source", "capture_device_busy"),
        ("NotSupportedError", "", "capture_unsupported"),
        ("OverconstrainedError", "Constraints not satisfied", "capture_failed"),
    ];

    for (name, message, code) in cases {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/recording/start",
                json!({ "error": { "name": name, "message": message } }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
        assert_eq!(body["code"], code, "{name}");
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    assert!(!state.microphone.is_in_use());
    let (_, recording) = send(&app, empty_request("GET", "/api/recording")).await;
    assert_eq!(recording["state"], "idle");
}

#[tokio::test]
async fn only_one_session_at_a_time() {
    let (app, _) = app_with(ScriptedModel::new(vec![]));

    let (status, _) = send(&app, empty_request("POST", "/api/recording/start")).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, empty_request("POST", "/api/recording/start")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, empty_request("POST", "/api/recording/stop")).await;
    let (status, _) = send(&app, empty_request("POST", "/api/recording/start")).await;
    assert_eq!(status, StatusCode::CONFLICT);

    send(&app, empty_request("DELETE", "/api/recording")).await;
    let (status, _) = send(&app, empty_request("POST", "/api/recording/start")).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn upload_replaces_recording_and_idle_stop_is_noop() {
    let (app, state) = app_with(ScriptedModel::new(vec![]));

    let (status, recording) = send(&app, empty_request("POST", "/api/recording/stop")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(recording["state"], "idle");

    send(&app, empty_request("POST", "/api/recording/start")).await;
    send(&app, chunk(b"abc")).await;
    send(&app, empty_request("POST", "/api/recording/stop")).await;

    let (status, summary) = send(
        &app,
        multipart_request(
            "/api/media/upload",
            multipart_body("media", "interview.m4a", "audio/mp4", &[9u8; 512]),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["active_source"], "upload");
    assert_eq!(summary["recording"]["state"], "idle");
    assert!(summary["recording"]["playback_url"].is_null());
    assert!(!state.microphone.is_in_use());
}

#[tokio::test]
async fn recording_stops_growing_at_media_ceiling() {
    let model = ScriptedModel::new(vec![Ok(analysis_json(50, "High", "D"))]);
    let (app, _) = app_with(model.clone());
    send(&app, empty_request("POST", "/api/recording/start")).await;

    let ten_mb = vec![0u8; 10 * 1024 * 1024];
    for expected in [StatusCode::ACCEPTED, StatusCode::ACCEPTED, StatusCode::PAYLOAD_TOO_LARGE] {
        let req = Request::builder()
            .method("POST")
            .uri("/api/recording/chunks")
            .header(header::CONTENT_TYPE, "application/octet-stream")
            .body(Body::from(ten_mb.clone()))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, expected, "{body}");
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            assert!(body["error"].as_str().unwrap().contains("20 MB"));
        }
    }

    let (_, recording) = send(&app, empty_request("POST", "/api/recording/stop")).await;
    assert_eq!(recording["size"], 20 * 1024 * 1024);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/interviews", candidate_form("Lestari")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(model.request_count(), 1);
}

#[tokio::test]
async fn malformed_device_report_does_not_start_recording() {
    let (app, state) = app_with(ScriptedModel::new(vec![]));

    let bad_json = Request::builder()
        .method("POST")
        .uri("/api/recording/start")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"error": {"name": "NotAllowedError""#))
        .unwrap();
    let (status, _) = send(&app, bad_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let wrong_shape = json_request(
        "POST",
        "/api/recording/start",
        json!({ "error": "NotAllowedError" }),
    );
    let (status, _) = send(&app, wrong_shape).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let not_json = Request::builder()
        .method("POST")
        .uri("/api/recording/start")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("NotAllowedError"))
        .unwrap();
    let (status, body) = send(&app, not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");

    assert!(!state.microphone.is_in_use());
    let (_, recording) = send(&app, empty_request("GET", "/api/recording")).await;
    assert_eq!(recording["state"], "idle");
}
