#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use talent_insight::{
    routes::api_router,
    services::ai_service::{GenerationRequest, GenerativeModel, ModelError},
    AppState,
};
use tower::ServiceExt;

pub const BOUNDARY: &str = "talent-insight-boundary";

/// Model double that replays queued replies in order and keeps every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, ModelError>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<String, ModelError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ModelError::EmptyResponse))
    }
}

pub fn app_with(model: Arc<ScriptedModel>) -> (Router, AppState) {
    let state = AppState::with_model(model, "English".to_string());
    let app = api_router(100).with_state(state.clone());
    (app, state)
}

pub fn analysis_json(match_score: u32, risk: &str, disc: &str) -> String {
    json!({
        "summary": "Structured, concrete answers.",
        "transcription": [
            { "speaker": "Interviewer", "text": "Tell me about yourself." },
            { "speaker": "Candidate", "text": "I build data pipelines.", "timestamp": "00:05" }
        ],
        "keySkills": ["SQL", "Python"],
        "redFlags": [],
        "personality": {
            "type": "Analytical", "leadership": 6, "problemSolving": 9,
            "emotionalControl": 8, "confidence": 7
        },
        "discProfile": {
            "dominantType": disc, "dScore": 30, "iScore": 25, "sScore": 55, "cScore": 85,
            "analysis": "Detail oriented."
        },
        "emotionAnalysis": {
            "nervousness": 3, "confidence": 8, "eyeContact": "Not Visible",
            "defensiveness": "None", "behavioralCues": ["steady pace"]
        },
        "matchScore": match_score,
        "recommendation": "Proceed to the final round.",
        "riskLevel": risk,
        "suggestedFollowUpQuestions": ["Which warehouse did you use?"]
    })
    .to_string()
}

pub fn multipart_body(field: &str, file_name: &str, mime: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn multipart_request(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, JsonValue) {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}

pub fn candidate_form(name: &str) -> JsonValue {
    json!({
        "name": name,
        "position": "Data Engineer",
        "email": "candidate@example.com",
        "phone": "+62 812 0000 0000",
        "experience_level": "Senior"
    })
}
