mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{json, Value as JsonValue};
use talent_insight::services::ai_service::Part;

fn questions(n: usize) -> String {
    let items: Vec<JsonValue> = (1..=n)
        .map(|i| json!({ "question": format!("Question {}", i), "intent": "Probe ownership" }))
        .collect();
    JsonValue::Array(items).to_string()
}

#[tokio::test]
async fn generates_five_questions() {
    let model = ScriptedModel::new(vec![Ok(questions(5))]);
    let (app, _) = app_with(model.clone());

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/questions/generate",
            json!({ "position": "UX Designer", "skills": "Figma, research" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let list = body["questions"].as_array().unwrap();
    assert_eq!(list.len(), 5);
    assert_eq!(list[0]["question"], "Question 1");
    assert_eq!(list[4]["intent"], "Probe ownership");

    let requests = model.requests.lock().unwrap();
    match &requests[0].parts[0] {
        Part::Text { text } => {
            assert!(text.contains("Mid-Level"));
            assert!(text.contains("English"));
        }
        other => panic!("expected prompt, got {:?}", other),
    }
}

#[tokio::test]
async fn unparseable_questions_are_an_error() {
    let model = ScriptedModel::new(vec![Ok("Here are some questions: ...".to_string())]);
    let (app, _) = app_with(model);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/questions/generate",
            json!({ "position": "Sales", "experience_level": "Junior", "skills": "CRM" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "generation_failed");
}

#[tokio::test]
async fn follow_up_requires_a_real_answer() {
    let model = ScriptedModel::new(vec![Ok(json!({
        "followUpQuestion": "What did you measure afterwards?",
        "explanation": "The answer gives no result."
    })
    .to_string())]);
    let (app, _) = app_with(model.clone());

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/questions/follow-up",
            json!({ "question": "Describe a failure.", "answer": " ok  " }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(model.request_count(), 0);

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/questions/follow-up",
            json!({ "question": "Describe a failure.", "answer": "We shipped late" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["followUpQuestion"], "What did you measure afterwards?");
    assert_eq!(model.request_count(), 1);
}
