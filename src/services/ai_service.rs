use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use url::Url;

use crate::services::capture_service::EncodedMedia;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("no response from the model")]
    EmptyResponse,

    #[error("response does not match the expected schema: {0}")]
    Malformed(String),
}

/// One piece of multimodal content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn media(media: &EncodedMedia) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: media.mime_type.clone(),
                data: media.data.clone(),
            },
        }
    }
}

/// A structured-output request: content parts plus the JSON shape the answer
/// must take.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub parts: Vec<Part>,
    pub response_schema: JsonValue,
    pub thinking_budget: u32,
}

/// Boundary to the external generative model. Returns the raw response text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError>;
}

/// Parses model text against the declared shape. Tolerates a markdown code
/// fence around the JSON; anything else that does not deserialize is
/// rejected whole.
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, ModelError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ModelError::EmptyResponse);
    }
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);
    serde_json::from_str(body).map_err(|e| ModelError::Malformed(e.to_string()))
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: Url,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, base_url: Url, client: Client) -> Self {
        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.as_str().trim_end_matches('/'),
            self.model
        )
    }

    fn payload(request: &GenerationRequest) -> JsonValue {
        serde_json::json!({
            "contents": [
                { "role": "user", "parts": request.parts }
            ],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
                "thinkingConfig": { "thinkingBudget": request.thinking_budget }
            }
        })
    }
}

#[derive(Deserialize)]
struct RespPart {
    text: Option<String>,
    #[serde(default)]
    thought: bool,
}

#[derive(Deserialize)]
struct RespContent {
    #[serde(default)]
    parts: Vec<RespPart>,
}

#[derive(Deserialize)]
struct RespCandidate {
    content: Option<RespContent>,
}

#[derive(Deserialize)]
struct Resp {
    #[serde(default)]
    candidates: Vec<RespCandidate>,
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, ModelError> {
        let res = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&Self::payload(request))
            .timeout(Duration::from_secs(300))
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            tracing::error!(status, "Gemini API returned an error");
            return Err(ModelError::Api { status, body });
        }

        let body: Resp = res
            .json()
            .await
            .map_err(|e| ModelError::Malformed(e.to_string()))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter(|p| !p.thought)
                    .filter_map(|p| p.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(text)
    }
}
