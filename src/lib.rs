pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    ai_service::{GeminiClient, GenerativeModel},
    analysis_service::AnalysisService,
    candidate_service::CandidateService,
    capture_service::CaptureWorkflow,
    question_service::QuestionService,
    recording_service::ClientMicrophone,
    submission::SubmissionTracker,
};
use reqwest::Client;

#[derive(Clone)]
pub struct AppState {
    pub candidate_service: CandidateService,
    pub analysis_service: AnalysisService,
    pub question_service: QuestionService,
    pub capture: Arc<Mutex<CaptureWorkflow>>,
    pub microphone: ClientMicrophone,
    pub submissions: SubmissionTracker,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        let model = GeminiClient::new(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            http_client,
        );
        Ok(Self::with_model(Arc::new(model), config.output_language.clone()))
    }

    /// State around an arbitrary model backend.
    pub fn with_model(model: Arc<dyn GenerativeModel>, output_language: String) -> Self {
        Self {
            candidate_service: CandidateService::new(),
            analysis_service: AnalysisService::new(model.clone(), output_language.clone()),
            question_service: QuestionService::new(model, output_language),
            capture: Arc::new(Mutex::new(CaptureWorkflow::new())),
            microphone: ClientMicrophone::new(),
            submissions: SubmissionTracker::new(),
        }
    }

    /// Never hold the returned guard across an `.await`.
    pub fn capture(&self) -> MutexGuard<'_, CaptureWorkflow> {
        self.capture.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
