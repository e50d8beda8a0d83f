use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::GeneratedQuestion;

fn default_experience_level() -> String {
    "Mid-Level".to_string()
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuestionsPayload {
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
    #[validate(length(min = 1, message = "Skills are required"))]
    pub skills: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuestionsResponse {
    pub questions: Vec<GeneratedQuestion>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FollowUpPayload {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    pub answer: String,
}
