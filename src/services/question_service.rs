use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::question::{FollowUpSuggestion, GeneratedQuestion};
use crate::services::ai_service::{
    parse_structured, GenerationRequest, GenerativeModel, ModelError, Part,
};

pub const QUESTION_COUNT: usize = 5;
pub const MIN_ANSWER_CHARS: usize = 5;
pub const QUESTION_THINKING_BUDGET: u32 = 1024;

/// A simulated answer is worth probing once it has some substance.
pub fn follow_up_enabled(answer: &str) -> bool {
    answer.trim().chars().count() >= MIN_ANSWER_CHARS
}

fn questions_schema(language: &str) -> JsonValue {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "question": { "type": "STRING", "description": format!("Interview question in {}", language) },
                "intent": { "type": "STRING", "description": format!("What the question is meant to reveal, in {}", language) }
            },
            "required": ["question", "intent"]
        }
    })
}

fn follow_up_schema(language: &str) -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "followUpQuestion": { "type": "STRING", "description": format!("Follow-up question in {}", language) },
            "explanation": { "type": "STRING", "description": format!("Why it should be asked, in {}", language) }
        },
        "required": ["followUpQuestion", "explanation"]
    })
}

#[derive(Clone)]
pub struct QuestionService {
    model: Arc<dyn GenerativeModel>,
    language: String,
}

impl QuestionService {
    pub fn new(model: Arc<dyn GenerativeModel>, language: String) -> Self {
        Self { model, language }
    }

    pub fn questions_request(
        &self,
        position: &str,
        experience_level: &str,
        skills: &str,
    ) -> GenerationRequest {
        let prompt = format!(
            r#"Write {QUESTION_COUNT} advanced behavioural and technical interview questions for the position {position} at experience level {experience_level}.
Focus on these skills: {skills}.

IMPORTANT: Use {language} for every question and explanation.
For each question explain its "intent": what the interviewer should be listening for.
The questions must be hard and designed to reveal real competence."#,
            language = self.language
        );
        GenerationRequest {
            parts: vec![Part::text(prompt)],
            response_schema: questions_schema(&self.language),
            thinking_budget: QUESTION_THINKING_BUDGET,
        }
    }

    pub fn follow_up_request(&self, question: &str, answer: &str) -> GenerationRequest {
        let prompt = format!(
            r#"The interviewer asked: "{question}"
The candidate answered: "{answer}"

The answer may be shallow, vague or missing specific detail (STAR method).

IMPORTANT: Use {language}.
Write one sharp, polite but probing follow-up question that digs into what is missing.
Explain why this follow-up needs to be asked."#,
            language = self.language
        );
        GenerationRequest {
            parts: vec![Part::text(prompt)],
            response_schema: follow_up_schema(&self.language),
            thinking_budget: QUESTION_THINKING_BUDGET,
        }
    }

    pub async fn generate_questions(
        &self,
        position: &str,
        experience_level: &str,
        skills: &str,
    ) -> Result<Vec<GeneratedQuestion>> {
        tracing::info!(position, experience_level, "Generating interview questions");
        let request = self.questions_request(position, experience_level, skills);
        let text = self.model.generate(&request).await.map_err(|e| {
            tracing::error!(error = ?e, "Question generation failed");
            Error::Generation(e)
        })?;

        let mut questions: Vec<GeneratedQuestion> =
            parse_structured(&text).map_err(Error::Generation)?;
        if questions.is_empty() {
            return Err(Error::Generation(ModelError::EmptyResponse));
        }
        if questions.len() != QUESTION_COUNT {
            tracing::warn!(
                returned = questions.len(),
                "Model returned an unexpected question count"
            );
        }
        questions.truncate(QUESTION_COUNT);
        Ok(questions)
    }

    pub async fn generate_follow_up(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<FollowUpSuggestion> {
        if !follow_up_enabled(answer) {
            return Err(Error::BadRequest(format!(
                "The simulated answer needs at least {} characters",
                MIN_ANSWER_CHARS
            )));
        }

        let request = self.follow_up_request(question, answer.trim());
        let text = self.model.generate(&request).await.map_err(|e| {
            tracing::error!(error = ?e, "Follow-up generation failed");
            Error::Generation(e)
        })?;
        parse_structured(&text).map_err(Error::Generation)
    }
}
