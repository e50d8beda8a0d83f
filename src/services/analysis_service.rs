use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::analysis::AnalysisResult;
use crate::services::ai_service::{parse_structured, GenerationRequest, GenerativeModel, Part};
use crate::services::capture_service::EncodedMedia;

pub const ANALYSIS_THINKING_BUDGET: u32 = 4096;

pub struct AnalysisInput<'a> {
    pub candidate_name: &'a str,
    pub position: &'a str,
    pub media: &'a EncodedMedia,
    pub cv: Option<&'a EncodedMedia>,
}

pub fn build_prompt(candidate_name: &str, position: &str, language: &str, has_cv: bool) -> String {
    let mut prompt = format!(
        r#"You are an expert HR interview analyst specialising in behavioural psychology and DISC profiling.
Analyse this interview recording for the candidate {candidate_name}, who is applying for the position of {position}.

IMPORTANT: Write every free-text output (summary, transcription, analysis, recommendation, cues, questions) in {language}.
Keep enumerated values exactly as listed in English so the system can read them: 'Low', 'Medium', 'High', 'Good', 'Average', 'Poor', 'Not Visible', 'None', 'D', 'I', 'S', 'C', 'Interviewer', 'Candidate'.

Your tasks:
1. Transcribe the key parts of the conversation.
2. Summarise the candidate's answers.
3. Emotion and video analysis: read the visual and audio cues. Detect nervousness, confidence, eye-contact quality and defensive body language.
4. DISC analysis: from communication style, intonation and word choice, determine the DISC profile (Dominance, Influence, Steadiness, Compliance). Estimate a 0-100 score for each dimension.
5. Analyse general personality traits.
6. Identify the main hard and soft skills. If a CV is attached, check the claims in the CV against the interview answers.
7. Detect red flags (inconsistencies, defensiveness, lack of detail).
8. Missed opportunities: list the follow-up questions the interviewer should have asked.
9. Give a match score (0-100) and a risk level.

Return the result as strictly structured JSON matching the declared schema."#
    );

    if has_cv {
        prompt.push_str(
            "\n\nNOTE: The candidate's CV is attached. Use it to verify technical background and experience, \
             but treat the AUDIO/VIDEO RECORDING as the primary source for the personality and DISC analysis.",
        );
    }
    prompt
}

fn string_list(description: Option<&str>) -> JsonValue {
    let mut schema = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    if let Some(d) = description {
        schema["description"] = json!(d);
    }
    schema
}

/// Output shape declared to the model. Every top-level field is required.
pub fn analysis_schema(language: &str) -> JsonValue {
    let in_language = |what: &str| format!("{} in {}", what, language);
    let cues = in_language("Specific observations");
    let missed_questions = in_language("3-5 follow-up questions the interviewer should have asked");
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING", "description": in_language("Summary of the candidate's performance") },
            "transcription": {
                "type": "ARRAY",
                "description": "Transcription or summary of the key dialogue, in conversational order.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "speaker": { "type": "STRING", "enum": ["Interviewer", "Candidate"] },
                        "text": { "type": "STRING" }
                    },
                    "required": ["speaker", "text"]
                }
            },
            "keySkills": string_list(None),
            "redFlags": string_list(None),
            "personality": {
                "type": "OBJECT",
                "properties": {
                    "type": { "type": "STRING", "description": in_language("Personality label (e.g. Analytical, Dominant, Expressive)") },
                    "leadership": { "type": "NUMBER", "description": "Score 1-10" },
                    "problemSolving": { "type": "NUMBER", "description": "Score 1-10" },
                    "emotionalControl": { "type": "NUMBER", "description": "Score 1-10" },
                    "confidence": { "type": "NUMBER", "description": "Score 1-10" }
                },
                "required": ["type", "leadership", "problemSolving", "emotionalControl", "confidence"]
            },
            "discProfile": {
                "type": "OBJECT",
                "properties": {
                    "dominantType": { "type": "STRING", "enum": ["D", "I", "S", "C"] },
                    "dScore": { "type": "NUMBER", "description": "Dominance score 0-100" },
                    "iScore": { "type": "NUMBER", "description": "Influence score 0-100" },
                    "sScore": { "type": "NUMBER", "description": "Steadiness score 0-100" },
                    "cScore": { "type": "NUMBER", "description": "Compliance score 0-100" },
                    "analysis": { "type": "STRING", "description": in_language("Short analysis of the DISC profile") }
                },
                "required": ["dominantType", "dScore", "iScore", "sScore", "cScore", "analysis"]
            },
            "emotionAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "nervousness": { "type": "NUMBER", "description": "Score 1-10 (10 = very nervous)" },
                    "confidence": { "type": "NUMBER", "description": "Score 1-10 from visual/audio cues" },
                    "eyeContact": { "type": "STRING", "enum": ["Good", "Average", "Poor", "Not Visible"] },
                    "defensiveness": { "type": "STRING", "enum": ["None", "Low", "High"] },
                    "behavioralCues": string_list(Some(cues.as_str()))
                },
                "required": ["nervousness", "confidence", "eyeContact", "defensiveness", "behavioralCues"]
            },
            "matchScore": { "type": "NUMBER", "description": "Match percentage 0-100" },
            "recommendation": { "type": "STRING", "description": in_language("Final hiring recommendation") },
            "riskLevel": { "type": "STRING", "enum": ["Low", "Medium", "High"] },
            "suggestedFollowUpQuestions": string_list(Some(missed_questions.as_str()))
        },
        "required": [
            "summary", "transcription", "keySkills", "redFlags", "personality", "discProfile",
            "emotionAnalysis", "matchScore", "recommendation", "riskLevel", "suggestedFollowUpQuestions"
        ]
    })
}

/// Résumé part (if any), then the interview media, then the instruction.
pub fn build_analysis_request(input: &AnalysisInput<'_>, language: &str) -> GenerationRequest {
    let mut parts = Vec::with_capacity(3);
    if let Some(cv) = input.cv {
        parts.push(Part::media(cv));
    }
    parts.push(Part::media(input.media));
    parts.push(Part::text(build_prompt(
        input.candidate_name,
        input.position,
        language,
        input.cv.is_some(),
    )));

    GenerationRequest {
        parts,
        response_schema: analysis_schema(language),
        thinking_budget: ANALYSIS_THINKING_BUDGET,
    }
}

#[derive(Clone)]
pub struct AnalysisService {
    model: Arc<dyn GenerativeModel>,
    language: String,
}

impl AnalysisService {
    pub fn new(model: Arc<dyn GenerativeModel>, language: String) -> Self {
        Self { model, language }
    }

    /// Runs one analysis. Transport, empty and non-conforming responses all
    /// surface as `Error::Analysis`; nothing is retried.
    pub async fn analyze(&self, input: AnalysisInput<'_>) -> Result<AnalysisResult> {
        let request = build_analysis_request(&input, &self.language);
        tracing::info!(
            candidate = input.candidate_name,
            position = input.position,
            with_cv = input.cv.is_some(),
            "Sending interview for analysis"
        );

        let text = self.model.generate(&request).await.map_err(|e| {
            tracing::error!(error = ?e, "Interview analysis request failed");
            Error::Analysis(e)
        })?;

        let result: AnalysisResult = parse_structured(&text).map_err(|e| {
            tracing::error!(error = ?e, "Interview analysis response rejected");
            Error::Analysis(e)
        })?;

        tracing::info!(
            match_score = result.match_score,
            risk = ?result.risk_level,
            disc = ?result.disc_profile.dominant_type,
            "Interview analysis complete"
        );
        Ok(result)
    }
}
