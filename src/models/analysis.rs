//! Structured output of one interview analysis.
//!
//! Field names follow the JSON contract agreed with the external model, so
//! these types serialize in camelCase. Every field is required; a response
//! missing any of them fails to deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Interviewer,
    Candidate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionTurn {
    pub speaker: Speaker,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Traits scored 1-10. Values are kept exactly as returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityTraits {
    #[serde(rename = "type")]
    pub personality_type: String,
    pub leadership: f64,
    pub problem_solving: f64,
    pub emotional_control: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiscType {
    D,
    I,
    S,
    C,
}

impl DiscType {
    pub const ALL: [DiscType; 4] = [DiscType::D, DiscType::I, DiscType::S, DiscType::C];

    pub fn label(self) -> &'static str {
        match self {
            DiscType::D => "Dominance (D)",
            DiscType::I => "Influence (I)",
            DiscType::S => "Steadiness (S)",
            DiscType::C => "Compliance (C)",
        }
    }
}

/// DISC scores are independent 0-100 estimates; they need not sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscProfile {
    pub dominant_type: DiscType,
    pub d_score: f64,
    pub i_score: f64,
    pub s_score: f64,
    pub c_score: f64,
    pub analysis: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EyeContact {
    Good,
    Average,
    Poor,
    #[serde(rename = "Not Visible")]
    NotVisible,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Defensiveness {
    None,
    Low,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmotionAnalysis {
    pub nervousness: f64,
    pub confidence: f64,
    pub eye_contact: EyeContact,
    pub defensiveness: Defensiveness,
    pub behavioral_cues: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    /// Conversational order, never reordered or deduplicated.
    pub transcription: Vec<TranscriptionTurn>,
    pub key_skills: Vec<String>,
    pub red_flags: Vec<String>,
    pub personality: PersonalityTraits,
    pub disc_profile: DiscProfile,
    pub emotion_analysis: EmotionAnalysis,
    pub match_score: f64,
    pub recommendation: String,
    pub risk_level: RiskLevel,
    pub suggested_follow_up_questions: Vec<String>,
}
