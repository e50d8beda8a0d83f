use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::candidate::{Candidate, CandidateStatus};

pub const DEFAULT_EXPERIENCE_LEVEL: &str = "Junior";

fn default_experience_level() -> String {
    DEFAULT_EXPERIENCE_LEVEL.to_string()
}

/// Candidate details entered alongside the interview media.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_experience_level")]
    #[validate(length(min = 1))]
    pub experience_level: String,
}

impl CandidateForm {
    pub fn check(&self) -> crate::error::Result<()> {
        self.validate()?;
        if self.name.trim().is_empty() {
            return Err(crate::error::Error::BadRequest("Name is required".into()));
        }
        if self.position.trim().is_empty() {
            return Err(crate::error::Error::BadRequest("Position is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusPayload {
    pub status: CandidateStatus,
}

/// Microphone failure as reported by the client's media-device API.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceReport {
    pub name: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartRecordingPayload {
    pub error: Option<DeviceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitInterviewResponse {
    pub candidate: Candidate,
    pub source: crate::services::capture_service::MediaSource,
}

#[derive(Debug, Clone, Serialize)]
pub struct InFlightResponse {
    pub analyzing: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn form_defaults_and_validation() {
        let form: CandidateForm = serde_json::from_value(json!({
            "name": "Budi Santoso",
            "position": "Sales Manager",
            "email": "budi@example.com"
        }))
        .unwrap();
        assert_eq!(form.experience_level, "Junior");
        assert_eq!(form.phone, "");
        assert!(form.check().is_ok());

        let bad = CandidateForm {
            email: "not-an-email".into(),
            ..form.clone()
        };
        assert!(bad.check().is_err());

        let blank = CandidateForm {
            name: "   ".into(),
            ..form
        };
        assert!(blank.check().is_err());
    }
}
