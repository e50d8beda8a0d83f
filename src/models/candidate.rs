use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateStatus {
    Pending,
    Analyzing,
    Interviewed,
    Hired,
    Rejected,
}

impl CandidateStatus {
    /// Allowed edges of the status state machine.
    pub fn can_transition_to(self, next: CandidateStatus) -> bool {
        use CandidateStatus::*;
        matches!(
            (self, next),
            (Pending, Analyzing)
                | (Analyzing, Interviewed)
                | (Interviewed, Hired)
                | (Interviewed, Rejected)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CandidateStatus::Hired | CandidateStatus::Rejected)
    }

    /// Statuses a recruiter may set by hand. The rest belong to the
    /// analysis workflow.
    pub fn is_manual_target(self) -> bool {
        self.is_terminal()
    }

    /// Whether the candidate has been through an interview, whatever the outcome.
    pub fn is_interviewed(self) -> bool {
        matches!(
            self,
            CandidateStatus::Interviewed | CandidateStatus::Hired | CandidateStatus::Rejected
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub experience_level: String,
    pub status: CandidateStatus,
    pub applied_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
}
