pub mod ai_service;
pub mod analysis_service;
pub mod candidate_service;
pub mod capture_service;
pub mod dashboard_service;
pub mod question_service;
pub mod recording_service;
pub mod submission;
