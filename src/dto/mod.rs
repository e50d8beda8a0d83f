pub mod dashboard_dto;
pub mod interview_dto;
pub mod question_dto;
