use serde::Serialize;

use crate::models::analysis::DiscType;

#[derive(Debug, Clone, Serialize)]
pub struct DiscSlice {
    #[serde(rename = "type")]
    pub disc_type: DiscType,
    pub label: String,
    pub count: usize,
}

/// One bar of the match-score chart.
#[derive(Debug, Clone, Serialize)]
pub struct ScorePoint {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_candidates: usize,
    pub interviewed: usize,
    pub hired: usize,
    pub rejected: usize,
    pub pending: usize,
    pub in_review: usize,
    pub analyzing: usize,
    pub avg_score: i64,
    pub disc_distribution: Vec<DiscSlice>,
    pub scores: Vec<ScorePoint>,
}
