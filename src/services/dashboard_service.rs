use std::collections::BTreeMap;

use crate::dto::dashboard_dto::{DashboardStats, DiscSlice, ScorePoint};
use crate::models::analysis::DiscType;
use crate::models::candidate::{Candidate, CandidateStatus};

/// Aggregates the store. `analyzing` is the number of submissions still
/// waiting on the model; those have no record yet.
pub fn compute_stats(candidates: &[Candidate], analyzing: usize) -> DashboardStats {
    let total = candidates.len();
    let hired = count_status(candidates, CandidateStatus::Hired);
    let rejected = count_status(candidates, CandidateStatus::Rejected);
    let interviewed = candidates
        .iter()
        .filter(|c| c.status.is_interviewed())
        .count();

    let analyzed: Vec<(&Candidate, f64)> = candidates
        .iter()
        .filter_map(|c| c.analysis.as_ref().map(|a| (c, a.match_score)))
        .collect();

    let avg_score = if analyzed.is_empty() {
        0
    } else {
        let sum: f64 = analyzed.iter().map(|(_, score)| score).sum();
        (sum / analyzed.len() as f64).round() as i64
    };

    let mut disc_counts: BTreeMap<DiscType, usize> = BTreeMap::new();
    for candidate in candidates {
        if let Some(analysis) = &candidate.analysis {
            *disc_counts.entry(analysis.disc_profile.dominant_type).or_default() += 1;
        }
    }

    let disc_distribution = DiscType::ALL
        .iter()
        .filter_map(|t| {
            disc_counts.get(t).map(|&count| DiscSlice {
                disc_type: *t,
                label: t.label().to_string(),
                count,
            })
        })
        .collect();

    let scores = analyzed
        .iter()
        .map(|(c, score)| ScorePoint {
            name: c.name.split_whitespace().next().unwrap_or_default().to_string(),
            score: *score,
        })
        .collect();

    DashboardStats {
        total_candidates: total,
        interviewed,
        hired,
        rejected,
        pending: total - interviewed,
        in_review: interviewed - hired - rejected,
        analyzing,
        avg_score,
        disc_distribution,
        scores,
    }
}

fn count_status(candidates: &[Candidate], status: CandidateStatus) -> usize {
    candidates.iter().filter(|c| c.status == status).count()
}
