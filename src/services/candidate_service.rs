//! Session-scoped candidate store. All mutations go through this service;
//! handlers only ever see clones.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::dto::interview_dto::CandidateForm;
use crate::error::{Error, Result};
use crate::models::analysis::AnalysisResult;
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::utils::time::today;

#[derive(Clone, Default)]
pub struct CandidateService {
    candidates: Arc<RwLock<Vec<Candidate>>>,
}

impl CandidateService {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Candidate>> {
        self.candidates.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Candidate>> {
        self.candidates.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds the committed record for a successful analysis.
    pub fn interviewed(
        form: &CandidateForm,
        cv_file_name: Option<String>,
        analysis: AnalysisResult,
    ) -> Candidate {
        Candidate {
            id: Uuid::new_v4(),
            name: form.name.trim().to_string(),
            position: form.position.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            experience_level: form.experience_level.clone(),
            status: CandidateStatus::Interviewed,
            applied_date: today(),
            cv_file_name,
            analysis: Some(analysis),
        }
    }

    /// Adds a record at the front of the list. Ids must be unique.
    pub fn insert(&self, candidate: Candidate) -> Result<Candidate> {
        let mut candidates = self.write();
        if candidates.iter().any(|c| c.id == candidate.id) {
            return Err(Error::Conflict(format!("Candidate {} already exists", candidate.id)));
        }
        candidates.insert(0, candidate.clone());
        tracing::info!(id = %candidate.id, status = ?candidate.status, "Candidate added");
        Ok(candidate)
    }

    /// Records a candidate that has not been through the analysis workflow.
    pub fn import(&self, form: &CandidateForm) -> Result<Candidate> {
        let candidate = Candidate {
            id: Uuid::new_v4(),
            name: form.name.trim().to_string(),
            position: form.position.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            experience_level: form.experience_level.clone(),
            status: CandidateStatus::Pending,
            applied_date: today(),
            cv_file_name: None,
            analysis: None,
        };
        self.insert(candidate)
    }

    pub fn list(&self) -> Vec<Candidate> {
        self.read().clone()
    }

    pub fn get(&self, id: Uuid) -> Option<Candidate> {
        self.read().iter().find(|c| c.id == id).cloned()
    }

    /// Removes exactly the matching record. Returns whether one existed.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut candidates = self.write();
        let before = candidates.len();
        candidates.retain(|c| c.id != id);
        let removed = candidates.len() != before;
        if removed {
            tracing::info!(%id, "Candidate removed");
        }
        removed
    }

    /// Manual recruiter decision on an interviewed candidate.
    pub fn update_status(&self, id: Uuid, status: CandidateStatus) -> Result<Candidate> {
        if !status.is_manual_target() {
            return Err(Error::BadRequest(format!(
                "Status {:?} is set by the analysis workflow, not by hand",
                status
            )));
        }

        let mut candidates = self.write();
        let candidate = candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;

        if !candidate.status.can_transition_to(status) {
            return Err(Error::Conflict(format!(
                "Cannot move candidate from {:?} to {:?}",
                candidate.status, status
            )));
        }
        candidate.status = status;
        tracing::info!(%id, ?status, "Candidate status updated");
        Ok(candidate.clone())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn form(name: &str) -> CandidateForm {
        CandidateForm {
            name: name.to_string(),
            position: "Engineer".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: String::new(),
            experience_level: "Junior".to_string(),
        }
    }

    #[test]
    fn imported_candidates_are_pending_and_newest_first() {
        let store = CandidateService::new();
        let a = store.import(&form("Ana")).unwrap();
        let b = store.import(&form("Ben")).unwrap();
        assert_eq!(a.status, CandidateStatus::Pending);
        assert!(a.analysis.is_none());

        let ids: Vec<Uuid> = store.list().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn ids_stay_unique() {
        let store = CandidateService::new();
        for i in 0..50 {
            store.import(&form(&format!("C{}", i))).unwrap();
        }
        let ids: HashSet<Uuid> = store.list().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), 50);

        let dup = store.list()[0].clone();
        assert!(matches!(store.insert(dup), Err(Error::Conflict(_))));
        assert_eq!(store.len(), 50);
    }

    #[test]
    fn remove_touches_only_the_target() {
        let store = CandidateService::new();
        let a = store.import(&form("Ana")).unwrap();
        let b = store.import(&form("Ben")).unwrap();

        assert!(store.remove(a.id));
        assert!(store.get(a.id).is_none());
        assert!(store.get(b.id).is_some());

        assert!(!store.remove(Uuid::new_v4()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn manual_status_only_from_interviewed() {
        let store = CandidateService::new();
        let pending = store.import(&form("Ana")).unwrap();
        assert!(matches!(
            store.update_status(pending.id, CandidateStatus::Hired),
            Err(Error::Conflict(_))
        ));
        assert!(matches!(
            store.update_status(pending.id, CandidateStatus::Interviewed),
            Err(Error::BadRequest(_))
        ));
        assert!(matches!(
            store.update_status(Uuid::new_v4(), CandidateStatus::Rejected),
            Err(Error::NotFound(_))
        ));
    }
}
