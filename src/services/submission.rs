use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counts interview submissions that are waiting on the model. The dashboard
/// shows these as "Analyzing" rows until they resolve either way.
#[derive(Clone, Debug, Default)]
pub struct SubmissionTracker {
    in_flight: Arc<AtomicUsize>,
}

impl SubmissionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SubmissionGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        SubmissionGuard {
            in_flight: self.in_flight.clone(),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

/// Drops the provisional entry on success, failure or cancellation alike.
#[must_use]
pub struct SubmissionGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}
