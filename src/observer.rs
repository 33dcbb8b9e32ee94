//! Observer trait for workflow events.
//!
//! Attach an [`Arc<dyn WorkflowObserver>`] with
//! [`crate::workflow::Workflow::with_observer`] to follow the workflow from a
//! view layer: repaint on every state change, show a spinner while a request
//! is in flight.
//!
//! # Example
//!
//! ```rust
//! use resume_ats::{WorkflowObserver, WorkflowState};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! struct Repaints(AtomicUsize);
//!
//! impl WorkflowObserver for Repaints {
//!     fn on_state_change(&self, _state: &WorkflowState) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//! ```

use crate::workflow::{SubmitOutcome, WorkflowState};
use std::sync::Arc;
use std::time::Duration;

/// Called by a workflow as its state changes.
///
/// All methods default to no-ops. Callbacks run after the workflow has
/// released its internal lock, so an observer may query the workflow.
pub trait WorkflowObserver: Send + Sync {
    /// Called after every state transition with the new state.
    fn on_state_change(&self, state: &WorkflowState) {
        let _ = state;
    }

    /// Called just before the request is dispatched.
    ///
    /// # Arguments
    /// * `file_name`           — staged resume name
    /// * `has_job_description` — whether a `job_description` part is sent
    fn on_submit_start(&self, file_name: &str, has_job_description: bool) {
        let _ = (file_name, has_job_description);
    }

    /// Called once the submission resolves, whatever the outcome.
    fn on_submit_finish(&self, outcome: &SubmitOutcome, elapsed: Duration) {
        let _ = (outcome, elapsed);
    }
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl WorkflowObserver for NoopObserver {}

/// Convenience alias for a shared observer.
pub type SharedObserver = Arc<dyn WorkflowObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        states: Mutex<Vec<String>>,
        starts: Mutex<Vec<(String, bool)>>,
    }

    impl WorkflowObserver for Recorder {
        fn on_state_change(&self, state: &WorkflowState) {
            self.states.lock().unwrap().push(state.name().to_string());
        }

        fn on_submit_start(&self, file_name: &str, has_job_description: bool) {
            self.starts
                .lock()
                .unwrap()
                .push((file_name.to_string(), has_job_description));
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopObserver;
        obs.on_state_change(&WorkflowState::Idle);
        obs.on_submit_start("cv.pdf", false);
        obs.on_submit_finish(&SubmitOutcome::AlreadyInFlight, Duration::ZERO);
    }

    #[test]
    fn recorder_receives_events() {
        let rec = Recorder::default();
        rec.on_state_change(&WorkflowState::Idle);
        rec.on_state_change(&WorkflowState::Submitting);
        rec.on_submit_start("cv.pdf", true);

        assert_eq!(*rec.states.lock().unwrap(), vec!["idle", "submitting"]);
        assert_eq!(
            *rec.starts.lock().unwrap(),
            vec![("cv.pdf".to_string(), true)]
        );
    }

    #[test]
    fn arc_dyn_observer_works() {
        let obs: SharedObserver = Arc::new(NoopObserver);
        obs.on_state_change(&WorkflowState::Failed("x".into()));
    }
}
