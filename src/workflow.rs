//! The analysis workflow: staging, submission, and the state machine.
//!
//! ```text
//!            select_file              submit
//!   Idle ───────────────▶ Ready ───────────────▶ Submitting
//!    ▲                     ▲  ▲                    │     │
//!    │      cancel / edit  │  │ select_file/cancel │     │
//!    └─────────────────────┘  └────────────────────┘     │
//!                                                        ▼
//!                         Succeeded(result) │ Failed(message)
//! ```
//!
//! A [`Workflow`] is a cheap, cloneable handle. Only one request may be in
//! flight: a `submit()` while [`WorkflowState::Submitting`] returns
//! [`SubmitOutcome::AlreadyInFlight`] without touching the network.
//!
//! Staging a file, cancelling, and disposing bump an epoch. A response whose
//! epoch is stale is dropped on the floor instead of overwriting the newer
//! state. Editing the job description mid-flight only updates the staged
//! text; the request already sent keeps the old text.
//!
//! A `submit()` future dropped before it resolves (a host-side timeout, a
//! losing `select!` branch, an aborted task) puts the workflow back into its
//! resting state.

use crate::client::{AnalysisBackend, HttpBackend};
use crate::config::ClientConfig;
use crate::error::AnalyzeError;
use crate::input::{FileSource, JobDescription, StagedInput};
use crate::observer::SharedObserver;
use crate::request::AnalysisRequest;
use crate::result::AnalysisResult;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

/// Where the workflow currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// Nothing staged.
    Idle,
    /// A file is staged and can be submitted.
    Ready {
        file_name: String,
        job_description: String,
    },
    /// A request is in flight.
    Submitting,
    Succeeded(AnalysisResult),
    Failed(String),
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Ready { .. } => "ready",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed(_) => "failed",
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            WorkflowState::Succeeded(r) => Some(r),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            WorkflowState::Failed(m) => Some(m),
            _ => None,
        }
    }
}

/// How a call to [`Workflow::submit`] ended.
#[derive(Debug)]
pub enum SubmitOutcome {
    Succeeded(AnalysisResult),
    Failed(AnalyzeError),
    /// Another submission was already running; nothing was sent.
    AlreadyInFlight,
    /// Cancelled, or the workflow was disposed.
    Cancelled,
    /// New input arrived while the request was in flight; its response was
    /// discarded.
    Superseded,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Interrupt {
    Cancelled,
    Superseded,
}

struct Inner {
    input: StagedInput,
    state: WorkflowState,
    epoch: u64,
    abort: Option<oneshot::Sender<()>>,
    last_interrupt: Option<Interrupt>,
    disposed: bool,
}

impl Inner {
    /// State to fall back to when no result or error is live.
    fn resting_state(&self) -> WorkflowState {
        match &self.input.file {
            Some(file) => WorkflowState::Ready {
                file_name: file.name().to_string(),
                job_description: self.input.job_description.raw().to_string(),
            },
            None => WorkflowState::Idle,
        }
    }

    /// Abort the in-flight request, if any, and invalidate its response.
    fn interrupt(&mut self, why: Interrupt) -> bool {
        self.epoch += 1;
        match self.abort.take() {
            Some(abort) => {
                self.last_interrupt = Some(why);
                let _ = abort.send(());
                true
            }
            None => false,
        }
    }
}

/// Restores the resting state when a `submit()` future is dropped mid-flight.
struct SubmitGuard<'a> {
    workflow: &'a Workflow,
    epoch: u64,
    armed: bool,
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let state = {
            let mut inner = self.workflow.lock();
            if inner.disposed || inner.epoch != self.epoch {
                return;
            }
            inner.abort = None;
            inner.state = inner.resting_state();
            inner.state.clone()
        };
        debug!("Submit future dropped before completion");
        self.workflow.notify(&state);
    }
}

/// One analysis session.
#[derive(Clone)]
pub struct Workflow {
    inner: Arc<Mutex<Inner>>,
    backend: Arc<dyn AnalysisBackend>,
    observer: Option<SharedObserver>,
}

impl std::fmt::Debug for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("Workflow")
            .field("state", &inner.state.name())
            .field("file", &inner.input.file_name())
            .field("epoch", &inner.epoch)
            .field("disposed", &inner.disposed)
            .finish()
    }
}

impl Workflow {
    /// Create a workflow that dispatches through `backend`.
    pub fn new(backend: Arc<dyn AnalysisBackend>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                input: StagedInput::default(),
                state: WorkflowState::Idle,
                epoch: 0,
                abort: None,
                last_interrupt: None,
                disposed: false,
            })),
            backend,
            observer: None,
        }
    }

    /// Create a workflow backed by HTTP with the given configuration.
    pub fn from_config(config: ClientConfig) -> Result<Self, AnalyzeError> {
        Ok(Self::new(Arc::new(HttpBackend::new(config)?)))
    }

    pub fn with_observer(mut self, observer: SharedObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, state: &WorkflowState) {
        debug!("Workflow state → {}", state.name());
        if let Some(obs) = &self.observer {
            obs.on_state_change(state);
        }
    }

    // ── Presentation boundary ────────────────────────────────────────────

    pub fn state(&self) -> WorkflowState {
        self.lock().state.clone()
    }

    pub fn staged_file_name(&self) -> Option<String> {
        self.lock().input.file_name().map(str::to_string)
    }

    /// The job description exactly as typed.
    pub fn job_description(&self) -> String {
        self.lock().input.job_description.raw().to_string()
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.lock().state, WorkflowState::Submitting)
    }

    /// Whether a submit trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        let inner = self.lock();
        !inner.disposed && !matches!(inner.state, WorkflowState::Submitting)
    }

    // ── Input stager ─────────────────────────────────────────────────────

    /// Stage the first file of a picker or drop event.
    ///
    /// A dismissed picker (no files) unstages the current file; an empty drop
    /// is ignored. Staging always clears any result or error and supersedes
    /// an in-flight request.
    pub fn select_file(&self, source: FileSource) {
        let is_drop = source.is_drop();
        let file = source.into_first();
        let state = {
            let mut inner = self.lock();
            if inner.disposed {
                return;
            }
            match file {
                Some(file) => {
                    info!("Staged resume '{}' ({} bytes)", file.name(), file.len());
                    inner.input.file = Some(file);
                }
                None if is_drop => return,
                None => inner.input.file = None,
            }
            if inner.interrupt(Interrupt::Superseded) {
                debug!("In-flight request superseded by new file");
            }
            inner.state = inner.resting_state();
            inner.state.clone()
        };
        self.notify(&state);
    }

    /// Replace the job description. Stored verbatim.
    ///
    /// While a request is in flight only the staged text changes; the next
    /// submission picks it up.
    pub fn set_job_description(&self, text: impl Into<String>) {
        let state = {
            let mut inner = self.lock();
            if inner.disposed {
                return;
            }
            inner.input.job_description = JobDescription::new(text);
            if matches!(inner.state, WorkflowState::Submitting) {
                return;
            }
            inner.state = inner.resting_state();
            inner.state.clone()
        };
        self.notify(&state);
    }

    // ── Submission controller ────────────────────────────────────────────

    /// Submit the staged resume for analysis.
    ///
    /// Never leaves the workflow in `Submitting`: when the call returns the
    /// state is `Succeeded`, `Failed`, or whatever newer input put it in. If
    /// the future is dropped first, the workflow goes back to `Ready`.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, epoch, abort_rx, state) = {
            let mut inner = self.lock();
            if inner.disposed {
                return SubmitOutcome::Cancelled;
            }
            if matches!(inner.state, WorkflowState::Submitting) {
                debug!("Submit ignored: request already in flight");
                return SubmitOutcome::AlreadyInFlight;
            }
            let Some(file) = inner.input.file.clone() else {
                let err = AnalyzeError::Validation;
                inner.state = WorkflowState::Failed(err.user_message());
                let state = inner.state.clone();
                drop(inner);
                warn!("Submit without a staged resume");
                self.notify(&state);
                return SubmitOutcome::Failed(err);
            };

            let request = AnalysisRequest::new(file, &inner.input.job_description);
            let (abort_tx, abort_rx) = oneshot::channel();
            inner.epoch += 1;
            inner.abort = Some(abort_tx);
            inner.last_interrupt = None;
            inner.state = WorkflowState::Submitting;
            (request, inner.epoch, abort_rx, inner.state.clone())
        };
        let mut guard = SubmitGuard {
            workflow: self,
            epoch,
            armed: true,
        };
        self.notify(&state);
        if let Some(obs) = &self.observer {
            obs.on_submit_start(request.file.name(), request.job_description.is_some());
        }

        let start = Instant::now();
        let response = tokio::select! {
            biased;
            _ = abort_rx => None,
            res = self.backend.analyze(request) => Some(res),
        };

        let (outcome, state) = {
            let mut inner = self.lock();
            if inner.disposed {
                (SubmitOutcome::Cancelled, None)
            } else if inner.epoch != epoch {
                let outcome = match inner.last_interrupt {
                    Some(Interrupt::Superseded) => SubmitOutcome::Superseded,
                    _ => SubmitOutcome::Cancelled,
                };
                (outcome, None)
            } else {
                inner.abort = None;
                match response {
                    Some(Ok(result)) => {
                        info!("Analysis complete: score {}", result.score);
                        inner.state = WorkflowState::Succeeded(result.clone());
                        (SubmitOutcome::Succeeded(result), Some(inner.state.clone()))
                    }
                    Some(Err(err)) => {
                        warn!("Analysis failed: {}", err);
                        inner.state = WorkflowState::Failed(err.user_message());
                        (SubmitOutcome::Failed(err), Some(inner.state.clone()))
                    }
                    None => {
                        inner.state = inner.resting_state();
                        (SubmitOutcome::Cancelled, Some(inner.state.clone()))
                    }
                }
            }
        };
        guard.armed = false;

        if let Some(state) = state {
            self.notify(&state);
        }
        if let Some(obs) = &self.observer {
            obs.on_submit_finish(&outcome, start.elapsed());
        }
        outcome
    }

    /// Abort the in-flight request and return to `Ready` (or `Idle`).
    ///
    /// Returns `false` when nothing was in flight.
    pub fn cancel(&self) -> bool {
        let state = {
            let mut inner = self.lock();
            if inner.disposed || !matches!(inner.state, WorkflowState::Submitting) {
                return false;
            }
            inner.interrupt(Interrupt::Cancelled);
            inner.state = inner.resting_state();
            inner.state.clone()
        };
        info!("Submission cancelled");
        self.notify(&state);
        true
    }

    /// Tear the workflow down. Any in-flight request is aborted and no later
    /// event or response changes the state.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        if inner.disposed {
            return;
        }
        inner.interrupt(Interrupt::Cancelled);
        inner.disposed = true;
        debug!("Workflow disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.lock().disposed
    }
}
