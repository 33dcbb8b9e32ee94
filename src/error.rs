//! Error types for the resume-ats library.
//!
//! Every failure the analysis workflow can hit is one [`AnalyzeError`]. The
//! variants fall into three user-facing classes:
//!
//! * **Validation**: nothing staged at submit time. Handled locally, never
//!   reaches the network.
//! * **Remote**: the service answered with a non-2xx status. The message comes
//!   from the response's `detail` field when there is one.
//! * **Transport**: no usable response (DNS, refused connection, timeout,
//!   unparseable or schema-invalid body).
//!
//! Host-side variants ([`AnalyzeError::FileRead`], [`AnalyzeError::InvalidConfig`])
//! happen before a workflow exists and are returned directly to the caller.
//!
//! [`AnalyzeError::user_message`] is the exact text a workflow stores in
//! [`crate::workflow::WorkflowState::Failed`].

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when `submit()` is called with no staged file.
pub const NO_FILE_MESSAGE: &str = "Please upload a PDF, DOCX, or TXT resume.";

/// Last-resort message when a transport error carries no text.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong";

/// All errors returned by the resume-ats library.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    // ── Workflow errors ───────────────────────────────────────────────────
    /// `submit()` was called without a staged resume.
    #[error("{}", NO_FILE_MESSAGE)]
    Validation,

    /// The analysis service answered with a non-success status.
    #[error("{message}")]
    Remote { status: u16, message: String },

    /// The request never produced a response (connection, DNS, timeout).
    #[error("{message}")]
    Transport { message: String },

    /// A 2xx response whose body is not a valid analysis result.
    #[error("Invalid analysis response: {reason}")]
    InvalidResponse { reason: String },

    // ── Host errors ───────────────────────────────────────────────────────
    /// Could not read a resume from disk.
    #[error("Failed to read resume '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AnalyzeError {
    /// Build a transport error from any displayable cause.
    pub fn transport(cause: impl std::fmt::Display) -> Self {
        AnalyzeError::Transport {
            message: cause.to_string(),
        }
    }

    /// The text surfaced to the user in a `Failed` state.
    pub fn user_message(&self) -> String {
        match self {
            AnalyzeError::Transport { message } if message.trim().is_empty() => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
            other => other.to_string(),
        }
    }

    /// True for workflow failures a user can retry from the same workflow.
    /// Host-side errors are never recoverable this way.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalyzeError::Validation
                | AnalyzeError::Remote { .. }
                | AnalyzeError::Transport { .. }
                | AnalyzeError::InvalidResponse { .. }
        )
    }

    /// Whether this error is in the transport class (no usable response).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AnalyzeError::Transport { .. } | AnalyzeError::InvalidResponse { .. }
        )
    }
}
