//! # resume-ats
//!
//! Client for an ATS resume analysis service: stage a resume (and optionally
//! a job description), submit it, and present the returned score, issues,
//! suggestions, and keyword coverage.
//!
//! The scoring itself happens remotely behind `POST /api/analyze`. This crate
//! owns everything on the client side of that call.
//!
//! ## Workflow Overview
//!
//! ```text
//! picker / drop
//!  │
//!  ├─ 1. Stage    first file wins, job description kept verbatim
//!  ├─ 2. Submit   multipart: `file` + trimmed `job_description` (if any)
//!  ├─ 3. Await    single request, cancellable, optional timeout
//!  ├─ 4. Check    JSON parse + range validation of the result
//!  └─ 5. Present  score band, readability, placeholders, coverage
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use resume_ats::{ClientConfig, FileSource, ResultView, StagedFile, Workflow, WorkflowState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://localhost:8000")
//!         .build()?;
//!     let workflow = Workflow::from_config(config)?;
//!
//!     let resume = StagedFile::from_path("resume.pdf").await?;
//!     workflow.select_file(FileSource::Picker(vec![resume]));
//!     workflow.set_job_description("Senior Rust engineer, Tokio, PostgreSQL");
//!     workflow.submit().await;
//!
//!     match workflow.state() {
//!         WorkflowState::Succeeded(result) => {
//!             let view = ResultView::new(&result);
//!             println!("{} ({})", result.score, view.score_band());
//!         }
//!         WorkflowState::Failed(message) => eprintln!("{message}"),
//!         _ => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ats-check` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod error;
pub mod input;
pub mod observer;
pub mod presenter;
pub mod request;
pub mod result;
pub mod workflow;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{AnalysisBackend, HttpBackend};
pub use config::{ClientConfig, ClientConfigBuilder, RemoteFallback};
pub use error::AnalyzeError;
pub use input::{DragEvent, DropZone, FileKind, FileSource, StagedFile, ACCEPT_LIST};
pub use observer::{NoopObserver, SharedObserver, WorkflowObserver};
pub use presenter::{KeywordHit, Readability, ResultView, ScoreBand};
pub use request::AnalysisRequest;
pub use result::{AnalysisDetails, AnalysisResult};
pub use workflow::{SubmitOutcome, Workflow, WorkflowState};
