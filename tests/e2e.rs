//! End-to-end tests against a live analysis service.
//!
//! Gated behind the `ATS_E2E_URL` environment variable so they do not run in
//! CI unless explicitly requested.
//!
//! Run with:
//!   ATS_E2E_URL=http://localhost:8000 cargo test --test e2e -- --nocapture

use resume_ats::{ClientConfig, FileSource, ResultView, StagedFile, Workflow, WorkflowState};

/// Skip this test unless ATS_E2E_URL is set; evaluates to the base URL.
macro_rules! e2e_base_url {
    () => {{
        match std::env::var("ATS_E2E_URL") {
            Ok(url) => url,
            Err(_) => {
                println!("SKIP — set ATS_E2E_URL=<base url> to run e2e tests");
                return;
            }
        }
    }};
}

fn live_workflow(base_url: &str) -> Workflow {
    let config = ClientConfig::builder()
        .base_url(base_url)
        .timeout_secs(120)
        .build()
        .expect("valid config");
    Workflow::from_config(config).expect("client builds")
}

const RESUME: &str = "Jane Doe\n\
jane.doe@example.com | +1 555 0100 | linkedin.com/in/janedoe\n\n\
EXPERIENCE\n\
- Built a Rust ingestion service handling 40k events/s with Tokio\n\
- Cut PostgreSQL query latency by 60% through index redesign\n\n\
EDUCATION\n\
BSc Computer Science, 2018\n\n\
SKILLS\n\
Rust, Tokio, PostgreSQL, Docker, Kubernetes\n";

#[tokio::test]
async fn test_live_plain_text_resume() {
    let base = e2e_base_url!();
    let wf = live_workflow(&base);
    wf.select_file(FileSource::Picker(vec![StagedFile::from_bytes(
        "resume.txt",
        RESUME.as_bytes().to_vec(),
    )]));

    wf.submit().await;

    match wf.state() {
        WorkflowState::Succeeded(result) => {
            assert!(result.score <= 100);
            let view = ResultView::new(&result);
            println!(
                "score {} ({}), {} issues, {} suggestions",
                result.score,
                view.score_band(),
                view.issue_lines().len(),
                view.suggestion_lines().len()
            );
        }
        other => panic!("expected Succeeded, got {other:?}"),
    }
}

#[tokio::test]
async fn test_live_with_job_description() {
    let base = e2e_base_url!();
    let wf = live_workflow(&base);
    wf.select_file(FileSource::Picker(vec![StagedFile::from_bytes(
        "resume.txt",
        RESUME.as_bytes().to_vec(),
    )]));
    wf.set_job_description("Senior Rust engineer. Tokio, PostgreSQL, Kafka, AWS.");

    wf.submit().await;

    let state = wf.state();
    let result = state.result().expect("analysis succeeded");
    if let Some(coverage) = ResultView::new(result).keyword_coverage() {
        assert!((0.0..=1.0).contains(&coverage));
        println!("keyword coverage {:.0}%", coverage * 100.0);
    }
}

#[tokio::test]
async fn test_live_rejects_unsupported_file() {
    let base = e2e_base_url!();
    let wf = live_workflow(&base);
    wf.select_file(FileSource::Picker(vec![StagedFile::from_bytes(
        "photo.png",
        vec![0x89, b'P', b'N', b'G'],
    )]));

    wf.submit().await;

    // The service is authoritative on formats; any outcome other than a
    // stuck submission is acceptable, but a rejection must carry a message.
    match wf.state() {
        WorkflowState::Failed(message) => assert!(!message.is_empty()),
        WorkflowState::Succeeded(_) => println!("service accepted a PNG"),
        other => panic!("unexpected state {other:?}"),
    }
}
