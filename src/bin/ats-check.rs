//! CLI binary for resume-ats.
//!
//! A thin shim over the library crate: stages the resume given on the command
//! line, drives a `Workflow` through one submission, and prints the report.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_ats::{
    ClientConfig, FileSource, RemoteFallback, ResultView, ScoreBand, StagedFile, SubmitOutcome,
    Workflow, WorkflowObserver, WorkflowState,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

fn band_colour(band: ScoreBand, s: &str) -> String {
    match band {
        ScoreBand::Strong => green(s),
        ScoreBand::Moderate => yellow(s),
        ScoreBand::Weak => red(s),
    }
}

// ── CLI observer using indicatif ─────────────────────────────────────────────

/// Shows a spinner for as long as the workflow is `Submitting`.
struct SpinnerObserver {
    bar: ProgressBar,
}

impl SpinnerObserver {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::hidden();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Analyzing");
        Arc::new(Self { bar })
    }
}

impl WorkflowObserver for SpinnerObserver {
    fn on_submit_start(&self, file_name: &str, has_job_description: bool) {
        self.bar.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.bar.set_message(if has_job_description {
            format!("{file_name} + job description")
        } else {
            file_name.to_string()
        });
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_submit_finish(&self, _outcome: &SubmitOutcome, _elapsed: Duration) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Score a resume against the default local service
  ats-check resume.pdf

  # Tailor keyword matching to a job posting
  ats-check resume.docx --job-description-file posting.txt

  # Inline job description, remote service
  ats-check cv.txt -j "Senior Rust engineer, Tokio, gRPC" \
      --backend-url https://ats.example.com

  # Machine-readable output
  ats-check resume.pdf --json > report.json

ENVIRONMENT VARIABLES:
  ATS_BACKEND_URL   Base URL of the analysis service (default http://localhost:8000)
  ATS_TIMEOUT       Request timeout in seconds
  RUST_LOG          Log filter, overrides -v / -q

EXIT STATUS:
  0  analysis succeeded
  1  analysis failed (validation, service error, or network error)
"#;

/// Score a resume with an ATS analysis service.
#[derive(Parser, Debug)]
#[command(
    name = "ats-check",
    version,
    about = "Score a resume with an ATS analysis service",
    long_about = "Upload a resume (PDF, DOCX, or TXT) to an ATS analysis service and print \
the score, issues, suggestions, and keyword coverage. Add a job description for tailored \
keyword matching.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Resume file (PDF, DOCX, or TXT).
    input: PathBuf,

    /// Job description text.
    #[arg(short, long, conflicts_with = "job_description_file")]
    job_description: Option<String>,

    /// Read the job description from a file.
    #[arg(long)]
    job_description_file: Option<PathBuf>,

    /// Base URL of the analysis service.
    #[arg(long, env = "ATS_BACKEND_URL", default_value = "http://localhost:8000")]
    backend_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "ATS_TIMEOUT", default_value_t = 60,
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Wait for the service indefinitely.
    #[arg(long)]
    no_timeout: bool,

    /// Generic message for failed responses without a detail: analyze, upload.
    #[arg(long, value_enum, default_value = "analyze")]
    fallback: FallbackArg,

    /// Output the analysis result as JSON.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except the report and errors.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum FallbackArg {
    Analyze,
    Upload,
}

impl From<FallbackArg> for RemoteFallback {
    fn from(v: FallbackArg) -> Self {
        match v {
            FallbackArg::Analyze => RemoteFallback::Analyze,
            FallbackArg::Upload => RemoteFallback::Upload,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers the wait, so keep library INFO logs out of its way.
    let show_spinner = !cli.quiet && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_spinner {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build workflow ───────────────────────────────────────────────────
    let config = build_config(&cli)?;
    let mut workflow = Workflow::from_config(config).context("Failed to create HTTP client")?;
    if show_spinner {
        workflow = workflow.with_observer(SpinnerObserver::new());
    }

    let resume = StagedFile::from_path(&cli.input)
        .await
        .context("Failed to stage resume")?;
    if !resume.kind().is_accepted() && !cli.quiet {
        eprintln!(
            "{} '{}' is not a PDF, DOCX, or TXT file; the service may reject it",
            yellow("⚠"),
            resume.name()
        );
    }
    workflow.select_file(FileSource::Picker(vec![resume]));

    if let Some(text) = job_description(&cli).await? {
        workflow.set_job_description(text);
    }

    // ── Submit, abandoning on Ctrl-C ─────────────────────────────────────
    let outcome = tokio::select! {
        outcome = workflow.submit() => outcome,
        _ = tokio::signal::ctrl_c() => {
            workflow.dispose();
            eprintln!("{} interrupted", red("✘"));
            return Ok(ExitCode::from(130));
        }
    };
    tracing::debug!("Submit outcome: {:?}", outcome);

    // ── Report ───────────────────────────────────────────────────────────
    match workflow.state() {
        WorkflowState::Succeeded(result) => {
            if cli.json {
                let json = serde_json::to_string_pretty(&result)
                    .context("Failed to serialise result")?;
                println!("{json}");
            } else {
                print_report(&ResultView::new(&result));
            }
            Ok(ExitCode::SUCCESS)
        }
        WorkflowState::Failed(message) => {
            eprintln!("{} {}", red("✘"), message);
            Ok(ExitCode::FAILURE)
        }
        other => {
            eprintln!("{} analysis did not complete ({})", red("✘"), other.name());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli) -> Result<ClientConfig> {
    let mut builder = ClientConfig::builder()
        .base_url(&cli.backend_url)
        .remote_fallback(cli.fallback.clone().into());
    builder = if cli.no_timeout {
        builder.no_timeout()
    } else {
        builder.timeout_secs(cli.timeout)
    };
    builder.build().context("Invalid configuration")
}

async fn job_description(cli: &Cli) -> Result<Option<String>> {
    if let Some(ref path) = cli.job_description_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {:?}", path))?;
        return Ok(Some(text));
    }
    Ok(cli.job_description.clone())
}

fn print_report(view: &ResultView<'_>) {
    let result = view.result();
    let band = view.score_band();

    println!(
        "{}  {}",
        bold(&band_colour(band, &format!("{}/100", result.score))),
        dim(&format!("({band})"))
    );
    if !result.summary.is_empty() {
        println!("{}", result.summary);
    }

    let breakdown = view.breakdown_rows();
    if !breakdown.is_empty() {
        println!("\n{}", bold("Breakdown"));
        for row in breakdown {
            println!("  {row}");
        }
    }

    println!("\n{}", bold("Issues"));
    for line in view.issue_lines() {
        println!("  • {line}");
    }

    println!("\n{}", bold("Suggestions"));
    for line in view.suggestion_lines() {
        println!("  • {line}");
    }

    if let Some(hits) = view.job_keyword_coverage() {
        println!("\n{}", bold("Job keyword coverage"));
        let line: Vec<String> = hits
            .iter()
            .map(|h| if h.matched { green(&h.keyword) } else { dim(&h.keyword) })
            .collect();
        println!("  {}", line.join("  "));
    } else {
        println!("\n{}", bold("Keywords found"));
        println!("  {}", view.keywords_found_lines().join(", "));
        println!("\n{}", bold("Missing keywords"));
        println!("  {}", view.keywords_missing_lines().join(", "));
    }
    if let Some(coverage) = view.keyword_coverage() {
        println!("  {}", dim(&format!("{:.0}% coverage", coverage * 100.0)));
    }

    println!("\n{}", bold("Quick facts"));
    match &result.details {
        Some(details) => {
            println!("  Words:           {}", details.word_count);
            println!("  Bullets:         {}", details.bullets);
            println!("  Sections found:  {}", view.sections_found_count());
            if let Some(ref ft) = result.filetype {
                println!("  Filetype:        {ft}");
            }
            let contact: Vec<String> = view
                .contact_signals()
                .into_iter()
                .map(|(name, present)| if present { green(name) } else { dim(name) })
                .collect();
            if !contact.is_empty() {
                println!("  Contact:         {}", contact.join("  "));
            }
        }
        None => {
            println!("  Words:           {}", result.word_count);
            println!("  Est. pages:      {}", result.estimated_pages);
            println!("  Readability:     {}", view.readability().label());
        }
    }
}
