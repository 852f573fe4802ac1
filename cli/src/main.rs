//! CLI for jira-issue-sync.
//!
//! Runs as a GitHub Action step: action inputs come from `INPUT_*` variables,
//! the pull request from the runner's event payload.

use clap::Parser;
use jira_issue_sync::{
    error_command, ActionInputs, PullRequestContext, RunSummary, Runner, RunnerConfig, RunnerError,
    SyncStatus, DEFAULT_API_URL,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Jira Issue Sync - Link a pull request to its Jira issue and mirror the issue's metadata.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the webhook event payload.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository in `owner/name` form.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Source branch of the pull request.
    #[arg(long, env = "GITHUB_HEAD_REF")]
    head_ref: Option<String>,

    /// Ref that triggered the workflow.
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: Option<String>,

    /// File receiving step outputs.
    #[arg(long, env = "GITHUB_OUTPUT")]
    output_path: Option<PathBuf>,

    /// GitHub REST API endpoint.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize tracing
    init_tracing();

    // Both reqwest and octocrab use rustls; pick the provider once for the process
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse arguments
    let args = Args::parse();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Sync failed");
            println!("{}", error_command(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output) on stderr, keeping stdout
///   free for workflow commands
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let inputs = ActionInputs::from_env()?;
    let context = PullRequestContext::from_runner(
        args.event_path.as_deref(),
        args.repository.as_deref(),
        args.head_ref.as_deref(),
        args.git_ref.as_deref(),
    )?;

    let mut config = RunnerConfig::new(inputs, context).with_github_api_url(args.api_url);
    if let Some(path) = args.output_path {
        config = config.with_output_path(path);
    }

    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    let outputs = &summary.outputs;
    println!("\nSummary:");
    println!("  Issue: {}", summary.issue_key());
    println!(
        "  Type: {}",
        outputs.issue_type.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Priority: {}",
        outputs.issue_priority.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Status: {}",
        outputs
            .issue_status
            .as_ref()
            .and_then(|status| status.get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("(none)")
    );
    println!("  Type sync: {}", describe(&summary.issue_type));
    println!("  Priority sync: {}", describe(&summary.priority));
    println!("  Labels sync: {}", describe(&summary.labels));
}

fn describe(status: &SyncStatus) -> String {
    match status {
        SyncStatus::Applied { values } => format!("applied ({})", values.join(", ")),
        SyncStatus::Skipped { reason } => format!("skipped ({reason})"),
        SyncStatus::Disabled => status.as_str().to_string(),
    }
}
