//! Orchestrates a single pull request sync.
//!
//! The pipeline runs strictly in order: extract the key, fetch the issue,
//! run the enabled synchronizers (type, priority, labels), then report
//! outputs. The first failure aborts the run; outputs are only written when
//! every step before them succeeded.

mod config;
mod error;

pub use config::RunnerConfig;
pub use error::RunnerError;

use crate::extraction::IssueKeyExtractor;
use crate::github::{ChangeRequestHost, GitHubClient};
use crate::jira::{IssueTracker, JiraClient};
use crate::outputs::{IssueOutputs, OutputWriter};
use crate::summary::RunSummary;
use crate::sync::{sync_issue_priority, sync_issue_type, sync_labels};
use tracing::{info, info_span, Instrument};

/// Runs the extract, fetch, sync and report pipeline for one pull request.
pub struct Runner {
    config: RunnerConfig,
    extractor: IssueKeyExtractor,
    tracker: Box<dyn IssueTracker>,
    host: Box<dyn ChangeRequestHost>,
    outputs: OutputWriter,
}

impl Runner {
    /// Builds a runner with Jira and GitHub clients from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if either client cannot be created.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        let inputs = config.inputs();
        let tracker = JiraClient::new(
            inputs.jira_base_url(),
            inputs.jira_username(),
            inputs.jira_api_token(),
        )?;

        let context = config.context();
        let host = GitHubClient::new(
            inputs.github_token(),
            config.github_api_url(),
            &context.owner,
            &context.repo,
        )?;

        Ok(Self::with_clients(config, Box::new(tracker), Box::new(host)))
    }

    /// Builds a runner around existing clients.
    pub fn with_clients(
        config: RunnerConfig,
        tracker: Box<dyn IssueTracker>,
        host: Box<dyn ChangeRequestHost>,
    ) -> Self {
        let extractor = IssueKeyExtractor::from_override(config.inputs().ticket_regex());
        let outputs = OutputWriter::new(config.output_path().map(|p| p.to_path_buf()));
        Self {
            config,
            extractor,
            tracker,
            host,
            outputs,
        }
    }

    /// Executes the full sync flow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] from the first step that fails.
    pub async fn run(&self) -> Result<RunSummary, RunnerError> {
        let inputs = self.config.inputs();
        let context = self.config.context();
        let span = info_span!(
            "sync_pull_request",
            repo = %context.full_name(),
            pr_number = context.number
        );

        async {
            let issue_key = self
                .extractor
                .extract(inputs.issue_key_location(), context)?;
            info!(issue_key = %issue_key, "Found Jira issue key");

            let issue = self.tracker.fetch_issue(&issue_key).await?;
            let mut summary = RunSummary::new(IssueOutputs::new(&issue_key, &issue));

            if inputs.sync_issue_type() {
                summary.issue_type = sync_issue_type(
                    self.host.as_ref(),
                    context.number,
                    inputs.issue_type_field(),
                    &issue,
                )
                .await?;
            }

            if inputs.sync_issue_priority() {
                summary.priority = sync_issue_priority(
                    self.host.as_ref(),
                    context.number,
                    inputs.issue_priority_field(),
                    &issue,
                )
                .await?;
            }

            if inputs.sync_issue_labels() {
                summary.labels = sync_labels(
                    self.host.as_ref(),
                    context.number,
                    &issue,
                    inputs.label_prefix(),
                )
                .await?;
            }

            self.outputs.write_all(&summary.outputs)?;

            info!(
                issue_key = %issue_key,
                issue_type = summary.issue_type.as_str(),
                priority = summary.priority.as_str(),
                labels = summary.labels.as_str(),
                "Sync complete"
            );
            Ok(summary)
        }
        .instrument(span)
        .await
    }
}
