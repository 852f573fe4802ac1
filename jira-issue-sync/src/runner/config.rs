//! Runner configuration.

use crate::github::PullRequestContext;
use crate::inputs::ActionInputs;
use std::path::{Path, PathBuf};

/// Configuration for a single sync run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Resolved action inputs.
    inputs: ActionInputs,
    /// Pull request being synced.
    context: PullRequestContext,
    /// GitHub REST API endpoint.
    github_api_url: Option<String>,
    /// File receiving action outputs.
    output_path: Option<PathBuf>,
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(inputs: ActionInputs, context: PullRequestContext) -> Self {
        Self {
            inputs,
            context,
            github_api_url: None,
            output_path: None,
        }
    }

    /// Sets a custom GitHub API endpoint (e.g. GitHub Enterprise Server).
    pub fn with_github_api_url(mut self, github_api_url: String) -> Self {
        self.github_api_url = Some(github_api_url);
        self
    }

    /// Sets the output file (`GITHUB_OUTPUT`).
    pub fn with_output_path(mut self, output_path: PathBuf) -> Self {
        self.output_path = Some(output_path);
        self
    }

    /// Returns the resolved action inputs.
    pub fn inputs(&self) -> &ActionInputs {
        &self.inputs
    }

    /// Returns the pull request context.
    pub fn context(&self) -> &PullRequestContext {
        &self.context
    }

    /// Returns the GitHub API endpoint, if overridden.
    pub fn github_api_url(&self) -> Option<&str> {
        self.github_api_url.as_deref()
    }

    /// Returns the output file path.
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }
}
