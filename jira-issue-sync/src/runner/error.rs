//! Runner error types.

/// Errors that can fail a run.
///
/// Every variant is reported the same way: the run is marked failed with the
/// error's message.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Missing or malformed action inputs.
    #[error(transparent)]
    Input(#[from] crate::inputs::InputError),

    /// Pull request context could not be read.
    #[error(transparent)]
    Context(#[from] crate::github::ContextError),

    /// No issue key in the pull request.
    #[error(transparent)]
    Extraction(#[from] crate::extraction::ExtractionError),

    /// Issue lookup failed.
    #[error(transparent)]
    Jira(#[from] crate::jira::JiraError),

    /// Pull request update failed.
    #[error(transparent)]
    GitHub(#[from] crate::github::GitHubError),

    /// Outputs could not be written.
    #[error(transparent)]
    Output(#[from] crate::outputs::OutputError),
}
