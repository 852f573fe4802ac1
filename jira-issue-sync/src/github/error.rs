//! GitHub error types.

use thiserror::Error;

/// Errors that can occur while reading the pull request from the runner context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// A runner variable needed to locate the pull request is not set.
    #[error("Runner variable not set: {name}")]
    MissingVariable { name: &'static str },

    /// The event payload could not be read.
    #[error("Failed to read event payload '{path}': {source}")]
    ReadEvent {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The event payload is not valid JSON.
    #[error("Failed to parse event payload '{path}': {source}")]
    ParseEvent {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The triggering event carries no pull request.
    #[error("No PR number was found in the GitHub context")]
    MissingPullRequestNumber,

    /// `GITHUB_REPOSITORY` is not in `owner/name` form.
    #[error("Invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },
}

/// Errors that can occur while updating a pull request.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// GitHub API error.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// The GraphQL endpoint answered with errors.
    #[error("GitHub GraphQL error: {message}")]
    GraphQl { message: String },

    /// The pull request is not visible to the token.
    #[error("Pull request #{number} was not found")]
    PullRequestNotFound { number: u64 },

    /// None of the pull request's projects has the field.
    #[error("No project of pull request #{number} has a single-select field named '{field}'")]
    FieldNotFound { field: String, number: u64 },

    /// The field exists but has no option with the value.
    #[error("Field '{field}' in project '{project}' has no option named '{value}'")]
    UnknownFieldOption {
        field: String,
        value: String,
        project: String,
    },
}
