//! Jira error types.

use thiserror::Error;

/// Errors that can occur while talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// The base URL cannot address the REST API.
    #[error("Jira base URL '{url}' is not an http(s) URL")]
    InvalidBaseUrl { url: String },

    /// The issue does not exist or is not visible to the configured user.
    #[error("Jira issue {key} was not found")]
    IssueNotFound { key: String },

    /// The credentials were rejected.
    #[error("Jira rejected the configured credentials (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other unsuccessful response.
    #[error("Jira API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    /// Transport or decoding failure.
    #[error("Jira request failed: {0}")]
    Request(#[from] reqwest::Error),
}
