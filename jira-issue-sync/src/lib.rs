#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod extraction;
pub mod github;
pub mod inputs;
pub mod jira;
pub mod outputs;
pub mod runner;
pub mod summary;
pub mod sync;

pub use extraction::{ExtractionError, IssueKeyExtractor, DEFAULT_ISSUE_KEY_PATTERN};
pub use github::{
    ChangeRequestHost, ContextError, GitHubClient, GitHubError, PullRequestContext,
    DEFAULT_API_URL,
};
pub use inputs::{ActionInputs, InputError, IssueKeyLocation};
pub use jira::{IssueSnapshot, IssueTracker, JiraClient, JiraError};
pub use outputs::{error_command, IssueOutputs, OutputError, OutputWriter};
pub use runner::{Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
pub use sync::{prefixed_labels, sync_issue_priority, sync_issue_type, sync_labels, SyncStatus};
