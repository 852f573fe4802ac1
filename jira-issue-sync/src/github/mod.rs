//! GitHub pull request access.
//!
//! This module reads the pull request from the Actions runner context and
//! writes issue metadata back to it: labels through the REST API, type and
//! priority through single-select fields of the pull request's projects.

mod context;
mod error;
mod projects;

pub use context::PullRequestContext;
pub use error::{ContextError, GitHubError};

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::{info, info_span, Instrument};

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Write access to the pull request being synced.
#[async_trait]
pub trait ChangeRequestHost: Send + Sync {
    /// Sets the single-select field named `field` to `value`.
    async fn update_field(&self, number: u64, field: &str, value: &str) -> Result<(), GitHubError>;

    /// Adds `labels` to the pull request, keeping existing ones.
    ///
    /// Returns the pull request's labels after the update.
    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<Vec<String>, GitHubError>;
}

/// Authenticated GitHub client scoped to one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Creates a client authenticated with `token`.
    ///
    /// # Arguments
    ///
    /// * `token` - Token sent as bearer credentials
    /// * `api_url` - REST API endpoint, [`DEFAULT_API_URL`] when `None`
    /// * `owner` - Repository owner
    /// * `repo` - Repository name
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the client cannot be built.
    pub fn new(
        token: &str,
        api_url: Option<&str>,
        owner: &str,
        repo: &str,
    ) -> Result<Self, GitHubError> {
        let octocrab = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_url.unwrap_or(DEFAULT_API_URL))?
            .build()?;

        Ok(Self {
            octocrab,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

#[async_trait]
impl ChangeRequestHost for GitHubClient {
    async fn update_field(&self, number: u64, field: &str, value: &str) -> Result<(), GitHubError> {
        let span = info_span!("update_field", pr_number = number, field = %field);

        async {
            projects::set_single_select_field(
                &self.octocrab,
                &self.owner,
                &self.repo,
                number,
                field,
                value,
            )
            .await?;
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn add_labels(&self, number: u64, labels: &[String]) -> Result<Vec<String>, GitHubError> {
        let span = info_span!("add_labels", pr_number = number);

        async {
            let current = self
                .octocrab
                .issues(&self.owner, &self.repo)
                .add_labels(number, labels)
                .await?;

            info!(labels = ?labels, "Labels added");
            Ok(current.into_iter().map(|label| label.name).collect())
        }
        .instrument(span)
        .await
    }
}
