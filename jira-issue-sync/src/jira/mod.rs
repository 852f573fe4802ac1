//! Jira REST client.
//!
//! Talks to REST API version 2 with basic credentials (username and API
//! token). Only the scheme, host and port of the configured base URL are used.

mod error;
mod issue;

pub use error::JiraError;
pub use issue::{IssueSnapshot, ISSUE_FIELDS};

use async_trait::async_trait;
use issue::IssueResponse;
use reqwest::{Client, Response, StatusCode};
use serde_json::json;
use tracing::{debug, info, info_span, Instrument};
use url::Url;

const API_VERSION: &str = "2";

/// Source of issue metadata.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Fetches the mirrored fields of the issue identified by `key`.
    async fn fetch_issue(&self, key: &str) -> Result<IssueSnapshot, JiraError>;
}

/// Authenticated Jira client.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: Client,
    origin: Url,
    username: String,
    api_token: String,
}

impl JiraClient {
    /// Creates a client for the Jira instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::InvalidBaseUrl`] for non-http(s) URLs, or
    /// [`JiraError::Request`] if the HTTP client cannot be built.
    pub fn new(base_url: &Url, username: &str, api_token: &str) -> Result<Self, JiraError> {
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(JiraError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }

        let origin = Url::parse(&base_url.origin().ascii_serialization()).map_err(|_| {
            JiraError::InvalidBaseUrl {
                url: base_url.to_string(),
            }
        })?;

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            origin,
            username: username.to_string(),
            api_token: api_token.to_string(),
        })
    }

    /// Returns the URL requests are sent to.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Sets a named field (e.g. `issuetype`, `priority`) on an issue.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError`] if Jira rejects the update.
    pub async fn update_issue_field(
        &self,
        key: &str,
        field: &str,
        name: &str,
    ) -> Result<(), JiraError> {
        let span = info_span!("jira_update_issue", issue_key = %key, field = %field);

        async {
            let url = self.issue_url(key)?;
            let body = json!({ "fields": { field: { "name": name } } });

            let response = self
                .http
                .put(url)
                .basic_auth(&self.username, Some(&self.api_token))
                .json(&body)
                .send()
                .await?;
            check_status(response, key).await?;

            info!(value = %name, "Updated Jira issue field");
            Ok(())
        }
        .instrument(span)
        .await
    }

    fn issue_url(&self, key: &str) -> Result<Url, JiraError> {
        let mut url = self.origin.clone();
        url.path_segments_mut()
            .map_err(|_| JiraError::InvalidBaseUrl {
                url: self.origin.to_string(),
            })?
            .clear()
            .extend(["rest", "api", API_VERSION, "issue", key]);
        Ok(url)
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    async fn fetch_issue(&self, key: &str) -> Result<IssueSnapshot, JiraError> {
        let span = info_span!("jira_fetch_issue", issue_key = %key);

        async {
            info!("Fetching Jira issue");
            let url = self.issue_url(key)?;
            let fields = ISSUE_FIELDS.join(",");

            let response = self
                .http
                .get(url)
                .basic_auth(&self.username, Some(&self.api_token))
                .query(&[("fields", fields.as_str()), ("expand", "names")])
                .send()
                .await?;
            let response = check_status(response, key).await?;

            let issue: IssueResponse = response.json().await?;
            let snapshot = IssueSnapshot::from(issue);

            debug!(
                issue_type = ?snapshot.issue_type,
                priority = ?snapshot.priority,
                labels = ?snapshot.labels,
                fix_versions = ?snapshot.fix_versions,
                status = ?snapshot.status_name(),
                "Fetched Jira issue"
            );
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }
}

/// Maps unsuccessful responses onto [`JiraError`].
async fn check_status(response: Response, key: &str) -> Result<Response, JiraError> {
    let status = response.status();
    match status {
        s if s.is_success() => Ok(response),
        StatusCode::NOT_FOUND => Err(JiraError::IssueNotFound {
            key: key.to_string(),
        }),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(JiraError::Unauthorized {
            status: status.as_u16(),
        }),
        _ => {
            let body = response.text().await.unwrap_or_default();
            Err(JiraError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
