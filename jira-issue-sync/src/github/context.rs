//! Pull request context from the Actions runner.

use super::ContextError;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// The pull request a run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestContext {
    /// Repository owner.
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Pull request number.
    pub number: u64,

    /// Pull request title.
    pub title: String,

    /// Source branch reference.
    pub branch: String,
}

#[derive(Debug, Default, Deserialize)]
struct EventPayload {
    pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Deserialize)]
struct PullRequestPayload {
    number: Option<u64>,
    title: Option<String>,
    head: Option<HeadPayload>,
}

#[derive(Debug, Deserialize)]
struct HeadPayload {
    #[serde(rename = "ref")]
    git_ref: Option<String>,
}

impl PullRequestContext {
    /// Loads the context from runner variables that may be unset.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::MissingVariable`] if the event path or the
    /// repository is absent, otherwise whatever [`Self::load`] returns.
    pub fn from_runner(
        event_path: Option<&Path>,
        repository: Option<&str>,
        head_ref: Option<&str>,
        git_ref: Option<&str>,
    ) -> Result<Self, ContextError> {
        let event_path = event_path.ok_or(ContextError::MissingVariable {
            name: "GITHUB_EVENT_PATH",
        })?;
        let repository = repository
            .filter(|value| !value.trim().is_empty())
            .ok_or(ContextError::MissingVariable {
                name: "GITHUB_REPOSITORY",
            })?;
        Self::load(event_path, repository, head_ref, git_ref)
    }

    /// Loads the context from the event payload at `event_path`.
    ///
    /// # Arguments
    ///
    /// * `event_path` - Path of the event payload (`GITHUB_EVENT_PATH`)
    /// * `repository` - Repository in `owner/name` form (`GITHUB_REPOSITORY`)
    /// * `head_ref` - Source branch of the pull request (`GITHUB_HEAD_REF`)
    /// * `git_ref` - Ref that triggered the workflow (`GITHUB_REF`)
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if the payload cannot be read or carries no
    /// pull request number.
    pub fn load(
        event_path: &Path,
        repository: &str,
        head_ref: Option<&str>,
        git_ref: Option<&str>,
    ) -> Result<Self, ContextError> {
        let contents = std::fs::read_to_string(event_path).map_err(|e| ContextError::ReadEvent {
            path: event_path.display().to_string(),
            source: e,
        })?;

        Self::from_event_json(&contents, repository, head_ref, git_ref).map_err(|e| match e {
            ContextError::ParseEvent { source, .. } => ContextError::ParseEvent {
                path: event_path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    /// Builds the context from an event payload document.
    ///
    /// The branch comes from the payload's `pull_request.head.ref`, then
    /// `head_ref`, then `git_ref`.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] if the payload is invalid or carries no
    /// pull request number.
    pub fn from_event_json(
        payload: &str,
        repository: &str,
        head_ref: Option<&str>,
        git_ref: Option<&str>,
    ) -> Result<Self, ContextError> {
        let event: EventPayload =
            serde_json::from_str(payload).map_err(|e| ContextError::ParseEvent {
                path: "<payload>".to_string(),
                source: e,
            })?;

        let (owner, repo) = split_repository(repository)?;
        let pull_request = event.pull_request;

        let number = pull_request
            .as_ref()
            .and_then(|pr| pr.number)
            .filter(|number| *number > 0)
            .ok_or(ContextError::MissingPullRequestNumber)?;

        let title = pull_request
            .as_ref()
            .and_then(|pr| pr.title.clone())
            .unwrap_or_default();

        let branch = pull_request
            .and_then(|pr| pr.head)
            .and_then(|head| head.git_ref)
            .or_else(|| non_empty(head_ref))
            .or_else(|| non_empty(git_ref))
            .unwrap_or_default();

        debug!(pr_title = %title, branch = %branch, pr_number = number, "Loaded pull request context");

        Ok(Self {
            owner,
            repo,
            number,
            title,
            branch,
        })
    }

    /// Returns the repository in `owner/name` form.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

fn split_repository(repository: &str) -> Result<(String, String), ContextError> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ContextError::InvalidRepository {
            value: repository.to_string(),
        }),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PULL_REQUEST_EVENT: &str = r#"{
        "action": "opened",
        "number": 42,
        "pull_request": {
            "number": 42,
            "title": "Fix login (AB-42)",
            "head": { "ref": "feature/AB-99-login", "sha": "abc123" }
        }
    }"#;

    #[test]
    fn reads_pull_request_fields() {
        let context = PullRequestContext::from_event_json(
            PULL_REQUEST_EVENT,
            "acme/widgets",
            Some("ignored"),
            Some("refs/pull/42/merge"),
        )
        .unwrap();

        assert_eq!(context.owner, "acme");
        assert_eq!(context.repo, "widgets");
        assert_eq!(context.number, 42);
        assert_eq!(context.title, "Fix login (AB-42)");
        assert_eq!(context.branch, "feature/AB-99-login");
        assert_eq!(context.full_name(), "acme/widgets");
    }

    #[test]
    fn falls_back_to_runner_refs() {
        let payload = r#"{ "pull_request": { "number": 3, "title": "t" } }"#;

        let from_head = PullRequestContext::from_event_json(
            payload,
            "acme/widgets",
            Some("feature/AB-1"),
            Some("refs/pull/3/merge"),
        )
        .unwrap();
        assert_eq!(from_head.branch, "feature/AB-1");

        let from_ref = PullRequestContext::from_event_json(
            payload,
            "acme/widgets",
            Some(""),
            Some("refs/heads/AB-2-fix"),
        )
        .unwrap();
        assert_eq!(from_ref.branch, "refs/heads/AB-2-fix");
    }

    #[test]
    fn push_event_has_no_pull_request_number() {
        let payload = r#"{ "ref": "refs/heads/main", "commits": [] }"#;

        let error =
            PullRequestContext::from_event_json(payload, "acme/widgets", None, None).unwrap_err();

        assert!(matches!(error, ContextError::MissingPullRequestNumber));
        assert_eq!(error.to_string(), "No PR number was found in the GitHub context");
    }

    #[test]
    fn rejects_malformed_repository() {
        let result =
            PullRequestContext::from_event_json(PULL_REQUEST_EVENT, "widgets", None, None);
        assert!(matches!(result, Err(ContextError::InvalidRepository { .. })));
    }

    #[test]
    fn loads_payload_from_file() {
        let temp = TempDir::new().unwrap();
        let event_path = temp.path().join("event.json");
        fs::write(&event_path, PULL_REQUEST_EVENT).unwrap();

        let context = PullRequestContext::load(&event_path, "acme/widgets", None, None).unwrap();
        assert_eq!(context.number, 42);
    }

    #[test]
    fn reports_unreadable_payload_path() {
        let temp = TempDir::new().unwrap();
        let event_path = temp.path().join("missing.json");

        let result = PullRequestContext::load(&event_path, "acme/widgets", None, None);
        assert!(matches!(result, Err(ContextError::ReadEvent { path, .. }) if path.ends_with("missing.json")));
    }

    #[test]
    fn reports_invalid_payload_path() {
        let temp = TempDir::new().unwrap();
        let event_path = temp.path().join("event.json");
        fs::write(&event_path, "not json").unwrap();

        let result = PullRequestContext::load(&event_path, "acme/widgets", None, None);
        assert!(matches!(result, Err(ContextError::ParseEvent { path, .. }) if path.ends_with("event.json")));
    }

    #[test]
    fn unset_runner_variables_are_reported() {
        let missing_path =
            PullRequestContext::from_runner(None, Some("acme/widgets"), None, None).unwrap_err();
        assert_eq!(missing_path.to_string(), "Runner variable not set: GITHUB_EVENT_PATH");

        let temp = TempDir::new().unwrap();
        let event_path = temp.path().join("event.json");
        fs::write(&event_path, PULL_REQUEST_EVENT).unwrap();

        let missing_repo =
            PullRequestContext::from_runner(Some(event_path.as_path()), Some(" "), None, None).unwrap_err();
        assert!(matches!(
            missing_repo,
            ContextError::MissingVariable { name: "GITHUB_REPOSITORY" }
        ));

        let context =
            PullRequestContext::from_runner(Some(event_path.as_path()), Some("acme/widgets"), None, None)
                .unwrap();
        assert_eq!(context.branch, "feature/AB-99-login");
    }
}
