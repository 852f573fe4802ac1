//! Field synchronizers.
//!
//! Each synchronizer copies one issue field onto the pull request. Field
//! updates overwrite and label additions are unions, so re-running a
//! synchronizer with the same issue has no further effect.

mod status;

pub use status::SyncStatus;

use crate::github::{ChangeRequestHost, GitHubError};
use crate::inputs::LABEL_PREFIX_SEPARATOR;
use crate::jira::IssueSnapshot;
use tracing::{info, info_span, Instrument};

/// Sets the pull request's type field to the issue type.
///
/// # Errors
///
/// Returns [`GitHubError`] if GitHub rejects the update.
pub async fn sync_issue_type<H: ChangeRequestHost + ?Sized>(
    host: &H,
    number: u64,
    field: &str,
    issue: &IssueSnapshot,
) -> Result<SyncStatus, GitHubError> {
    sync_single_field(host, number, field, issue.issue_type.as_deref(), "issue type")
        .instrument(info_span!("sync_issue_type", pr_number = number))
        .await
}

/// Sets the pull request's priority field to the issue priority.
///
/// # Errors
///
/// Returns [`GitHubError`] if GitHub rejects the update.
pub async fn sync_issue_priority<H: ChangeRequestHost + ?Sized>(
    host: &H,
    number: u64,
    field: &str,
    issue: &IssueSnapshot,
) -> Result<SyncStatus, GitHubError> {
    sync_single_field(host, number, field, issue.priority.as_deref(), "priority")
        .instrument(info_span!("sync_issue_priority", pr_number = number))
        .await
}

/// Adds the issue labels to the pull request.
///
/// # Arguments
///
/// * `host` - Pull request writer
/// * `number` - Pull request number
/// * `issue` - Fetched issue
/// * `label_prefix` - Prefix placed before each label, joined with `" - "`
///
/// # Errors
///
/// Returns [`GitHubError`] if GitHub rejects the labels.
pub async fn sync_labels<H: ChangeRequestHost + ?Sized>(
    host: &H,
    number: u64,
    issue: &IssueSnapshot,
    label_prefix: Option<&str>,
) -> Result<SyncStatus, GitHubError> {
    let span = info_span!("sync_labels", pr_number = number);

    async {
        let labels = prefixed_labels(issue.label_names(), label_prefix);
        if labels.is_empty() {
            info!("Issue has no labels, skipping");
            return Ok(SyncStatus::Skipped {
                reason: "issue has no labels".to_string(),
            });
        }

        host.add_labels(number, &labels).await?;
        info!(labels = ?labels, "Synced labels");
        Ok(SyncStatus::Applied { values: labels })
    }
    .instrument(span)
    .await
}

/// Builds the pull request labels for the issue labels.
///
/// With a prefix, `ui` becomes `<prefix> - ui`. Duplicates are dropped,
/// keeping first occurrence order.
#[must_use]
pub fn prefixed_labels(labels: &[String], prefix: Option<&str>) -> Vec<String> {
    let mut result: Vec<String> = Vec::with_capacity(labels.len());

    for label in labels {
        let label = match prefix {
            Some(prefix) => format!("{prefix}{LABEL_PREFIX_SEPARATOR}{label}"),
            None => label.clone(),
        };
        if !result.contains(&label) {
            result.push(label);
        }
    }

    result
}

async fn sync_single_field<H: ChangeRequestHost + ?Sized>(
    host: &H,
    number: u64,
    field: &str,
    value: Option<&str>,
    description: &str,
) -> Result<SyncStatus, GitHubError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        info!(field = %field, "Issue has no {description}, skipping");
        return Ok(SyncStatus::Skipped {
            reason: format!("issue has no {description}"),
        });
    };

    host.update_field(number, field, value).await?;
    info!(field = %field, value = %value, "Synced {description}");
    Ok(SyncStatus::Applied {
        values: vec![value.to_string()],
    })
}
