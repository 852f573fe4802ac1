//! Fetched Jira issue fields.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Fields requested from Jira for every issue.
pub const ISSUE_FIELDS: [&str; 5] = ["issuetype", "priority", "labels", "fixVersions", "status"];

/// The subset of an issue mirrored onto the pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSnapshot {
    /// Issue key as returned by Jira.
    pub key: String,

    /// Issue type name (e.g. "Bug").
    pub issue_type: Option<String>,

    /// Priority name (e.g. "High").
    pub priority: Option<String>,

    /// Issue labels, `None` when Jira omitted the field.
    pub labels: Option<Vec<String>>,

    /// Names of the fix versions, `None` when Jira omitted the field.
    pub fix_versions: Option<Vec<String>>,

    /// Workflow status object as returned by Jira.
    pub status: Option<Value>,

    /// Display names of the returned fields, keyed by field id.
    pub field_names: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueResponse {
    key: String,
    fields: IssueFields,
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IssueFields {
    issuetype: Option<Named>,
    priority: Option<Named>,
    labels: Option<Vec<String>>,
    fix_versions: Option<Vec<Named>>,
    status: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

impl IssueSnapshot {
    /// Issue labels, empty when Jira omitted the field.
    #[must_use]
    pub fn label_names(&self) -> &[String] {
        self.labels.as_deref().unwrap_or_default()
    }

    /// Name of the workflow status, if any.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|status| status.get("name"))
            .and_then(Value::as_str)
    }
}

impl From<IssueResponse> for IssueSnapshot {
    fn from(response: IssueResponse) -> Self {
        let fields = response.fields;
        Self {
            key: response.key,
            issue_type: fields.issuetype.map(|t| t.name),
            priority: fields.priority.map(|p| p.name),
            labels: fields.labels,
            fix_versions: fields
                .fix_versions
                .map(|versions| versions.into_iter().map(|v| v.name).collect()),
            status: fields.status,
            field_names: response.names,
        }
    }
}
