//! Action input resolution.
//!
//! GitHub Actions hands inputs to the process as `INPUT_<NAME>` environment
//! variables. This module reads them, applies defaults and validates them
//! once, so the rest of the run works with typed values.

mod error;
mod location;

pub use error::InputError;
pub use location::IssueKeyLocation;

use regex::Regex;
use std::fmt;
use tracing::debug;
use url::Url;

/// Default name of the project field receiving the issue type.
pub const DEFAULT_ISSUE_TYPE_FIELD: &str = "Type";

/// Default name of the project field receiving the issue priority.
pub const DEFAULT_ISSUE_PRIORITY_FIELD: &str = "Priority";

/// Separator placed between the label prefix and the issue label.
pub const LABEL_PREFIX_SEPARATOR: &str = " - ";

const TRUE_VALUES: [&str; 3] = ["true", "True", "TRUE"];
const FALSE_VALUES: [&str; 3] = ["false", "False", "FALSE"];

/// Typed, validated action inputs for a single run.
#[derive(Clone)]
pub struct ActionInputs {
    github_token: String,
    jira_username: String,
    jira_api_token: String,
    jira_base_url: Url,
    issue_key_location: IssueKeyLocation,
    sync_issue_type: bool,
    sync_issue_priority: bool,
    sync_issue_labels: bool,
    ticket_regex: Option<Regex>,
    label_prefix: Option<String>,
    issue_type_field: String,
    issue_priority_field: String,
}

impl ActionInputs {
    /// Resolves inputs from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if a required input is missing or any input is malformed.
    pub fn from_env() -> Result<Self, InputError> {
        Self::from_lookup(|name| std::env::var(input_env_name(name)).ok())
    }

    /// Resolves inputs through `lookup`, which maps an input name
    /// (e.g. `jira-base-url`) to its raw value.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if a required input is missing or any input is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InputError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reader = InputReader { lookup };

        let github_token = reader.required("github-token")?;
        let jira_username = reader.required("jira-username")?;
        let jira_api_token = reader.required("jira-api-token")?;
        let jira_base_url = parse_base_url(&reader.required("jira-base-url")?)?;

        let issue_key_location = match reader.optional("issue-key-location") {
            Some(value) => value.parse()?,
            None => IssueKeyLocation::default(),
        };

        let sync_issue_type = reader.boolean("sync-issue-type", true)?;
        let sync_issue_priority = reader.boolean("sync-issue-priority", true)?;
        let sync_issue_labels = reader.boolean("sync-issue-labels", true)?;

        let ticket_regex = reader
            .optional("ticket-regex")
            .map(|pattern| {
                Regex::new(&pattern).map_err(|source| InputError::InvalidPattern { pattern, source })
            })
            .transpose()?;

        let label_prefix = reader.optional("label-prefix");
        let issue_type_field = reader
            .optional("issue-type-field")
            .unwrap_or_else(|| DEFAULT_ISSUE_TYPE_FIELD.to_string());
        let issue_priority_field = reader
            .optional("issue-priority-field")
            .unwrap_or_else(|| DEFAULT_ISSUE_PRIORITY_FIELD.to_string());

        debug!(
            jira_base_url = %jira_base_url,
            issue_key_location = %issue_key_location,
            sync_issue_type,
            sync_issue_priority,
            sync_issue_labels,
            custom_regex = ticket_regex.is_some(),
            "Resolved action inputs"
        );

        Ok(Self {
            github_token,
            jira_username,
            jira_api_token,
            jira_base_url,
            issue_key_location,
            sync_issue_type,
            sync_issue_priority,
            sync_issue_labels,
            ticket_regex,
            label_prefix,
            issue_type_field,
            issue_priority_field,
        })
    }

    /// Returns the GitHub token.
    pub fn github_token(&self) -> &str {
        &self.github_token
    }

    /// Returns the Jira username.
    pub fn jira_username(&self) -> &str {
        &self.jira_username
    }

    /// Returns the Jira API token.
    pub fn jira_api_token(&self) -> &str {
        &self.jira_api_token
    }

    /// Returns the Jira base URL.
    pub fn jira_base_url(&self) -> &Url {
        &self.jira_base_url
    }

    /// Returns where to look for the issue key.
    pub fn issue_key_location(&self) -> IssueKeyLocation {
        self.issue_key_location
    }

    /// Returns whether the issue type is synced.
    pub fn sync_issue_type(&self) -> bool {
        self.sync_issue_type
    }

    /// Returns whether the issue priority is synced.
    pub fn sync_issue_priority(&self) -> bool {
        self.sync_issue_priority
    }

    /// Returns whether the issue labels are synced.
    pub fn sync_issue_labels(&self) -> bool {
        self.sync_issue_labels
    }

    /// Returns the user-supplied key pattern, if any.
    pub fn ticket_regex(&self) -> Option<&Regex> {
        self.ticket_regex.as_ref()
    }

    /// Returns the configured label prefix, without separator.
    pub fn label_prefix(&self) -> Option<&str> {
        self.label_prefix.as_deref()
    }

    /// Returns the project field name receiving the issue type.
    pub fn issue_type_field(&self) -> &str {
        &self.issue_type_field
    }

    /// Returns the project field name receiving the issue priority.
    pub fn issue_priority_field(&self) -> &str {
        &self.issue_priority_field
    }
}

impl fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInputs")
            .field("github_token", &"***")
            .field("jira_username", &self.jira_username)
            .field("jira_api_token", &"***")
            .field("jira_base_url", &self.jira_base_url.as_str())
            .field("issue_key_location", &self.issue_key_location)
            .field("sync_issue_type", &self.sync_issue_type)
            .field("sync_issue_priority", &self.sync_issue_priority)
            .field("sync_issue_labels", &self.sync_issue_labels)
            .field("ticket_regex", &self.ticket_regex.as_ref().map(Regex::as_str))
            .field("label_prefix", &self.label_prefix)
            .field("issue_type_field", &self.issue_type_field)
            .field("issue_priority_field", &self.issue_priority_field)
            .finish()
    }
}

/// Returns the environment variable GitHub Actions uses for an input.
///
/// `jira-base-url` becomes `INPUT_JIRA-BASE-URL`.
#[must_use]
pub fn input_env_name(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

/// Parses a boolean input using the YAML 1.2 core schema vocabulary.
///
/// # Errors
///
/// Returns [`InputError::InvalidBoolean`] for any other value.
pub fn parse_boolean(name: &'static str, value: &str) -> Result<bool, InputError> {
    if TRUE_VALUES.contains(&value) {
        Ok(true)
    } else if FALSE_VALUES.contains(&value) {
        Ok(false)
    } else {
        Err(InputError::InvalidBoolean {
            name,
            value: value.to_string(),
        })
    }
}

fn parse_base_url(value: &str) -> Result<Url, InputError> {
    let url = Url::parse(value).map_err(|e| InputError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    if url.host_str().is_none() {
        return Err(InputError::InvalidUrl {
            value: value.to_string(),
            message: "URL has no host".to_string(),
        });
    }

    Ok(url)
}

struct InputReader<F> {
    lookup: F,
}

impl<F> InputReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Returns the trimmed value, treating empty strings as absent.
    fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, name: &'static str) -> Result<String, InputError> {
        self.optional(name).ok_or(InputError::Missing { name })
    }

    fn boolean(&self, name: &'static str, default: bool) -> Result<bool, InputError> {
        match self.optional(name) {
            Some(value) => parse_boolean(name, &value),
            None => Ok(default),
        }
    }
}
