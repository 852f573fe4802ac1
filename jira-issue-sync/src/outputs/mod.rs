//! Action output reporting.
//!
//! Outputs go to the file named by `GITHUB_OUTPUT` in the runner's heredoc
//! format. Without that file the legacy `::set-output` workflow command is
//! printed instead.

mod error;

pub use error::OutputError;

use crate::jira::IssueSnapshot;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Values reported as action outputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueOutputs {
    /// Extracted issue key.
    pub issue_key: String,

    /// Issue type name.
    pub issue_type: Option<String>,

    /// Issue priority name.
    pub issue_priority: Option<String>,

    /// Issue labels, `None` when Jira omitted them.
    pub issue_labels: Option<Vec<String>>,

    /// Issue fix version names, `None` when Jira omitted them.
    pub issue_fix_versions: Option<Vec<String>>,

    /// Issue status object.
    pub issue_status: Option<Value>,
}

impl IssueOutputs {
    /// Builds the outputs from the extracted key and fetched issue.
    #[must_use]
    pub fn new(issue_key: &str, issue: &IssueSnapshot) -> Self {
        Self {
            issue_key: issue_key.to_string(),
            issue_type: issue.issue_type.clone(),
            issue_priority: issue.priority.clone(),
            issue_labels: issue.labels.clone(),
            issue_fix_versions: issue.fix_versions.clone(),
            issue_status: issue.status.clone(),
        }
    }

    /// Returns every output as `(name, value)`.
    ///
    /// Strings are reported verbatim, lists and the status object as JSON.
    /// Missing values are empty strings.
    #[must_use]
    pub fn entries(&self) -> [(&'static str, String); 6] {
        [
            ("issue-key", self.issue_key.clone()),
            ("issue-type", self.issue_type.clone().unwrap_or_default()),
            (
                "issue-priority",
                self.issue_priority.clone().unwrap_or_default(),
            ),
            ("issue-labels", json_value(self.issue_labels.as_ref())),
            (
                "issue-fix-version",
                json_value(self.issue_fix_versions.as_ref()),
            ),
            ("issue-status", json_value(self.issue_status.as_ref())),
        ]
    }
}

/// Destination for action outputs.
#[derive(Debug, Clone)]
pub struct OutputWriter {
    path: Option<PathBuf>,
}

impl OutputWriter {
    /// Creates a writer appending to `path`, or printing workflow commands
    /// when `None`.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Writes a single output.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the output file cannot be written.
    pub fn set_output(&self, name: &str, value: &str) -> Result<(), OutputError> {
        self.write_entries(&[(name, value)])
    }

    /// Writes all issue outputs.
    ///
    /// Entries are formatted up front and appended with a single write.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the output file cannot be written.
    pub fn write_all(&self, outputs: &IssueOutputs) -> Result<(), OutputError> {
        let entries = outputs.entries();
        let pairs: Vec<(&str, &str)> = entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        self.write_entries(&pairs)
    }

    fn write_entries(&self, entries: &[(&str, &str)]) -> Result<(), OutputError> {
        for (name, value) in entries {
            debug!(output = *name, value = *value, "Setting output");
        }

        let Some(path) = &self.path else {
            for (name, value) in entries {
                println!("::set-output name={name}::{}", escape_data(value));
            }
            return Ok(());
        };

        let contents = render_entries(entries)?;
        let io_error = |source: std::io::Error| OutputError::IoError {
            path: path.display().to_string(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        file.write_all(contents.as_bytes()).map_err(io_error)
    }
}

/// Formats the workflow command that marks the run as failed.
#[must_use]
pub fn error_command(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Formats every entry before anything touches the output file.
fn render_entries(entries: &[(&str, &str)]) -> Result<String, OutputError> {
    let mut contents = String::new();
    for (name, value) in entries {
        contents.push_str(&file_command(name, value)?);
    }
    Ok(contents)
}

/// Formats an output entry in the runner's heredoc file syntax.
fn file_command(name: &str, value: &str) -> Result<String, OutputError> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(OutputError::DelimiterCollision {
            name: name.to_string(),
        });
    }
    Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
}

/// Escapes data for a workflow command.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Formats a value the way the runner toolkit does: absent values are empty,
/// strings verbatim, everything else as JSON.
fn json_value<T: serde::Serialize>(value: Option<&T>) -> String {
    match value.map(serde_json::to_value) {
        Some(Ok(Value::String(text))) => text,
        Some(Ok(Value::Null)) | None => String::new(),
        Some(Ok(other)) => other.to_string(),
        Some(Err(_)) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn sample_outputs() -> IssueOutputs {
        IssueOutputs {
            issue_key: "AB-42".to_string(),
            issue_type: Some("Bug".to_string()),
            issue_priority: Some("High".to_string()),
            issue_labels: Some(vec!["ui".to_string()]),
            issue_fix_versions: Some(vec!["1.0".to_string(), "1.1".to_string()]),
            issue_status: None,
        }
    }

    /// Parses `name<<delim\nvalue\ndelim\n` entries back into pairs.
    fn parse_output_file(contents: &str) -> Vec<(String, String)> {
        let mut entries = Vec::new();
        let mut lines = contents.lines();
        while let Some(header) = lines.next() {
            let (name, delimiter) = header.split_once("<<").unwrap();
            let mut value = Vec::new();
            for line in lines.by_ref() {
                if line == delimiter {
                    break;
                }
                value.push(line);
            }
            entries.push((name.to_string(), value.join("\n")));
        }
        entries
    }

    #[test]
    fn formats_entries() {
        let entries = sample_outputs().entries();

        assert_eq!(entries[0], ("issue-key", "AB-42".to_string()));
        assert_eq!(entries[1], ("issue-type", "Bug".to_string()));
        assert_eq!(entries[2], ("issue-priority", "High".to_string()));
        assert_eq!(entries[3], ("issue-labels", r#"["ui"]"#.to_string()));
        assert_eq!(
            entries[4],
            ("issue-fix-version", r#"["1.0","1.1"]"#.to_string())
        );
        assert_eq!(entries[5], ("issue-status", String::new()));
    }

    #[test]
    fn builds_outputs_from_issue() {
        let issue = IssueSnapshot {
            key: "AB-42".to_string(),
            issue_type: Some("Story".to_string()),
            status: Some(json!({ "id": "3", "name": "Done" })),
            ..Default::default()
        };

        let outputs = IssueOutputs::new("AB-42", &issue);

        assert_eq!(outputs.issue_type.as_deref(), Some("Story"));
        assert_eq!(outputs.issue_status, Some(json!({ "id": "3", "name": "Done" })));
        assert_eq!(outputs.issue_labels, None);
    }

    #[test]
    fn status_object_is_reported_as_json() {
        let outputs = IssueOutputs {
            issue_status: Some(json!({ "name": "In Review" })),
            ..sample_outputs()
        };

        let entries = outputs.entries();
        assert_eq!(entries[5], ("issue-status", r#"{"name":"In Review"}"#.to_string()));
    }

    #[test]
    fn omitted_fields_are_reported_empty() {
        let issue = IssueSnapshot {
            key: "AB-1".to_string(),
            ..Default::default()
        };

        let entries = IssueOutputs::new("AB-1", &issue).entries();

        assert_eq!(entries[0], ("issue-key", "AB-1".to_string()));
        for (name, value) in &entries[1..] {
            assert_eq!(value, "", "{name} should be empty");
        }
    }

    #[test]
    fn present_but_empty_lists_are_json_arrays() {
        let issue = IssueSnapshot {
            key: "AB-1".to_string(),
            labels: Some(Vec::new()),
            fix_versions: Some(Vec::new()),
            ..Default::default()
        };

        let entries = IssueOutputs::new("AB-1", &issue).entries();

        assert_eq!(entries[3], ("issue-labels", "[]".to_string()));
        assert_eq!(entries[4], ("issue-fix-version", "[]".to_string()));
    }

    #[test]
    fn appends_heredoc_entries_to_output_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");
        fs::write(&path, "existing<<EOF\nvalue\nEOF\n").unwrap();

        OutputWriter::new(Some(path.clone()))
            .write_all(&sample_outputs())
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let entries = parse_output_file(&contents);

        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0], ("existing".to_string(), "value".to_string()));
        assert_eq!(entries[1], ("issue-key".to_string(), "AB-42".to_string()));
        assert_eq!(entries[6], ("issue-status".to_string(), String::new()));
        assert!(contents.contains("issue-key<<ghadelimiter_"));
    }

    #[test]
    fn keeps_multiline_values() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");

        OutputWriter::new(Some(path.clone()))
            .set_output("notes", "line one\nline two")
            .unwrap();

        let entries = parse_output_file(&fs::read_to_string(&path).unwrap());
        assert_eq!(
            entries,
            vec![("notes".to_string(), "line one\nline two".to_string())]
        );
    }

    #[test]
    fn renders_all_entries_as_one_block() {
        let contents = render_entries(&[("issue-key", "AB-1"), ("issue-type", "Bug")]).unwrap();

        assert_eq!(
            parse_output_file(&contents),
            vec![
                ("issue-key".to_string(), "AB-1".to_string()),
                ("issue-type".to_string(), "Bug".to_string()),
            ]
        );
        let delimiters: Vec<_> = contents
            .lines()
            .filter_map(|line| line.split_once("<<").map(|(_, d)| d))
            .collect();
        assert_eq!(delimiters.len(), 2);
        assert_ne!(delimiters[0], delimiters[1]);
    }

    #[test]
    fn directory_output_path_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("github_output");
        fs::create_dir(&path).unwrap();

        let result = OutputWriter::new(Some(path.clone())).write_all(&sample_outputs());

        assert!(matches!(result, Err(OutputError::IoError { .. })));
        assert!(path.is_dir());
    }

    #[test]
    fn reports_unwritable_output_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing-dir/github_output");

        let result = OutputWriter::new(Some(path)).set_output("issue-key", "AB-1");
        assert!(matches!(result, Err(OutputError::IoError { .. })));
    }

    #[test]
    fn escapes_workflow_command_data() {
        assert_eq!(escape_data("50%\r\ndone"), "50%25%0D%0Adone");
        assert_eq!(
            error_command("No Jira issue key was found in: both"),
            "::error::No Jira issue key was found in: both"
        );
    }
}
