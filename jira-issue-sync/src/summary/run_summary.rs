//! Run summary types.

use crate::outputs::IssueOutputs;
use crate::sync::SyncStatus;

/// Summary of a complete run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Values reported as action outputs.
    pub outputs: IssueOutputs,

    /// Outcome of the issue type synchronizer.
    pub issue_type: SyncStatus,

    /// Outcome of the priority synchronizer.
    pub priority: SyncStatus,

    /// Outcome of the labels synchronizer.
    pub labels: SyncStatus,
}

impl RunSummary {
    /// Creates a summary in which no synchronizer has run.
    #[must_use]
    pub fn new(outputs: IssueOutputs) -> Self {
        Self {
            outputs,
            issue_type: SyncStatus::Disabled,
            priority: SyncStatus::Disabled,
            labels: SyncStatus::Disabled,
        }
    }

    /// Returns the issue key the run was linked to.
    #[must_use]
    pub fn issue_key(&self) -> &str {
        &self.outputs.issue_key
    }

    /// Returns the number of synchronizers that wrote to the pull request.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        [&self.issue_type, &self.priority, &self.labels]
            .into_iter()
            .filter(|status| status.is_applied())
            .count()
    }
}
