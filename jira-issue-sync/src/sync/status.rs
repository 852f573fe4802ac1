//! Synchronizer status types.

/// Outcome of one field synchronizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    /// The synchronizer's toggle is off.
    Disabled,

    /// Nothing to sync.
    Skipped {
        /// Reason for skipping.
        reason: String,
    },

    /// Values written to the pull request.
    Applied {
        /// Written values.
        values: Vec<String>,
    },
}

impl SyncStatus {
    /// Returns the status as a string for logging.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Skipped { .. } => "skipped",
            Self::Applied { .. } => "applied",
        }
    }

    /// Returns true if the synchronizer wrote to the pull request.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}
