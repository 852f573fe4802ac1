//! Issue key extraction error types.

use crate::inputs::IssueKeyLocation;
use thiserror::Error;

/// Errors that can occur while extracting an issue key.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No key matched in the searched text.
    #[error("No Jira issue key was found in: {location}")]
    NotFound { location: IssueKeyLocation },
}
