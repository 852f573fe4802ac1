//! Where to look for the issue key.

use super::InputError;
use std::fmt;
use std::str::FromStr;

/// The pull request text searched for an issue key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IssueKeyLocation {
    /// Only the source branch reference.
    Branch,

    /// Only the pull request title.
    Title,

    /// The title first, then the branch when the title has no key.
    #[default]
    Both,
}

impl IssueKeyLocation {
    /// Returns the input value naming this location.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branch => "branch",
            Self::Title => "title",
            Self::Both => "both",
        }
    }
}

impl FromStr for IssueKeyLocation {
    type Err = InputError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "branch" => Ok(Self::Branch),
            "title" => Ok(Self::Title),
            "both" => Ok(Self::Both),
            other => Err(InputError::InvalidLocation {
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for IssueKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
