//! Issue key extraction from pull request text.

mod error;

pub use error::ExtractionError;

use crate::github::PullRequestContext;
use crate::inputs::IssueKeyLocation;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Default Jira key pattern: a project key starting with an uppercase letter,
/// a hyphen, then the issue number.
///
/// See <https://confluence.atlassian.com/adminjiraserver/changing-the-project-key-format-938847081.html>.
pub const DEFAULT_ISSUE_KEY_PATTERN: &str = r"([A-Z]+[A-Z0-9_]*-\d+)";

static DEFAULT_ISSUE_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(DEFAULT_ISSUE_KEY_PATTERN) {
        Ok(re) => re,
        Err(_) => unreachable!("static regex pattern"),
    });

/// Finds issue keys in pull request titles and branch names.
#[derive(Debug, Clone)]
pub struct IssueKeyExtractor {
    pattern: Regex,
}

impl Default for IssueKeyExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_ISSUE_KEY_REGEX.clone())
    }
}

impl IssueKeyExtractor {
    /// Creates an extractor using `pattern` instead of the default.
    #[must_use]
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    /// Creates an extractor from an optional override pattern.
    #[must_use]
    pub fn from_override(pattern: Option<&Regex>) -> Self {
        pattern.cloned().map(Self::new).unwrap_or_default()
    }

    /// Returns the active pattern.
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Extracts the issue key from the configured location of a pull request.
    ///
    /// With [`IssueKeyLocation::Both`] the branch is only searched when the
    /// title has no key.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::NotFound`] if no key matched.
    pub fn extract(
        &self,
        location: IssueKeyLocation,
        context: &PullRequestContext,
    ) -> Result<String, ExtractionError> {
        let key = match location {
            IssueKeyLocation::Branch => self.find(&context.branch),
            IssueKeyLocation::Title => self.find(&context.title),
            IssueKeyLocation::Both => self
                .find(&context.title)
                .or_else(|| self.find(&context.branch)),
        };

        debug!(location = %location, issue_key = ?key, "Extracted issue key");
        key.ok_or(ExtractionError::NotFound { location })
    }

    /// Returns the key from the last match in `text` that yields one.
    ///
    /// The key is the last capture group that took part in the match, or the
    /// whole match for patterns without groups. Empty keys are skipped.
    #[must_use]
    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern
            .captures_iter(text)
            .filter_map(|captures| captures.iter().flatten().last())
            .map(|m| m.as_str())
            .filter(|key| !key.is_empty())
            .last()
            .map(str::to_string)
    }
}
