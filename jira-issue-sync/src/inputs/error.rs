//! Input resolution error types.

use thiserror::Error;

/// Errors that can occur while resolving action inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required input was not supplied.
    #[error("Input required and not supplied: {name}")]
    Missing { name: &'static str },

    /// A boolean input was outside the accepted vocabulary.
    #[error(
        "Input does not meet YAML 1.2 \"Core Schema\" specification: {name}\n\
         Support boolean input list: `true | True | TRUE | false | False | FALSE`"
    )]
    InvalidBoolean { name: &'static str, value: String },

    /// `issue-key-location` was not one of the supported values.
    #[error("Invalid issue-key-location '{value}': expected one of `branch`, `title`, `both`")]
    InvalidLocation { value: String },

    /// `jira-base-url` could not be parsed.
    #[error("Invalid jira-base-url '{value}': {message}")]
    InvalidUrl { value: String, message: String },

    /// `ticket-regex` did not compile.
    #[error("Invalid ticket-regex '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
