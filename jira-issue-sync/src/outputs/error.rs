//! Output reporting error types.

use thiserror::Error;

/// Errors that can occur while writing action outputs.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to append to the output file.
    #[error("Failed to write output file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The generated delimiter appeared in the name or value.
    #[error("Unexpected input: output '{name}' contains the delimiter")]
    DelimiterCollision { name: String },
}
