//! Error types for the context engine

use thiserror::Error;

/// Errors surfaced by [`crate::RlmContext`] operations
///
/// Per-file read failures during a load are not errors; they show up as
/// [`crate::SkipReason`] entries in the load report.
#[derive(Debug, Error)]
pub enum RlmError {
    #[error("Search query must not be empty")]
    EmptyQuery,

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Chunk size must be greater than zero (got {size})")]
    InvalidChunkSize { size: usize },
}
