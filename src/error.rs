use thiserror::Error;

use crate::model::TargetField;

/// Errors that can occur during a recipe enhancement run
///
/// Individual modifications that cannot be applied are never reported here;
/// they end up as rejected `ValidationOutcome`s instead.
#[derive(Error, Debug)]
pub enum EnhanceError {
    /// The enhanced recipe cannot be attributed to a review
    #[error("Source review id must not be empty")]
    MissingReviewId,

    /// A match result addressed a line that does not exist in the recipe
    #[error("Matched index {index} is out of range for {field} ({len} lines)")]
    MatchOutOfRange {
        field: TargetField,
        index: usize,
        len: usize,
    },

    /// A change record did not line up with the recipe it was replayed against
    #[error("Replay mismatch at change {position}: {message}")]
    ReplayMismatch { position: usize, message: String },

    /// No review carrying modifications was available
    #[error("No review with modifications to enhance from")]
    NoReviewSelected,

    /// LLM provider could not be created or called
    #[error("Provider error: {0}")]
    Provider(String),

    /// A concurrent enhancement task panicked or was cancelled
    #[error("Enhancement task failed: {0}")]
    TaskFailed(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Failed to read input files
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to (de)serialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
