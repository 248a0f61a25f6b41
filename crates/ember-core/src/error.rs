//! Error types for the core model.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the stat, checkpoint, and progress layers.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A skill key did not match any of the five skills.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A checkpoint scene index fell outside the persisted range.
    #[error("invalid checkpoint scene: {0} (expected {min}..={max})", min = crate::progress::FIRST_SCENE, max = crate::progress::LAST_SAVED_SCENE)]
    InvalidCheckpoint(u32),

    /// The progress store could not be read or written.
    #[error("progress store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored checkpoint could not be encoded or decoded.
    #[error("progress encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}
