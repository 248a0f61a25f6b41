//! Error types for the dialog engine.

use thiserror::Error;

use crate::validate::ValidationIssue;

/// Result type for dialog operations.
pub type DialogResult<T> = Result<T, DialogError>;

/// Errors raised while loading or walking a dialog tree.
#[derive(Debug, Error)]
pub enum DialogError {
    /// A dialog file could not be read.
    #[error("failed to read dialog: {0}")]
    Io(#[from] std::io::Error),

    /// A dialog file is not valid JSON for the content model.
    #[error("failed to parse dialog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tree failed load-time validation.
    #[error("invalid dialog tree '{npc}': {}", summarize(.issues))]
    Invalid {
        /// NPC the tree belongs to.
        npc: String,
        /// Every error-level issue found.
        issues: Vec<ValidationIssue>,
    },

    /// An option points at a node the tree does not define.
    #[error("dialog node not found: {0}")]
    MissingNode(String),

    /// The option's requirement is not met by the current stats.
    #[error("option '{label}' is locked ({requirement})")]
    Locked {
        /// Label of the rejected option.
        label: String,
        /// Rendered requirement.
        requirement: String,
    },

    /// No option exists at the given index of the current node.
    #[error("no option at index {0}")]
    NoSuchOption(usize),

    /// The session already reached a terminal option.
    #[error("dialog has already ended")]
    Finished,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
