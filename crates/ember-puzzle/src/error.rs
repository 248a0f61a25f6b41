//! Error types for the mini-game engine.

use thiserror::Error;

use crate::kind::PuzzleKind;

/// Result type for puzzle operations.
pub type PuzzleResult<T> = Result<T, PuzzleError>;

/// Errors raised while loading decks or driving a session.
#[derive(Debug, Error)]
pub enum PuzzleError {
    /// A deck file could not be read.
    #[error("failed to read puzzle deck: {0}")]
    Io(#[from] std::io::Error),

    /// A deck file is not valid JSON for the content model.
    #[error("failed to parse puzzle deck: {0}")]
    Parse(#[from] serde_json::Error),

    /// A deck has no rounds.
    #[error("puzzle deck '{0}' has no rounds")]
    EmptyDeck(String),

    /// A round's kind differs from its deck's kind.
    #[error("round {round}: expected a {expected} round, found {found}")]
    KindMismatch {
        /// Zero-based round index.
        round: usize,
        /// The deck's kind.
        expected: PuzzleKind,
        /// The round's kind.
        found: PuzzleKind,
    },

    /// Round data is malformed.
    #[error("round {round}: {reason}")]
    InvalidRound {
        /// Zero-based round index.
        round: usize,
        /// What is wrong.
        reason: String,
    },

    /// An unknown puzzle kind name.
    #[error("unknown puzzle kind: {0}")]
    UnknownKind(String),

    /// The action is not accepted in the current phase.
    #[error("cannot {action} during {phase}")]
    WrongPhase {
        /// The rejected action.
        action: &'static str,
        /// Phase name at the time.
        phase: String,
    },

    /// An input edit does not fit the round (wrong shape or out of range).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The session was exited and accepts no further actions.
    #[error("puzzle session is closed")]
    Closed,
}
