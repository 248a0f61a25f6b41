//! Round-based mini-games for Ember.
//!
//! A [`PuzzleDeck`] holds the static rounds of one game. A
//! [`PuzzleSession`] plays it through the shared phase machine: tutorial,
//! optional worked example, active input, timed feedback, result. The
//! seven games differ only in their [`Round`] shape and answer check.
//!
//! Nothing here reads a wall clock. Callers drive delayed transitions
//! with [`PuzzleSession::advance`].

pub mod cipher;
pub mod config;
pub mod deck;
pub mod error;
pub mod input;
pub mod kind;
pub mod round;
pub mod scheduler;
pub mod session;

pub use cipher::{Alphabet, CipherTransform};
pub use config::PuzzleConfig;
pub use deck::PuzzleDeck;
pub use error::{PuzzleError, PuzzleResult};
pub use input::{Edit, InputBuffer};
pub use kind::PuzzleKind;
pub use round::{Round, Submission, WorkedExample, check};
pub use scheduler::Scheduler;
pub use session::{Action, Event, Outcome, Phase, PuzzleSession, Verdict};
