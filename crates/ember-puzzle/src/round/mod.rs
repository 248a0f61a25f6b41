//! Round content and answer checking.
//!
//! Each mini-game kind has its own round shape and match rule:
//! - **Cipher**: trimmed, uppercased text equals the plaintext
//! - **Anomaly**: picked row equals the anomalous row
//! - **Matching**: every slot holds a candidate meant for that slot
//! - **Prioritization**: submitted order equals the canonical order
//! - **Route**: intermediate stops equal the canonical route
//! - **Incident**: selected services equal the root causes exactly
//! - **Bug hunt**: selected lines equal the buggy lines exactly
//!
//! All checks are pure. A submission of the wrong shape never matches.

pub mod anomaly;
pub mod bughunt;
pub mod cipher;
pub mod incident;
pub mod matching;
pub mod prioritization;
pub mod route;

pub use anomaly::{AnomalyRound, DataRow};
pub use bughunt::BugHuntRound;
pub use cipher::CipherRound;
pub use incident::IncidentRound;
pub use matching::{Candidate, MatchingRound};
pub use prioritization::PrioritizationRound;
pub use route::RouteRound;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::kind::PuzzleKind;

/// A solved sample shown before a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedExample {
    /// The sample puzzle as shown to the player.
    pub question: String,
    /// Its answer.
    pub answer: String,
    /// How the answer was reached.
    pub explain: String,
}

/// One puzzle instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Round {
    /// Decrypt a phrase.
    Cipher(CipherRound),
    /// Spot the outlier row.
    Anomaly(AnomalyRound),
    /// Assign candidates to positions.
    Matching(MatchingRound),
    /// Order tasks by priority.
    Prioritization(PrioritizationRound),
    /// Plan a route.
    Route(RouteRound),
    /// Diagnose failing services.
    Incident(IncidentRound),
    /// Spot buggy lines.
    #[serde(rename = "bughunt")]
    BugHunt(BugHuntRound),
}

/// A player's answer to a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Typed text.
    Text(String),
    /// A single row index.
    Row(usize),
    /// Candidate index per slot, in slot order.
    Assignment(Vec<usize>),
    /// Task indices from most to least important.
    Order(Vec<usize>),
    /// Intermediate stops, start and end excluded.
    Route(Vec<String>),
    /// Selected service names.
    Services(BTreeSet<String>),
    /// Selected line indices.
    Lines(BTreeSet<usize>),
}

impl Round {
    /// Which mini-game this round belongs to.
    pub fn kind(&self) -> PuzzleKind {
        match self {
            Self::Cipher(_) => PuzzleKind::Cipher,
            Self::Anomaly(_) => PuzzleKind::Anomaly,
            Self::Matching(_) => PuzzleKind::Matching,
            Self::Prioritization(_) => PuzzleKind::Prioritization,
            Self::Route(_) => PuzzleKind::Route,
            Self::Incident(_) => PuzzleKind::Incident,
            Self::BugHunt(_) => PuzzleKind::BugHunt,
        }
    }

    /// The worked example shown before this round, if any.
    pub fn example(&self) -> Option<&WorkedExample> {
        match self {
            Self::Cipher(r) => r.example.as_ref(),
            Self::Anomaly(r) => r.example.as_ref(),
            _ => None,
        }
    }

    /// Lines explaining the correct answer.
    pub fn explanation(&self) -> Vec<String> {
        match self {
            Self::Cipher(r) => r.explanation(),
            Self::Anomaly(r) => r.explanation(),
            Self::Matching(r) => r.explanation(),
            Self::Prioritization(r) => r.explanation(),
            Self::Route(r) => r.explanation(),
            Self::Incident(r) => r.explanation(),
            Self::BugHunt(r) => r.explanation(),
        }
    }

    /// Check the round's own data for consistency.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Cipher(r) => r.validate(),
            Self::Anomaly(r) => r.validate(),
            Self::Matching(r) => r.validate(),
            Self::Prioritization(r) => r.validate(),
            Self::Route(r) => r.validate(),
            Self::Incident(r) => r.validate(),
            Self::BugHunt(r) => r.validate(),
        }
    }
}

/// Whether `submission` solves `round`.
pub fn check(round: &Round, submission: &Submission) -> bool {
    match (round, submission) {
        (Round::Cipher(r), Submission::Text(text)) => r.check(text),
        (Round::Anomaly(r), Submission::Row(row)) => r.check(*row),
        (Round::Matching(r), Submission::Assignment(slots)) => r.check(slots),
        (Round::Prioritization(r), Submission::Order(order)) => r.check(order),
        (Round::Route(r), Submission::Route(stops)) => r.check(stops),
        (Round::Incident(r), Submission::Services(services)) => r.check(services),
        (Round::BugHunt(r), Submission::Lines(lines)) => r.check(lines),
        _ => false,
    }
}
