//! The seven mini-game kinds.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;

/// Which mini-game a deck or round belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleKind {
    /// Decrypt a ciphered phrase.
    Cipher,
    /// Pick the row that breaks the trend.
    Anomaly,
    /// Assign candidates to positions.
    Matching,
    /// Put tasks in priority order.
    Prioritization,
    /// Fill in the stops of a delivery route.
    Route,
    /// Find the failing services in a call graph.
    Incident,
    /// Mark the buggy lines of a snippet.
    BugHunt,
}

impl PuzzleKind {
    /// All kinds in menu order.
    pub const ALL: [PuzzleKind; 7] = [
        Self::Cipher,
        Self::Anomaly,
        Self::Matching,
        Self::Prioritization,
        Self::Route,
        Self::Incident,
        Self::BugHunt,
    ];

    /// Lowercase identifier used in files and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Self::Cipher => "cipher",
            Self::Anomaly => "anomaly",
            Self::Matching => "matching",
            Self::Prioritization => "prioritization",
            Self::Route => "route",
            Self::Incident => "incident",
            Self::BugHunt => "bughunt",
        }
    }

    /// Whether a wrong answer reveals the round's explanation.
    pub fn reveals_on_wrong(self) -> bool {
        matches!(
            self,
            Self::Matching | Self::Prioritization | Self::Incident | Self::BugHunt
        )
    }

    /// How long the "wrong" flash stays up.
    pub fn wrong_flash(self) -> Duration {
        match self {
            Self::Cipher | Self::Anomaly | Self::Route => Duration::from_millis(1000),
            _ => Duration::from_millis(1200),
        }
    }
}

impl fmt::Display for PuzzleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PuzzleKind {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.key() == lower)
            .ok_or_else(|| PuzzleError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        for kind in PuzzleKind::ALL {
            assert_eq!(kind.to_string().parse::<PuzzleKind>().unwrap(), kind);
        }
        assert_eq!("BugHunt".parse::<PuzzleKind>().unwrap(), PuzzleKind::BugHunt);
        assert!("chess".parse::<PuzzleKind>().is_err());
    }

    #[test]
    fn flash_delays() {
        assert_eq!(PuzzleKind::Cipher.wrong_flash(), Duration::from_millis(1000));
        assert_eq!(PuzzleKind::Route.wrong_flash(), Duration::from_millis(1000));
        assert_eq!(PuzzleKind::Incident.wrong_flash(), Duration::from_millis(1200));
    }

    #[test]
    fn serde_names() {
        assert_eq!(serde_json::to_string(&PuzzleKind::BugHunt).unwrap(), "\"bughunt\"");
    }
}
