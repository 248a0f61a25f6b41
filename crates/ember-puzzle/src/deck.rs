//! Puzzle decks: the ordered rounds of one mini-game.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, PuzzleResult};
use crate::kind::PuzzleKind;
use crate::round::Round;

/// A mini-game's static content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleDeck {
    /// Which game this is.
    pub kind: PuzzleKind,
    /// Display title.
    pub title: String,
    /// Tutorial text shown before the first round.
    #[serde(default)]
    pub tutorial: String,
    /// Hint shown on request (cipher rounds derive their own).
    #[serde(default)]
    pub hint: String,
    /// Rounds, played strictly in order.
    pub rounds: Vec<Round>,
}

impl PuzzleDeck {
    /// Check that the deck is playable.
    pub fn validate(&self) -> PuzzleResult<()> {
        if self.rounds.is_empty() {
            return Err(PuzzleError::EmptyDeck(self.title.clone()));
        }
        for (i, round) in self.rounds.iter().enumerate() {
            if round.kind() != self.kind {
                return Err(PuzzleError::KindMismatch {
                    round: i,
                    expected: self.kind,
                    found: round.kind(),
                });
            }
            round
                .validate()
                .map_err(|reason| PuzzleError::InvalidRound { round: i, reason })?;
        }
        Ok(())
    }

    /// Parse and validate a deck from JSON.
    pub fn from_json(json: &str) -> PuzzleResult<Self> {
        let deck: Self = serde_json::from_str(json)?;
        deck.validate()?;
        Ok(deck)
    }

    /// Read, parse, and validate a deck file.
    pub fn load(path: &Path) -> PuzzleResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let deck = Self::from_json(&raw)?;
        tracing::debug!(kind = %deck.kind, rounds = deck.rounds.len(), "loaded puzzle deck");
        Ok(deck)
    }

    /// Number of rounds.
    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    /// Whether there are no rounds.
    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCIDENTS: &str = r#"{
        "kind": "incident",
        "title": "Найди, что упало",
        "hint": "Смотри на коды ошибок.",
        "rounds": [
            { "kind": "incident", "text": "A → B → C. C отдает 500.",
              "services": ["A", "B", "C"], "root_causes": ["C"], "explain": "C падает." }
        ]
    }"#;

    #[test]
    fn parses_deck() {
        let deck = PuzzleDeck::from_json(INCIDENTS).unwrap();
        assert_eq!(deck.kind, PuzzleKind::Incident);
        assert_eq!(deck.len(), 1);
        assert!(deck.tutorial.is_empty());
    }

    #[test]
    fn empty_deck_is_rejected() {
        let json = r#"{ "kind": "route", "title": "Маршрут", "rounds": [] }"#;
        assert!(matches!(
            PuzzleDeck::from_json(json),
            Err(PuzzleError::EmptyDeck(_))
        ));
    }

    #[test]
    fn mixed_kinds_are_rejected() {
        let mut deck: PuzzleDeck = serde_json::from_str(INCIDENTS).unwrap();
        deck.kind = PuzzleKind::BugHunt;
        assert!(matches!(
            deck.validate(),
            Err(PuzzleError::KindMismatch { round: 0, .. })
        ));
    }

    #[test]
    fn malformed_round_names_its_index() {
        let json = INCIDENTS.replace(r#""root_causes": ["C"]"#, r#""root_causes": ["Z"]"#);
        match PuzzleDeck::from_json(&json) {
            Err(PuzzleError::InvalidRound { round, reason }) => {
                assert_eq!(round, 0);
                assert!(reason.contains('Z'));
            }
            other => panic!("expected invalid round, got {other:?}"),
        }
    }

    #[test]
    fn shipped_decks_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../content/puzzles");
        for kind in PuzzleKind::ALL {
            let deck = PuzzleDeck::load(&dir.join(format!("{}.json", kind.key())))
                .unwrap_or_else(|e| panic!("{kind}: {e}"));
            assert_eq!(deck.kind, kind);
            assert!(!deck.title.is_empty());
        }
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            PuzzleDeck::load(&dir.path().join("none.json")),
            Err(PuzzleError::Io(_))
        ));
    }
}
