//! Matching rounds: assign every candidate to the position that fits.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A résumé and the position it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Résumé text.
    pub text: String,
    /// Index of the matching position.
    pub position: usize,
    /// Why the candidate fits that position.
    #[serde(default)]
    pub explain: String,
}

/// Positions plus one correct candidate per position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingRound {
    /// Open positions; each is one slot.
    pub positions: Vec<String>,
    /// Candidates to distribute.
    pub candidates: Vec<Candidate>,
}

impl MatchingRound {
    /// All-or-nothing: `slots[i]` is the candidate put in position `i`.
    pub fn check(&self, slots: &[usize]) -> bool {
        slots.len() == self.positions.len()
            && self.marks(slots).into_iter().all(|ok| ok)
    }

    /// Per-slot correctness, in slot order.
    pub fn marks(&self, slots: &[usize]) -> Vec<bool> {
        (0..self.positions.len())
            .map(|slot| {
                slots
                    .get(slot)
                    .and_then(|&c| self.candidates.get(c))
                    .is_some_and(|candidate| candidate.position == slot)
            })
            .collect()
    }

    /// One line per candidate: "position: reason".
    pub fn explanation(&self) -> Vec<String> {
        self.candidates
            .iter()
            .map(|c| {
                let position = self
                    .positions
                    .get(c.position)
                    .map_or("?", String::as_str);
                format!("{position}: {}", c.explain)
            })
            .collect()
    }

    /// Candidates must cover every position exactly once.
    pub fn validate(&self) -> Result<(), String> {
        if self.positions.is_empty() {
            return Err("matching round has no positions".to_string());
        }
        if self.candidates.len() != self.positions.len() {
            return Err(format!(
                "matching round has {} candidates for {} positions",
                self.candidates.len(),
                self.positions.len()
            ));
        }
        let covered: BTreeSet<usize> = self.candidates.iter().map(|c| c.position).collect();
        if covered.len() != self.positions.len()
            || covered.iter().any(|&p| p >= self.positions.len())
        {
            return Err("every position needs exactly one candidate".to_string());
        }
        Ok(())
    }
}
