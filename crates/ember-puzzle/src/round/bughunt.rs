//! Bug-hunt rounds: mark the lines that contain bugs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A code snippet and its buggy lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BugHuntRound {
    /// Source lines.
    pub lines: Vec<String>,
    /// Zero-based indices of buggy lines.
    pub buggy: BTreeSet<usize>,
    /// What the fix is.
    #[serde(default)]
    pub explain: String,
}

impl BugHuntRound {
    /// Exact set equality.
    pub fn check(&self, selected: &BTreeSet<usize>) -> bool {
        *selected == self.buggy
    }

    /// The stored explanation.
    pub fn explanation(&self) -> Vec<String> {
        vec![self.explain.clone()]
    }

    /// Buggy lines must exist.
    pub fn validate(&self) -> Result<(), String> {
        if self.buggy.is_empty() {
            return Err("bug hunt has no buggy lines".to_string());
        }
        if let Some(line) = self.buggy.iter().find(|&&l| l >= self.lines.len()) {
            return Err(format!(
                "buggy line {line} is out of range (0..{})",
                self.lines.len()
            ));
        }
        Ok(())
    }
}
