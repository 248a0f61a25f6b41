//! Configuration for a mini-game session.

use std::time::Duration;

use crate::kind::PuzzleKind;

/// Timing and randomness for a [`PuzzleSession`](crate::PuzzleSession).
#[derive(Debug, Clone)]
pub struct PuzzleConfig {
    /// RNG seed for transposition scrambles.
    pub seed: u64,
    /// Delay between a correct answer and the next round (or the result).
    pub advance_delay: Duration,
    /// How long the "wrong" flash lasts.
    pub wrong_flash: Duration,
    /// Whether a wrong answer empties the input buffer.
    pub clear_input_on_wrong: bool,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            advance_delay: Duration::from_millis(800),
            wrong_flash: Duration::from_millis(1000),
            clear_input_on_wrong: false,
        }
    }
}

impl PuzzleConfig {
    /// Defaults with the flash delay of the given game.
    pub fn for_kind(kind: PuzzleKind) -> Self {
        Self::default().with_wrong_flash(kind.wrong_flash())
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the auto-advance delay.
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    /// Set the wrong-answer flash duration.
    pub fn with_wrong_flash(mut self, delay: Duration) -> Self {
        self.wrong_flash = delay;
        self
    }

    /// Empty the input after a wrong answer.
    pub fn with_clear_input_on_wrong(mut self, clear: bool) -> Self {
        self.clear_input_on_wrong = clear;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = PuzzleConfig::default();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.advance_delay, Duration::from_millis(800));
        assert!(!cfg.clear_input_on_wrong);
    }

    #[test]
    fn per_kind_flash() {
        assert_eq!(
            PuzzleConfig::for_kind(PuzzleKind::BugHunt).wrong_flash,
            Duration::from_millis(1200)
        );
        assert_eq!(
            PuzzleConfig::for_kind(PuzzleKind::Anomaly).wrong_flash,
            Duration::from_millis(1000)
        );
    }

    #[test]
    fn builder_methods() {
        let cfg = PuzzleConfig::default()
            .with_seed(7)
            .with_advance_delay(Duration::ZERO)
            .with_clear_input_on_wrong(true);
        assert_eq!(cfg.seed, 7);
        assert_eq!(cfg.advance_delay, Duration::ZERO);
        assert!(cfg.clear_input_on_wrong);
    }
}
