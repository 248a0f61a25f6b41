//! A cancellable one-shot timer driven by the caller.

use std::time::Duration;

/// A single cancellable delayed action on a manually advanced clock.
///
/// The owner feeds elapsed time through [`Scheduler::advance`]; nothing
/// fires on its own. Scheduling replaces any pending action.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now: Duration,
    pending: Option<(Duration, T)>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            pending: None,
        }
    }
}

impl<T> Scheduler<T> {
    /// An idle scheduler at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Run `action` after `delay`, replacing whatever was pending.
    pub fn schedule(&mut self, delay: Duration, action: T) {
        self.pending = Some((self.now.saturating_add(delay), action));
    }

    /// Drop the pending action, returning it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, action)| action)
    }

    /// Whether an action is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending action is due.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(due, _)| due.saturating_sub(self.now))
    }

    /// Move the clock forward and return the action if it became due.
    pub fn advance(&mut self, elapsed: Duration) -> Option<T> {
        self.now = self.now.saturating_add(elapsed);
        let now = self.now;
        let due = self.pending.as_ref().is_some_and(|(due, _)| *due <= now);
        if due {
            self.cancel()
        } else {
            None
        }
    }
}
