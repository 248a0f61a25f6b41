//! Checkpoints and best-effort progress persistence.
//!
//! A [`Checkpoint`] is the scene index plus a stat snapshot. The
//! [`ProgressTracker`] owns the in-memory copy and pushes it through a
//! [`ProgressStore`] at scene boundaries. Store failures are logged and
//! swallowed: the game keeps running on its in-memory state.

mod store;

pub use store::{JsonFileStore, MemoryStore};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::stats::{Skill, StatVector};

/// First scene of a playthrough.
pub const FIRST_SCENE: u32 = 1;
/// Highest scene index a checkpoint may carry.
pub const LAST_SAVED_SCENE: u32 = 2;

/// Persisted progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Scene index, `FIRST_SCENE..=LAST_SAVED_SCENE`.
    pub scene: u32,
    /// Stat totals at the time of the checkpoint.
    #[serde(default)]
    pub stats: StatVector,
}

impl Checkpoint {
    /// Build a checkpoint, rejecting out-of-range scenes.
    pub fn new(scene: u32, stats: StatVector) -> CoreResult<Self> {
        let checkpoint = Self { scene, stats };
        checkpoint.validate()?;
        Ok(checkpoint)
    }

    /// The start of a fresh playthrough.
    pub fn initial() -> Self {
        Self {
            scene: FIRST_SCENE,
            stats: StatVector::new(),
        }
    }

    /// Check the scene range.
    pub fn validate(&self) -> CoreResult<()> {
        if (FIRST_SCENE..=LAST_SAVED_SCENE).contains(&self.scene) {
            Ok(())
        } else {
            Err(CoreError::InvalidCheckpoint(self.scene))
        }
    }
}

/// External progress service.
///
/// Saving the same checkpoint twice must be harmless.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressStore {
    /// Load the last saved checkpoint, if any.
    fn load(&self) -> CoreResult<Option<Checkpoint>>;

    /// Persist a checkpoint, replacing any previous one.
    fn save(&mut self, checkpoint: &Checkpoint) -> CoreResult<()>;
}

/// In-memory progress with best-effort persistence.
#[derive(Debug)]
pub struct ProgressTracker<S> {
    store: S,
    scene: u32,
    stats: StatVector,
    resumed: bool,
}

impl<S: ProgressStore> ProgressTracker<S> {
    /// Start a tracker at the first scene with zero stats, without loading.
    pub fn new(store: S) -> Self {
        Self {
            store,
            scene: FIRST_SCENE,
            stats: StatVector::new(),
            resumed: false,
        }
    }

    /// Start a tracker from the store's last checkpoint.
    ///
    /// A missing, unreadable, or out-of-range checkpoint falls back to a
    /// fresh playthrough.
    pub fn resume(store: S) -> Self {
        let mut tracker = Self::new(store);
        match tracker.store.load() {
            Ok(Some(checkpoint)) => match checkpoint.validate() {
                Ok(()) => {
                    tracing::debug!(scene = checkpoint.scene, "resumed from checkpoint");
                    tracker.scene = checkpoint.scene;
                    tracker.stats = checkpoint.stats;
                    tracker.resumed = true;
                }
                Err(e) => tracing::warn!("ignoring stored checkpoint: {e}"),
            },
            Ok(None) => tracing::debug!("no stored checkpoint, starting fresh"),
            Err(e) => tracing::warn!("failed to load progress, starting fresh: {e}"),
        }
        tracker
    }

    /// Whether [`ProgressTracker::resume`] picked up a stored checkpoint.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    /// Current scene index.
    pub fn scene(&self) -> u32 {
        self.scene
    }

    /// Current stat totals.
    pub fn stats(&self) -> &StatVector {
        &self.stats
    }

    /// Replace the in-memory stats (e.g. with a finished dialog's result).
    pub fn set_stats(&mut self, stats: StatVector) {
        self.stats = stats;
    }

    /// Add points to one skill.
    pub fn apply(&mut self, skill: Skill, delta: u32) {
        self.stats.add(skill, delta);
    }

    /// The in-memory state as a checkpoint value.
    pub fn snapshot(&self) -> Checkpoint {
        Checkpoint {
            scene: self.scene,
            stats: self.stats,
        }
    }

    /// Record reaching `scene` and try to persist it.
    ///
    /// Returns `Ok(true)` when the store accepted the save and `Ok(false)`
    /// when it failed; in-memory state is updated either way. Only an
    /// out-of-range scene is an error.
    pub fn checkpoint(&mut self, scene: u32) -> CoreResult<bool> {
        let checkpoint = Checkpoint::new(scene, self.stats)?;
        self.scene = scene;
        Ok(self.persist(&checkpoint))
    }

    /// Begin a new playthrough: zero stats, back to the first scene.
    pub fn restart(&mut self) -> bool {
        self.stats.reset();
        self.scene = FIRST_SCENE;
        let checkpoint = self.snapshot();
        self.persist(&checkpoint)
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self, checkpoint: &Checkpoint) -> bool {
        match self.store.save(checkpoint) {
            Ok(()) => {
                tracing::info!(scene = checkpoint.scene, "checkpoint saved");
                true
            }
            Err(e) => {
                tracing::warn!(scene = checkpoint.scene, "checkpoint not saved: {e}");
                false
            }
        }
    }
}
