//! Core types for Ember.
//!
//! The five-skill [`StatVector`], the [`RequirementSet`] gate that dialog
//! options are locked behind, profession derivation from a player's
//! dominant skill, and checkpoint persistence through a pluggable
//! [`ProgressStore`].

pub mod error;
pub mod profession;
pub mod progress;
pub mod requirement;
pub mod stats;

pub use error::{CoreError, CoreResult};
pub use profession::{Profession, dominant_skills};
pub use progress::{Checkpoint, JsonFileStore, MemoryStore, ProgressStore, ProgressTracker};
pub use requirement::{RequirementSet, is_satisfied};
pub use stats::{Skill, StatVector};
