//! Branching NPC dialogs for Ember.
//!
//! Dialog trees are static JSON content: nodes keyed by name, each with
//! NPC text and an ordered list of player replies. A reply may award a
//! skill point and may be gated behind a [`RequirementSet`]. Gated replies
//! stay visible but cannot be selected until the player's stats qualify.
//!
//! ```
//! use ember_core::{Skill, StatVector};
//! use ember_dialog::{DialogNode, DialogOption, DialogSession, DialogTree, Step};
//!
//! let tree = DialogTree::new("Архивариус")
//!     .with_node(
//!         "start",
//!         DialogNode::new("Ты тоже ищешь своё имя?")
//!             .with_option(DialogOption::new("Да").with_stat(Skill::Empathy)),
//!     )
//!     .build()
//!     .unwrap();
//!
//! let mut session = DialogSession::start(&tree, StatVector::new());
//! let step = session.quick_select(1).unwrap();
//! assert!(matches!(step, Some(Step::Ended(stats)) if stats.empathy == 1));
//! ```
//!
//! [`RequirementSet`]: ember_core::RequirementSet

pub mod error;
pub mod session;
pub mod tree;
pub mod validate;

pub use error::{DialogError, DialogResult};
pub use session::{DialogSession, Step, VisibleOption, apply_option};
pub use tree::{DialogNode, DialogOption, DialogTree, Speaker};
pub use validate::ValidationIssue;
