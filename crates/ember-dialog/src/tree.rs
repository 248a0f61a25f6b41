//! Dialog content model.
//!
//! A [`DialogTree`] maps node keys to [`DialogNode`]s. Options address
//! their target by key, so trees may loop back on themselves. Any tree
//! obtained through [`DialogTree::build`], [`DialogTree::from_json`], or
//! [`DialogTree::load`] has passed validation.

use std::collections::BTreeMap;
use std::path::Path;

use ember_core::{RequirementSet, Skill};
use serde::{Deserialize, Serialize};

use crate::error::{DialogError, DialogResult};
use crate::validate::{self, ValidationIssue};

/// Default entry node key.
pub const DEFAULT_ENTRY: &str = "start";

/// Who the player is talking to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    /// Display name.
    pub name: String,
    /// Portrait asset reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub portrait: Option<String>,
}

/// One selectable line in a dialog node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOption {
    /// Text shown to the player. May contain `{profession}`.
    pub label: String,
    /// Target node, or `None` to end the dialog.
    #[serde(default)]
    pub next: Option<String>,
    /// Skill awarded on selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<Skill>,
    /// Points awarded to `stat`.
    #[serde(default = "default_delta", skip_serializing_if = "is_default_delta")]
    pub delta: u32,
    /// Gate on the player's stats.
    #[serde(default, skip_serializing_if = "RequirementSet::is_empty")]
    pub requires: RequirementSet,
}

fn default_delta() -> u32 {
    1
}

fn is_default_delta(delta: &u32) -> bool {
    *delta == 1
}

impl DialogOption {
    /// A terminal option with no stat and no requirement.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            next: None,
            stat: None,
            delta: default_delta(),
            requires: RequirementSet::new(),
        }
    }

    /// Set the target node.
    pub fn with_next(mut self, key: impl Into<String>) -> Self {
        self.next = Some(key.into());
        self
    }

    /// Award one point of `skill` on selection.
    pub fn with_stat(mut self, skill: Skill) -> Self {
        self.stat = Some(skill);
        self
    }

    /// Override the awarded amount.
    pub fn with_delta(mut self, delta: u32) -> Self {
        self.delta = delta;
        self
    }

    /// Require `skill >= threshold`.
    pub fn with_requirement(mut self, skill: Skill, threshold: u32) -> Self {
        self.requires = self.requires.with(skill, threshold);
        self
    }

    /// Whether selecting this option ends the dialog.
    pub fn is_terminal(&self) -> bool {
        self.next.is_none()
    }
}

/// A line of NPC text and the player's possible replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogNode {
    /// NPC text.
    pub text: String,
    /// Replies in display order.
    pub options: Vec<DialogOption>,
}

impl DialogNode {
    /// A node with no options yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Append an option.
    pub fn with_option(mut self, option: DialogOption) -> Self {
        self.options.push(option);
        self
    }
}

/// A complete dialog for one NPC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogTree {
    /// The NPC speaking.
    pub npc: Speaker,
    /// Key of the first node.
    #[serde(default = "default_entry")]
    pub entry: String,
    /// All nodes by key.
    pub nodes: BTreeMap<String, DialogNode>,
}

fn default_entry() -> String {
    DEFAULT_ENTRY.to_string()
}

impl DialogTree {
    /// Start building a tree for the named NPC.
    pub fn new(npc: impl Into<String>) -> Self {
        Self {
            npc: Speaker {
                name: npc.into(),
                portrait: None,
            },
            entry: default_entry(),
            nodes: BTreeMap::new(),
        }
    }

    /// Set the portrait reference.
    pub fn with_portrait(mut self, portrait: impl Into<String>) -> Self {
        self.npc.portrait = Some(portrait.into());
        self
    }

    /// Use a different entry key.
    pub fn with_entry(mut self, key: impl Into<String>) -> Self {
        self.entry = key.into();
        self
    }

    /// Add or replace a node.
    pub fn with_node(mut self, key: impl Into<String>, node: DialogNode) -> Self {
        self.nodes.insert(key.into(), node);
        self
    }

    /// Validate and finish the tree. Warnings are logged; errors fail.
    pub fn build(self) -> DialogResult<Self> {
        let (errors, warnings): (Vec<ValidationIssue>, Vec<ValidationIssue>) =
            self.validate().into_iter().partition(|i| i.is_error);
        for warning in &warnings {
            tracing::warn!("{warning}");
        }
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(DialogError::Invalid {
                npc: self.npc.name,
                issues: errors,
            })
        }
    }

    /// Parse and validate a tree from JSON.
    pub fn from_json(json: &str) -> DialogResult<Self> {
        let tree: Self = serde_json::from_str(json)?;
        tree.build()
    }

    /// Read, parse, and validate a tree from a JSON file.
    pub fn load(path: &Path) -> DialogResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let tree = Self::from_json(&raw)?;
        tracing::debug!(npc = %tree.npc.name, nodes = tree.nodes.len(), "loaded dialog");
        Ok(tree)
    }

    /// Report structural problems without failing.
    pub fn validate(&self) -> Vec<ValidationIssue> {
        validate::validate_tree(self)
    }

    /// Look up a node.
    pub fn node(&self, key: &str) -> Option<&DialogNode> {
        self.nodes.get(key)
    }

    /// Whether a node key exists.
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }
}
