//! Structural checks for dialog trees.
//!
//! Errors: missing entry node, options pointing at undefined nodes, nodes
//! with no options (the player would be stuck). Warnings: nodes that
//! cannot be reached from the entry.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use crate::tree::DialogTree;

/// A warning or error found in a dialog tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Where the issue was found (`npc/node`).
    pub location: String,
    /// A human-readable description of the issue.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ValidationIssue {
    fn error(location: String, message: String) -> Self {
        Self {
            location,
            message,
            is_error: true,
        }
    }

    fn warning(location: String, message: String) -> Self {
        Self {
            location,
            message,
            is_error: false,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.location, self.message)
    }
}

/// Collect every issue in `tree`.
pub fn validate_tree(tree: &DialogTree) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let npc = &tree.npc.name;

    if !tree.contains(&tree.entry) {
        issues.push(ValidationIssue::error(
            npc.clone(),
            format!("entry node '{}' is not defined", tree.entry),
        ));
    }

    for (key, node) in &tree.nodes {
        let location = format!("{npc}/{key}");
        if node.options.is_empty() {
            issues.push(ValidationIssue::error(
                location.clone(),
                "node has no options".to_string(),
            ));
        }
        for (i, option) in node.options.iter().enumerate() {
            if let Some(next) = &option.next
                && !tree.contains(next)
            {
                issues.push(ValidationIssue::error(
                    location.clone(),
                    format!("option {} points to undefined node '{next}'", i + 1),
                ));
            }
        }
    }

    let reachable = reachable_from(tree, &tree.entry);
    for key in tree.nodes.keys() {
        if !reachable.contains(key.as_str()) {
            issues.push(ValidationIssue::warning(
                format!("{npc}/{key}"),
                "node is unreachable from the entry".to_string(),
            ));
        }
    }

    issues
}

/// Breadth-first walk over `next` links. Dangling links are skipped.
fn reachable_from<'a>(tree: &'a DialogTree, entry: &'a str) -> BTreeSet<&'a str> {
    let mut seen = BTreeSet::new();
    if !tree.contains(entry) {
        return seen;
    }
    let mut queue = VecDeque::from([entry]);
    seen.insert(entry);
    while let Some(key) = queue.pop_front() {
        let Some(node) = tree.node(key) else { continue };
        for next in node.options.iter().filter_map(|o| o.next.as_deref()) {
            if tree.contains(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen
}
