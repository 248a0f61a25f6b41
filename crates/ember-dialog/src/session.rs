//! Dialog session: one walk through a tree from entry to a terminal option.

use ember_core::{Profession, StatVector};

use crate::error::{DialogError, DialogResult};
use crate::tree::{DialogNode, DialogOption, DialogTree};

/// Placeholder in option labels replaced by the player's profession.
pub const PROFESSION_PLACEHOLDER: &str = "{profession}";

/// An option as presented for the current node.
#[derive(Debug, Clone, Copy)]
pub struct VisibleOption<'t> {
    /// Zero-based index within the node.
    pub index: usize,
    /// The option itself.
    pub option: &'t DialogOption,
    /// Whether the current stats meet the option's requirement.
    pub satisfied: bool,
}

/// Result of a successful selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The dialog moved to this node.
    Continue(String),
    /// A terminal option was chosen; these are the final stats.
    Ended(StatVector),
}

/// Apply one option to a stat vector without touching any session.
///
/// Returns the new stats and the target key (`None` ends the dialog), or
/// [`DialogError::Locked`] when the requirement is not met.
pub fn apply_option<'o>(
    option: &'o DialogOption,
    stats: &StatVector,
) -> DialogResult<(StatVector, Option<&'o str>)> {
    if !option.requires.is_satisfied(stats) {
        return Err(DialogError::Locked {
            label: option.label.clone(),
            requirement: option.requires.to_string(),
        });
    }
    let updated = match option.stat {
        Some(skill) => stats.incremented(skill, option.delta),
        None => *stats,
    };
    Ok((updated, option.next.as_deref()))
}

/// Active traversal of a [`DialogTree`].
#[derive(Debug, Clone)]
pub struct DialogSession<'t> {
    tree: &'t DialogTree,
    current: Option<String>,
    stats: StatVector,
    profession: Option<Profession>,
}

impl<'t> DialogSession<'t> {
    /// Begin at the tree's entry node with the caller's stats.
    pub fn start(tree: &'t DialogTree, stats: StatVector) -> Self {
        tracing::debug!(npc = %tree.npc.name, entry = %tree.entry, "dialog started");
        Self {
            tree,
            current: Some(tree.entry.clone()),
            stats,
            profession: None,
        }
    }

    /// Fix the profession used for `{profession}` labels.
    pub fn with_profession(mut self, profession: Profession) -> Self {
        self.profession = Some(profession);
        self
    }

    /// Go back to the entry node, keeping the accumulated stats.
    pub fn restart(&mut self) -> &str {
        self.current = Some(self.tree.entry.clone());
        &self.tree.entry
    }

    /// The tree being walked.
    pub fn tree(&self) -> &'t DialogTree {
        self.tree
    }

    /// Key of the node on screen, or `None` once the dialog has ended.
    pub fn current_key(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The node on screen, or `None` once the dialog has ended.
    pub fn current_node(&self) -> Option<&'t DialogNode> {
        let tree = self.tree;
        self.current.as_deref().and_then(|key| tree.node(key))
    }

    /// Options of the current node in declaration order, locked ones included.
    pub fn visible_options(&self) -> Vec<VisibleOption<'t>> {
        let Some(node) = self.current_node() else {
            return Vec::new();
        };
        node.options
            .iter()
            .enumerate()
            .map(|(index, option)| VisibleOption {
                index,
                option,
                satisfied: option.requires.is_satisfied(&self.stats),
            })
            .collect()
    }

    /// Select the option at `index` of the current node.
    ///
    /// A locked option is rejected with no change to stats or position.
    pub fn select(&mut self, index: usize) -> DialogResult<Step> {
        let tree = self.tree;
        let key = self.current.as_deref().ok_or(DialogError::Finished)?;
        let node = tree
            .node(key)
            .ok_or_else(|| DialogError::MissingNode(key.to_string()))?;
        let option = node
            .options
            .get(index)
            .ok_or(DialogError::NoSuchOption(index))?;

        let (stats, next) = apply_option(option, &self.stats)?;
        if let Some(next) = next
            && !tree.contains(next)
        {
            return Err(DialogError::MissingNode(next.to_string()));
        }

        self.stats = stats;
        match next {
            Some(next) => {
                tracing::debug!(npc = %tree.npc.name, node = next, "dialog advanced");
                self.current = Some(next.to_string());
                Ok(Step::Continue(next.to_string()))
            }
            None => {
                tracing::info!(npc = %tree.npc.name, stats = %self.stats, "dialog ended");
                self.current = None;
                Ok(Step::Ended(self.stats))
            }
        }
    }

    /// Select by 1-based position among the rendered options.
    ///
    /// Out-of-range positions (including 0) do nothing and return `Ok(None)`.
    pub fn quick_select(&mut self, position: usize) -> DialogResult<Option<Step>> {
        let count = self.current_node().map_or(0, |n| n.options.len());
        if position == 0 || position > count {
            return Ok(None);
        }
        self.select(position - 1).map(Some)
    }

    /// Label with `{profession}` filled in.
    pub fn render_label(&self, option: &DialogOption) -> String {
        match self.profession {
            Some(p) => option.label.replace(PROFESSION_PLACEHOLDER, p.title()),
            None => option.label.clone(),
        }
    }

    /// Whether a terminal option has been chosen.
    pub fn is_finished(&self) -> bool {
        self.current.is_none()
    }

    /// Current stats.
    pub fn stats(&self) -> &StatVector {
        &self.stats
    }

    /// Consume the session and hand back the stats.
    pub fn into_stats(self) -> StatVector {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DialogNode, DialogOption};
    use ember_core::Skill;
    use proptest::prelude::*;

    /// start: [brave +1 -> start, gated bravery 2 -> gate, leave]
    fn gated_tree() -> DialogTree {
        DialogTree::new("Хаос")
            .with_node(
                "start",
                DialogNode::new("Кто ты?")
                    .with_option(
                        DialogOption::new("Я смел")
                            .with_next("start")
                            .with_stat(Skill::Bravery),
                    )
                    .with_option(
                        DialogOption::new("Я — {profession}.")
                            .with_next("gate")
                            .with_requirement(Skill::Bravery, 2),
                    )
                    .with_option(DialogOption::new("Уйти")),
            )
            .with_node(
                "gate",
                DialogNode::new("Проходи.")
                    .with_option(DialogOption::new("Завершить разговор").with_stat(Skill::Logic)),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn starts_at_entry() {
        let tree = gated_tree();
        let session = DialogSession::start(&tree, StatVector::new());
        assert_eq!(session.current_key(), Some("start"));
        assert!(!session.is_finished());
    }

    #[test]
    fn locked_options_are_listed_in_order() {
        let tree = gated_tree();
        let session = DialogSession::start(&tree, StatVector::new());
        let visible = session.visible_options();
        assert_eq!(visible.len(), 3);
        assert_eq!(
            visible.iter().map(|v| v.satisfied).collect::<Vec<_>>(),
            vec![true, false, true]
        );
        assert_eq!(visible[1].index, 1);
    }

    #[test]
    fn requirement_unlocks_after_bravery_selection() {
        let tree = gated_tree();
        let start = StatVector::new().with(Skill::Bravery, 1);
        let mut session = DialogSession::start(&tree, start);

        assert!(!session.visible_options()[1].satisfied);
        assert!(matches!(session.select(1), Err(DialogError::Locked { .. })));

        assert_eq!(session.select(0).unwrap(), Step::Continue("start".into()));
        assert_eq!(session.stats().bravery, 2);
        assert!(session.visible_options()[1].satisfied);
        assert_eq!(session.select(1).unwrap(), Step::Continue("gate".into()));
    }

    #[test]
    fn locked_selection_changes_nothing() {
        let tree = gated_tree();
        let stats = StatVector::new().with(Skill::Empathy, 5);
        let mut session = DialogSession::start(&tree, stats);
        let err = session.select(1).unwrap_err();
        assert!(err.to_string().contains("Требуется: Отвага 2"));
        assert_eq!(*session.stats(), stats);
        assert_eq!(session.current_key(), Some("start"));
    }

    #[test]
    fn terminal_option_ends_and_reports_stats() {
        let tree = gated_tree();
        let mut session = DialogSession::start(&tree, StatVector::new().with(Skill::Bravery, 2));
        session.select(1).unwrap();
        let step = session.select(0).unwrap();
        let expected = StatVector::new()
            .with(Skill::Bravery, 2)
            .with(Skill::Logic, 1);
        assert_eq!(step, Step::Ended(expected));
        assert!(session.is_finished());
        assert!(session.current_node().is_none());
        assert!(session.visible_options().is_empty());
        assert!(matches!(session.select(0), Err(DialogError::Finished)));
    }

    #[test]
    fn quick_select_is_one_based_and_ignores_out_of_range() {
        let tree = gated_tree();
        let mut session = DialogSession::start(&tree, StatVector::new());
        assert_eq!(session.quick_select(0).unwrap(), None);
        assert_eq!(session.quick_select(4).unwrap(), None);
        assert_eq!(session.current_key(), Some("start"));

        assert_eq!(
            session.quick_select(1).unwrap(),
            Some(Step::Continue("start".into()))
        );
        assert_eq!(session.stats().bravery, 1);
    }

    #[test]
    fn quick_select_on_locked_option_is_rejected() {
        let tree = gated_tree();
        let mut session = DialogSession::start(&tree, StatVector::new());
        assert!(session.quick_select(2).is_err());
        assert_eq!(session.stats().total(), 0);
    }

    #[test]
    fn profession_placeholder() {
        let tree = gated_tree();
        let session =
            DialogSession::start(&tree, StatVector::new()).with_profession(Profession::Leader);
        let option = &tree.node("start").unwrap().options[1];
        assert_eq!(session.render_label(option), "Я — лидером.");

        let plain = DialogSession::start(&tree, StatVector::new());
        assert_eq!(plain.render_label(option), "Я — {profession}.");
    }

    #[test]
    fn restart_keeps_stats() {
        let tree = gated_tree();
        let mut session = DialogSession::start(&tree, StatVector::new());
        session.select(2).unwrap();
        assert!(session.is_finished());
        assert_eq!(session.restart(), "start");
        assert_eq!(session.current_key(), Some("start"));
    }

    #[test]
    fn apply_option_respects_delta() {
        let option = DialogOption::new("x")
            .with_next("y")
            .with_stat(Skill::Organization)
            .with_delta(3);
        let (stats, next) = apply_option(&option, &StatVector::new()).unwrap();
        assert_eq!(stats.organization, 3);
        assert_eq!(next, Some("y"));
    }

    fn shipped(name: &str) -> DialogTree {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../content/dialogs")
            .join(format!("{name}.json"));
        DialogTree::load(&path).unwrap()
    }

    #[test]
    fn archivist_creative_path() {
        let tree = shipped("archivist");
        let mut session = DialogSession::start(&tree, StatVector::new());
        for _ in 0..3 {
            assert!(matches!(session.quick_select(1).unwrap(), Some(Step::Continue(_))));
        }
        let step = session.quick_select(1).unwrap();
        assert_eq!(
            step,
            Some(Step::Ended(StatVector::new().with(Skill::Creativity, 2)))
        );
    }

    #[test]
    fn chaos_opening_is_gated() {
        let tree = shipped("chaos");
        let session = DialogSession::start(&tree, StatVector::new());
        let visible = session.visible_options();
        assert_eq!(visible.len(), 4);
        assert!(visible[..3].iter().all(|v| !v.satisfied));
        assert!(visible[3].satisfied);
    }

    proptest! {
        #[test]
        fn terminal_option_always_ends(
            bravery in 0u32..10,
            logic in 0u32..10,
            empathy in 0u32..10,
        ) {
            let tree = DialogTree::new("A")
                .with_node("start", DialogNode::new("t").with_option(DialogOption::new("bye")))
                .build()
                .unwrap();
            let stats = StatVector::new()
                .with(Skill::Bravery, bravery)
                .with(Skill::Logic, logic)
                .with(Skill::Empathy, empathy);
            let mut session = DialogSession::start(&tree, stats);
            prop_assert_eq!(session.select(0).unwrap(), Step::Ended(stats));
            prop_assert!(session.is_finished());
        }

        #[test]
        fn locked_never_mutates(bravery in 0u32..5, threshold in 0u32..10) {
            let option = DialogOption::new("x")
                .with_next("start")
                .with_stat(Skill::Bravery)
                .with_requirement(Skill::Bravery, threshold);
            let tree = DialogTree::new("A")
                .with_node("start", DialogNode::new("t").with_option(option).with_option(DialogOption::new("bye")))
                .build()
                .unwrap();
            let stats = StatVector::new().with(Skill::Bravery, bravery);
            let mut session = DialogSession::start(&tree, stats);
            match session.select(0) {
                Ok(_) => prop_assert!(bravery >= threshold),
                Err(_) => {
                    prop_assert!(bravery < threshold);
                    prop_assert_eq!(*session.stats(), stats);
                    prop_assert_eq!(session.current_key(), Some("start"));
                }
            }
        }
    }
}
