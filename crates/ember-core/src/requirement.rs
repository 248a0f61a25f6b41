//! Minimum-threshold gates over a [`StatVector`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::stats::{Skill, StatVector};

/// A set of `skill >= threshold` requirements.
///
/// An empty set always passes. A non-empty set passes only when every
/// listed skill meets or exceeds its threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequirementSet(BTreeMap<Skill, u32>);

impl RequirementSet {
    /// An empty requirement set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a threshold (builder style).
    pub fn with(mut self, skill: Skill, threshold: u32) -> Self {
        self.0.insert(skill, threshold);
        self
    }

    /// Whether the set has no thresholds.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Threshold for a skill, if one is set.
    pub fn threshold(&self, skill: Skill) -> Option<u32> {
        self.0.get(&skill).copied()
    }

    /// Iterate `(skill, threshold)` pairs in skill order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, u32)> + '_ {
        self.0.iter().map(|(skill, threshold)| (*skill, *threshold))
    }

    /// Whether `stats` satisfies every threshold.
    pub fn is_satisfied(&self, stats: &StatVector) -> bool {
        is_satisfied(stats, Some(self))
    }

    /// Skills that are still below their threshold, with the missing amount.
    pub fn shortfall(&self, stats: &StatVector) -> Vec<(Skill, u32)> {
        self.iter()
            .filter_map(|(skill, threshold)| {
                let have = stats.get(skill);
                (have < threshold).then(|| (skill, threshold - have))
            })
            .collect()
    }
}

impl FromIterator<(Skill, u32)> for RequirementSet {
    fn from_iter<I: IntoIterator<Item = (Skill, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for RequirementSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(skill, threshold)| format!("{} {threshold}", skill.label()))
            .collect();
        write!(f, "Требуется: {}", parts.join(", "))
    }
}

/// Gate predicate: `None` or an empty set always passes.
pub fn is_satisfied(stats: &StatVector, requirement: Option<&RequirementSet>) -> bool {
    match requirement {
        None => true,
        Some(set) => set
            .iter()
            .all(|(skill, threshold)| stats.get(skill) >= threshold),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_always_passes() {
        assert!(is_satisfied(&StatVector::new(), None));
        assert!(RequirementSet::new().is_satisfied(&StatVector::new()));
    }

    #[test]
    fn threshold_is_inclusive() {
        let req = RequirementSet::new().with(Skill::Bravery, 2);
        assert!(!req.is_satisfied(&StatVector::new().with(Skill::Bravery, 1)));
        assert!(req.is_satisfied(&StatVector::new().with(Skill::Bravery, 2)));
        assert!(req.is_satisfied(&StatVector::new().with(Skill::Bravery, 3)));
    }

    #[test]
    fn all_thresholds_must_hold() {
        let req = RequirementSet::new()
            .with(Skill::Bravery, 3)
            .with(Skill::Empathy, 2);
        let stats = StatVector::new().with(Skill::Bravery, 3);
        assert!(!req.is_satisfied(&stats));
        assert_eq!(req.shortfall(&stats), vec![(Skill::Empathy, 2)]);
        assert!(req.is_satisfied(&stats.with(Skill::Empathy, 2)));
    }

    #[test]
    fn zero_threshold_passes_on_empty_stats() {
        let req = RequirementSet::new().with(Skill::Logic, 0);
        assert!(req.is_satisfied(&StatVector::new()));
    }

    #[test]
    fn json_roundtrip_and_unknown_key() {
        let req: RequirementSet = serde_json::from_str(r#"{"bravery": 3, "empathy": 2}"#).unwrap();
        assert_eq!(req.threshold(Skill::Bravery), Some(3));
        assert_eq!(req.threshold(Skill::Logic), None);

        let bad: Result<RequirementSet, _> = serde_json::from_str(r#"{"none": 1}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn display_lists_labels() {
        let req = RequirementSet::new()
            .with(Skill::Empathy, 2)
            .with(Skill::Bravery, 3);
        assert_eq!(req.to_string(), "Требуется: Эмпатия 2, Отвага 3");
    }

    fn stats_strategy() -> impl Strategy<Value = StatVector> {
        (0u32..6, 0u32..6, 0u32..6, 0u32..6, 0u32..6).prop_map(|(c, e, b, l, o)| StatVector {
            creativity: c,
            empathy: e,
            bravery: b,
            logic: l,
            organization: o,
        })
    }

    fn requirement_strategy() -> impl Strategy<Value = RequirementSet> {
        prop::collection::btree_map(prop::sample::select(Skill::ALL.to_vec()), 0u32..6, 0..5)
            .prop_map(RequirementSet)
    }

    proptest! {
        #[test]
        fn gate_matches_pointwise_definition(
            stats in stats_strategy(),
            req in requirement_strategy(),
        ) {
            let expected = req.iter().all(|(skill, t)| stats.get(skill) >= t);
            prop_assert_eq!(req.is_satisfied(&stats), expected);
            prop_assert_eq!(req.shortfall(&stats).is_empty(), expected);
        }
    }
}
