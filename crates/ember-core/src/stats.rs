//! Skill keys and the five-skill stat vector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One of the five fixed skill keys a player accumulates points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    /// Creativity (Креатив).
    Creativity,
    /// Empathy (Эмпатия).
    Empathy,
    /// Bravery (Отвага).
    Bravery,
    /// Logic (Логика).
    Logic,
    /// Organization (Организация).
    Organization,
}

impl Skill {
    /// Every skill, in display order.
    pub const ALL: [Skill; 5] = [
        Skill::Creativity,
        Skill::Empathy,
        Skill::Bravery,
        Skill::Logic,
        Skill::Organization,
    ];

    /// The serialized key (`"creativity"`, `"empathy"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::Creativity => "creativity",
            Self::Empathy => "empathy",
            Self::Bravery => "bravery",
            Self::Logic => "logic",
            Self::Organization => "organization",
        }
    }

    /// Player-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Creativity => "Креатив",
            Self::Empathy => "Эмпатия",
            Self::Bravery => "Отвага",
            Self::Logic => "Логика",
            Self::Organization => "Организация",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Skill {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Skill::ALL
            .into_iter()
            .find(|skill| skill.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownSkill(s.to_string()))
    }
}

/// Point tally across all five skills.
///
/// Every key is always present and never negative. Missing keys in a
/// serialized vector read back as zero, so older or partial saves merge
/// over the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatVector {
    /// Creativity points.
    pub creativity: u32,
    /// Empathy points.
    pub empathy: u32,
    /// Bravery points.
    pub bravery: u32,
    /// Logic points.
    pub logic: u32,
    /// Organization points.
    pub organization: u32,
}

impl StatVector {
    /// A vector with every skill at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one skill to an absolute value (builder style).
    pub fn with(mut self, skill: Skill, value: u32) -> Self {
        *self.slot_mut(skill) = value;
        self
    }

    /// Current value of a skill.
    pub fn get(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Creativity => self.creativity,
            Skill::Empathy => self.empathy,
            Skill::Bravery => self.bravery,
            Skill::Logic => self.logic,
            Skill::Organization => self.organization,
        }
    }

    /// Add points to one skill in place.
    pub fn add(&mut self, skill: Skill, delta: u32) {
        let slot = self.slot_mut(skill);
        *slot = slot.saturating_add(delta);
    }

    /// Return a copy with points added to one skill.
    pub fn incremented(&self, skill: Skill, delta: u32) -> Self {
        let mut next = *self;
        next.add(skill, delta);
        next
    }

    /// Add every skill of `other` into this vector.
    pub fn merge(&mut self, other: &StatVector) {
        for skill in Skill::ALL {
            self.add(skill, other.get(skill));
        }
    }

    /// Zero every skill. Only a new playthrough does this.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Iterate `(skill, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, u32)> + '_ {
        Skill::ALL.into_iter().map(|skill| (skill, self.get(skill)))
    }

    /// Sum of all skills.
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, v)| v).sum()
    }

    fn slot_mut(&mut self, skill: Skill) -> &mut u32 {
        match skill {
            Skill::Creativity => &mut self.creativity,
            Skill::Empathy => &mut self.empathy,
            Skill::Bravery => &mut self.bravery,
            Skill::Logic => &mut self.logic,
            Skill::Organization => &mut self.organization,
        }
    }
}

impl fmt::Display for StatVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(skill, value)| format!("{}: {value}", skill.label()))
            .collect();
        f.write_str(&parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_vector_is_zeroed() {
        let stats = StatVector::new();
        for skill in Skill::ALL {
            assert_eq!(stats.get(skill), 0);
        }
        assert_eq!(stats.total(), 0);
    }

    #[test]
    fn incremented_leaves_original_untouched() {
        let stats = StatVector::new();
        let next = stats.incremented(Skill::Bravery, 1);
        assert_eq!(stats.bravery, 0);
        assert_eq!(next.bravery, 1);
    }

    #[test]
    fn merge_is_additive() {
        let mut a = StatVector::new().with(Skill::Logic, 2);
        let b = StatVector::new()
            .with(Skill::Logic, 1)
            .with(Skill::Empathy, 3);
        a.merge(&b);
        assert_eq!(a.logic, 3);
        assert_eq!(a.empathy, 3);
    }

    #[test]
    fn reset_zeroes_everything() {
        let mut stats = StatVector::new().with(Skill::Creativity, 5);
        stats.reset();
        assert_eq!(stats, StatVector::default());
    }

    #[test]
    fn partial_json_fills_missing_keys() {
        let stats: StatVector = serde_json::from_str(r#"{"bravery": 2}"#).unwrap();
        assert_eq!(stats.bravery, 2);
        assert_eq!(stats.logic, 0);
    }

    #[test]
    fn negative_json_value_is_rejected() {
        let parsed: Result<StatVector, _> = serde_json::from_str(r#"{"bravery": -1}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn skill_from_str() {
        assert_eq!("Bravery".parse::<Skill>().unwrap(), Skill::Bravery);
        assert!("none".parse::<Skill>().is_err());
    }

    #[test]
    fn display_uses_labels() {
        let stats = StatVector::new().with(Skill::Bravery, 2);
        let text = stats.to_string();
        assert!(text.contains("Отвага: 2"));
        assert!(text.starts_with("Креатив: 0"));
    }

    fn skill_strategy() -> impl Strategy<Value = Skill> {
        prop::sample::select(Skill::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn accumulation_order_does_not_matter(
            deltas in prop::collection::vec((skill_strategy(), 0u32..5), 0..20)
        ) {
            let mut forward = StatVector::new();
            for (skill, d) in &deltas {
                forward.add(*skill, *d);
            }
            let mut backward = StatVector::new();
            for (skill, d) in deltas.iter().rev() {
                backward.add(*skill, *d);
            }
            prop_assert_eq!(forward, backward);
        }
    }
}
