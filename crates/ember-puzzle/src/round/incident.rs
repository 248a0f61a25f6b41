//! Incident rounds: select the services at the root of an outage.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A call graph description and its failing services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentRound {
    /// Outage description.
    pub text: String,
    /// Selectable services.
    pub services: Vec<String>,
    /// The root-cause services.
    pub root_causes: BTreeSet<String>,
    /// Why those services.
    #[serde(default)]
    pub explain: String,
}

impl IncidentRound {
    /// Exact set equality: no extras, no omissions.
    pub fn check(&self, selected: &BTreeSet<String>) -> bool {
        *selected == self.root_causes
    }

    /// The stored explanation.
    pub fn explanation(&self) -> Vec<String> {
        vec![self.explain.clone()]
    }

    /// Root causes must be non-empty and listed services.
    pub fn validate(&self) -> Result<(), String> {
        if self.root_causes.is_empty() {
            return Err("incident has no root cause".to_string());
        }
        if let Some(unknown) = self.root_causes.iter().find(|s| !self.services.contains(s)) {
            return Err(format!("root cause '{unknown}' is not a listed service"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> IncidentRound {
        IncidentRound {
            text: "A → B → C. C отдает 500.".into(),
            services: vec!["A".into(), "B".into(), "C".into()],
            root_causes: BTreeSet::from(["C".to_string()]),
            explain: "C возвращает 500.".into(),
        }
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_set_match() {
        let round = chain();
        assert!(round.check(&set(&["C"])));
        assert!(!round.check(&set(&["B", "C"])));
        assert!(!round.check(&set(&[])));
    }

    #[test]
    fn multiple_roots() {
        let mut round = chain();
        round.root_causes = set(&["B", "C"]);
        assert!(round.check(&set(&["C", "B"])));
        assert!(!round.check(&set(&["C"])));
    }

    #[test]
    fn unknown_root_is_invalid() {
        let mut round = chain();
        round.root_causes = set(&["Z"]);
        assert!(round.validate().is_err());
    }
}
