//! Prioritization rounds: order tasks from most to least important.

use serde::{Deserialize, Serialize};

/// Tasks and their canonical priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizationRound {
    /// Tasks as initially listed.
    pub tasks: Vec<String>,
    /// Canonical order as task indices, most important first.
    pub order: Vec<usize>,
    /// Reason for each canonical position.
    #[serde(default)]
    pub explain: Vec<String>,
}

impl PrioritizationRound {
    /// Elementwise equality with the canonical order.
    pub fn check(&self, order: &[usize]) -> bool {
        order == self.order.as_slice()
    }

    /// Whether each submitted position holds the canonical task.
    pub fn marks(&self, order: &[usize]) -> Vec<bool> {
        self.order
            .iter()
            .enumerate()
            .map(|(i, expected)| order.get(i) == Some(expected))
            .collect()
    }

    /// "N. task: reason" per canonical position.
    pub fn explanation(&self) -> Vec<String> {
        self.order
            .iter()
            .enumerate()
            .map(|(i, &task)| {
                let name = self.tasks.get(task).map_or("?", String::as_str);
                match self.explain.get(i) {
                    Some(reason) => format!("{}. {name}: {reason}", i + 1),
                    None => format!("{}. {name}", i + 1),
                }
            })
            .collect()
    }

    /// The order must be a permutation of the task indices.
    pub fn validate(&self) -> Result<(), String> {
        let mut sorted = self.order.clone();
        sorted.sort_unstable();
        if sorted != (0..self.tasks.len()).collect::<Vec<_>>() {
            return Err(format!(
                "prioritization order {:?} is not a permutation of {} tasks",
                self.order,
                self.tasks.len()
            ));
        }
        if !self.explain.is_empty() && self.explain.len() != self.tasks.len() {
            return Err("prioritization needs one reason per position".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backlog() -> PrioritizationRound {
        PrioritizationRound {
            tasks: vec![
                "Добавить фичу".into(),
                "Исправить баг".into(),
                "Написать документацию".into(),
                "Обработать фидбек клиентов".into(),
            ],
            order: vec![1, 3, 0, 2],
            explain: vec![
                "Баги критичны.".into(),
                "Фидбек улучшает продукт.".into(),
                "Фичи после багов.".into(),
                "Документация не критична.".into(),
            ],
        }
    }

    #[test]
    fn canonical_order_only() {
        let round = backlog();
        assert!(round.check(&[1, 3, 0, 2]));
        assert!(!round.check(&[1, 3, 2, 0]));
        assert!(!round.check(&[1, 3, 0]));
    }

    #[test]
    fn explanation_per_position() {
        let lines = backlog().explanation();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "1. Исправить баг: Баги критичны.");
        assert_eq!(lines[3], "4. Написать документацию: Документация не критична.");
    }

    #[test]
    fn marks() {
        assert_eq!(backlog().marks(&[1, 3, 2, 0]), vec![true, true, false, false]);
    }

    #[test]
    fn order_must_be_permutation() {
        let mut round = backlog();
        round.order = vec![1, 1, 0, 2];
        assert!(round.validate().is_err());
    }
}
