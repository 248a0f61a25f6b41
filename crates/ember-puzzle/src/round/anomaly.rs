//! Anomaly rounds: pick the row that does not fit.

use serde::{Deserialize, Serialize};

use super::WorkedExample;

/// A labelled measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRow {
    /// Row label (day, site, year...).
    pub label: String,
    /// Measured value.
    pub value: i64,
}

impl DataRow {
    /// A row.
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A table with exactly one anomalous row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyRound {
    /// The data table.
    pub rows: Vec<DataRow>,
    /// Index of the anomalous row.
    pub answer: usize,
    /// Why that row stands out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
    /// Sample shown before the round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<WorkedExample>,
}

impl AnomalyRound {
    /// A round with no explanation or example.
    pub fn new(rows: Vec<DataRow>, answer: usize) -> Self {
        Self {
            rows,
            answer,
            explain: None,
            example: None,
        }
    }

    /// Whether `row` is the anomaly.
    pub fn check(&self, row: usize) -> bool {
        row == self.answer
    }

    /// Name the anomalous row.
    pub fn explanation(&self) -> Vec<String> {
        if let Some(explain) = &self.explain {
            return vec![explain.clone()];
        }
        match self.rows.get(self.answer) {
            Some(row) => vec![format!("Аномалия: {} ({})", row.label, row.value)],
            None => Vec::new(),
        }
    }

    /// The answer must index an existing row.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows.len() < 2 {
            return Err("anomaly round needs at least two rows".to_string());
        }
        if self.answer >= self.rows.len() {
            return Err(format!(
                "anomaly answer {} is out of range (0..{})",
                self.answer,
                self.rows.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn months() -> AnomalyRound {
        AnomalyRound::new(
            vec![
                DataRow::new("Январь", 5000),
                DataRow::new("Февраль", 5200),
                DataRow::new("Март", 5100),
                DataRow::new("Апрель", 15000),
                DataRow::new("Май", 5300),
            ],
            3,
        )
    }

    #[test]
    fn exact_index() {
        let round = months();
        assert!(round.check(3));
        assert!(!round.check(4));
    }

    #[test]
    fn default_explanation_names_row() {
        assert_eq!(months().explanation(), vec!["Аномалия: Апрель (15000)"]);
    }

    #[test]
    fn answer_out_of_range() {
        let mut round = months();
        round.answer = 5;
        assert!(round.validate().is_err());
    }
}
