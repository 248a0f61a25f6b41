//! Route rounds: fill the stops between a fixed start and end.

use serde::{Deserialize, Serialize};

/// A delivery between two fixed endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRound {
    /// Fixed start.
    pub from: String,
    /// Fixed end.
    pub to: String,
    /// Stops the player may choose from.
    pub waypoints: Vec<String>,
    /// Canonical intermediate stops, endpoints excluded.
    pub route: Vec<String>,
    /// Why this route is optimal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain: Option<String>,
}

impl RouteRound {
    /// Number of intermediate slots to fill.
    pub fn slots(&self) -> usize {
        self.route.len()
    }

    /// Exact sequence equality with the canonical stops.
    pub fn check(&self, stops: &[String]) -> bool {
        stops == self.route.as_slice()
    }

    /// The full route, endpoints included.
    pub fn explanation(&self) -> Vec<String> {
        let mut path = vec![self.from.as_str()];
        path.extend(self.route.iter().map(String::as_str));
        path.push(self.to.as_str());
        let mut lines = vec![format!("Маршрут: {}", path.join(" → "))];
        lines.extend(self.explain.clone());
        lines
    }

    /// Canonical stops must come from the waypoint list, once each.
    pub fn validate(&self) -> Result<(), String> {
        if self.route.is_empty() {
            return Err("route has no intermediate stops".to_string());
        }
        for (i, stop) in self.route.iter().enumerate() {
            if !self.waypoints.contains(stop) {
                return Err(format!("route stop '{stop}' is not a waypoint"));
            }
            if self.route[..i].contains(stop) {
                return Err(format!("route stop '{stop}' repeats"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moscow() -> RouteRound {
        RouteRound {
            from: "Склад A".into(),
            to: "Москва".into(),
            waypoints: vec![
                "Владимир".into(),
                "Тверь".into(),
                "Тула".into(),
                "Рязань".into(),
            ],
            route: vec!["Тверь".into()],
            explain: None,
        }
    }

    #[test]
    fn endpoints_are_not_submitted() {
        let round = moscow();
        assert_eq!(round.slots(), 1);
        assert!(round.check(&["Тверь".to_string()]));
        assert!(!round.check(&["Тула".to_string()]));
        assert!(!round.check(&[
            "Склад A".to_string(),
            "Тверь".to_string(),
            "Москва".to_string()
        ]));
    }

    #[test]
    fn explanation_shows_full_path() {
        assert_eq!(moscow().explanation(), vec!["Маршрут: Склад A → Тверь → Москва"]);
    }

    #[test]
    fn stops_must_be_waypoints() {
        let mut round = moscow();
        round.route = vec!["Казань".into()];
        assert!(round.validate().is_err());
    }
}
