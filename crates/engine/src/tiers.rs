//! Tier classification.
//!
//! Maps a point total to a human-readable rank label. The threshold table is
//! configuration, not code: historical deployments shipped divergent ladders,
//! so the table is validated at startup and the built-in default is only a
//! fallback.

use serde::{Deserialize, Serialize};

use crate::error::TierTableError;

/// One rung of the ladder: `label` applies to every total `>= min_points`
/// not claimed by a higher rung.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub min_points: i64,
    pub label: String,
}

/// Ordered tier table, highest threshold first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    /// Validates and builds a table.
    ///
    /// Thresholds must be strictly descending and the last one must be zero,
    /// so that every non-negative total maps to exactly one label.
    pub fn new(tiers: Vec<Tier>) -> Result<Self, TierTableError> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }
        for pair in tiers.windows(2) {
            if pair[0].min_points <= pair[1].min_points {
                return Err(TierTableError::NotDescending {
                    upper: pair[0].min_points,
                    lower: pair[1].min_points,
                });
            }
        }
        let floor = tiers[tiers.len() - 1].min_points;
        if floor != 0 {
            return Err(TierTableError::MissingFloor(floor));
        }
        Ok(Self { tiers })
    }

    /// First tier whose threshold the total reaches, scanning from the top.
    pub fn classify(&self, points: i64) -> &str {
        self.tiers
            .iter()
            .find(|tier| points >= tier.min_points)
            .unwrap_or(&self.tiers[self.tiers.len() - 1])
            .label
            .as_str()
    }
}

impl Default for TierTable {
    /// The historical six-tier ladder.
    fn default() -> Self {
        let tiers = [
            (1000, "Financial Champion"),
            (750, "Guardian of the Vault"),
            (500, "Financial Expert"),
            (250, "Halfway Wealthy"),
            (100, "Junior Saver"),
            (0, "Keep Up"),
        ]
        .into_iter()
        .map(|(min_points, label)| Tier {
            min_points,
            label: label.to_string(),
        })
        .collect();

        Self { tiers }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tier(min_points: i64, label: &str) -> Tier {
        Tier {
            min_points,
            label: label.to_string(),
        }
    }

    #[test]
    fn default_ladder_boundaries() {
        let table = TierTable::default();
        assert_eq!(table.classify(0), "Keep Up");
        assert_eq!(table.classify(99), "Keep Up");
        assert_eq!(table.classify(100), "Junior Saver");
        assert_eq!(table.classify(120), "Junior Saver");
        assert_eq!(table.classify(249), "Junior Saver");
        assert_eq!(table.classify(250), "Halfway Wealthy");
        assert_eq!(table.classify(500), "Financial Expert");
        assert_eq!(table.classify(750), "Guardian of the Vault");
        assert_eq!(table.classify(999), "Guardian of the Vault");
        assert_eq!(table.classify(1000), "Financial Champion");
        assert_eq!(table.classify(1_000_000), "Financial Champion");
    }

    #[test]
    fn classification_is_monotonic_and_total() {
        let table = TierTable::default();
        let rank = |points: i64| {
            [
                "Keep Up",
                "Junior Saver",
                "Halfway Wealthy",
                "Financial Expert",
                "Guardian of the Vault",
                "Financial Champion",
            ]
            .iter()
            .position(|l| *l == table.classify(points))
            .unwrap()
        };

        let mut last = 0;
        for points in 0..=1100 {
            let current = rank(points);
            assert!(current >= last, "rank dropped at {points}");
            last = current;
        }
    }

    #[test]
    fn configured_table_with_low_top_threshold() {
        // A deployment variant whose top rung starts at 100 points.
        let table = TierTable::new(vec![
            tier(100, "Champion"),
            tier(50, "Saver"),
            tier(0, "Starter"),
        ])
        .unwrap();

        assert_eq!(table.classify(120), "Champion");
        assert_eq!(table.classify(50), "Saver");
        assert_eq!(table.classify(0), "Starter");
    }

    #[test]
    fn rejects_empty_table() {
        assert!(matches!(TierTable::new(vec![]), Err(TierTableError::Empty)));
    }

    #[test]
    fn rejects_non_descending_thresholds() {
        let err = TierTable::new(vec![tier(100, "a"), tier(100, "b"), tier(0, "c")]).unwrap_err();
        assert!(matches!(err, TierTableError::NotDescending { .. }));
    }

    #[test]
    fn rejects_table_without_zero_floor() {
        let err = TierTable::new(vec![tier(100, "a"), tier(10, "b")]).unwrap_err();
        assert!(matches!(err, TierTableError::MissingFloor(10)));
    }
}
