use serde::{Deserialize, Serialize};

use crate::model::{Entity, Factor};
use crate::weights::WeightSet;

/// Intelligence index ceiling.
pub const INTELLIGENCE_MAX: f64 = 100.0;
/// Tokens per second ceiling.
pub const SPEED_MAX: f64 = 500.0;
/// USD per 1M tokens ceiling.
pub const COST_MAX: f64 = 100.0;

/// Scale ceiling and direction for one factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationRange {
    pub max: f64,
    pub higher_is_better: bool,
}

impl NormalizationRange {
    pub fn for_factor(factor: Factor) -> Self {
        match factor {
            Factor::Intelligence => Self {
                max: INTELLIGENCE_MAX,
                higher_is_better: true,
            },
            Factor::Speed => Self {
                max: SPEED_MAX,
                higher_is_better: true,
            },
            Factor::Cost => Self {
                max: COST_MAX,
                higher_is_better: false,
            },
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        normalize(value, self.max, self.higher_is_better)
    }
}

/// Map a raw reading onto a 0-1 goodness scale.
///
/// The value is clamped to `[0, max_bound]` first, so out-of-range input is
/// never an error. For lower-is-better metrics the scale is inverted. NaN
/// maps to 0 in both directions.
pub fn normalize(value: f64, max_bound: f64, higher_is_better: bool) -> f64 {
    debug_assert!(max_bound > 0.0, "max_bound must be positive");
    if value.is_nan() {
        return 0.0;
    }
    // + 0.0 folds a -0.0 reading into 0.0
    let ratio = (value.clamp(0.0, max_bound) + 0.0) / max_bound;
    if higher_is_better {
        ratio
    } else {
        1.0 - ratio
    }
}

/// Per-factor values, either normalized goodness or weighted contribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorScores {
    pub intelligence: f64,
    pub speed: f64,
    pub cost: f64,
}

impl FactorScores {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Intelligence => self.intelligence,
            Factor::Speed => self.speed,
            Factor::Cost => self.cost,
        }
    }

    pub fn sum(&self) -> f64 {
        self.intelligence + self.speed + self.cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEntity {
    #[serde(flatten)]
    pub entity: Entity,
    pub normalized: FactorScores,
    pub weighted: FactorScores,
    pub total: f64,
}

impl ScoredEntity {
    pub fn name(&self) -> &str {
        &self.entity.name
    }
}

/// Score a single model without ranking.
pub fn score_entity(entity: &Entity, weights: &WeightSet) -> ScoredEntity {
    let norm = |f: Factor| NormalizationRange::for_factor(f).apply(entity.raw(f));
    let normalized = FactorScores {
        intelligence: norm(Factor::Intelligence),
        speed: norm(Factor::Speed),
        cost: norm(Factor::Cost),
    };
    let weighted = FactorScores {
        intelligence: weights.intelligence * normalized.intelligence,
        speed: weights.speed * normalized.speed,
        cost: weights.cost * normalized.cost,
    };
    ScoredEntity {
        entity: entity.clone(),
        normalized,
        weighted,
        total: weighted.sum(),
    }
}

/// Score every model and rank by total, best first.
///
/// The sort is stable, so models with equal totals keep their input order.
pub fn score(entities: &[Entity], weights: &WeightSet) -> Vec<ScoredEntity> {
    tracing::debug!(count = entities.len(), %weights, "scoring models");
    let mut scored: Vec<ScoredEntity> = entities
        .iter()
        .map(|e| score_entity(e, weights))
        .collect();
    scored.sort_by(|a, b| rank_key(b.total).total_cmp(&rank_key(a.total)));
    scored
}

// NaN totals (only reachable with non-finite weights) sink to the bottom,
// and -0.0 ranks equal to 0.0.
fn rank_key(total: f64) -> f64 {
    if total.is_nan() {
        f64::NEG_INFINITY
    } else {
        total + 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalize_clamps_both_ends() {
        assert_eq!(normalize(-10.0, 100.0, true), 0.0);
        assert_eq!(normalize(-10.0, 100.0, false), 1.0);
        assert_eq!(normalize(250.0, 100.0, true), 1.0);
        assert_eq!(normalize(250.0, 100.0, false), 0.0);
    }

    #[test]
    fn normalize_inverts_for_lower_is_better() {
        assert!(close(normalize(12.0, 100.0, false), 0.88));
        assert!(close(normalize(316.0, 500.0, true), 0.632));
    }

    #[test]
    fn negative_zero_normalizes_to_positive_zero() {
        let n = normalize(-0.0, 100.0, true);
        assert!(n == 0.0 && n.is_sign_positive());
        assert_eq!(format!("{n}"), "0");
        assert_eq!(normalize(-0.0, 100.0, false), 1.0);
    }

    #[test]
    fn normalize_nan_is_worst() {
        assert_eq!(normalize(f64::NAN, 100.0, true), 0.0);
        assert_eq!(normalize(f64::NAN, 100.0, false), 0.0);
    }

    #[test]
    fn ranges_match_factors() {
        assert_eq!(NormalizationRange::for_factor(Factor::Intelligence).max, 100.0);
        assert_eq!(NormalizationRange::for_factor(Factor::Speed).max, 500.0);
        let cost = NormalizationRange::for_factor(Factor::Cost);
        assert_eq!(cost.max, 100.0);
        assert!(!cost.higher_is_better);
    }

    #[test]
    fn negative_cost_is_maximal_goodness() {
        let s = score_entity(&Entity::new("free", 50.0, 100.0, -5.0), &WeightSet::DEFAULT);
        assert_eq!(s.normalized.cost, 1.0);
        assert!(close(s.weighted.cost, 0.2));
    }

    #[test]
    fn empty_input_empty_output() {
        assert!(score(&[], &WeightSet::DEFAULT).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let models = vec![
            Entity::new("first", 50.0, 250.0, 50.0),
            Entity::new("better", 90.0, 400.0, 5.0),
            Entity::new("second", 50.0, 250.0, 50.0),
            Entity::new("third", 50.0, 250.0, 50.0),
        ];
        let ranked = score(&models, &WeightSet::equal());
        let names: Vec<&str> = ranked.iter().map(|s| s.name()).collect();
        assert_eq!(names, ["better", "first", "second", "third"]);
    }

    #[test]
    fn nan_total_ranks_last() {
        let weights = WeightSet {
            intelligence: f64::INFINITY,
            speed: 0.0,
            cost: 0.0,
        };
        let models = vec![
            Entity::new("zero-intel", 0.0, 100.0, 10.0),
            Entity::new("some-intel", 10.0, 100.0, 10.0),
        ];
        let ranked = score(&models, &weights);
        assert_eq!(ranked[0].name(), "some-intel");
        assert!(ranked[1].total.is_nan());
    }

    #[test]
    fn unnormalized_weights_exceed_one() {
        let weights = WeightSet::new(1.0, 1.0, 1.0).unwrap();
        let s = score_entity(&Entity::new("max", 100.0, 500.0, 0.0), &weights);
        assert!(close(s.total, 3.0));
    }
}
