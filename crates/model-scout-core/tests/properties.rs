use model_scout_core::model::Entity;
use model_scout_core::score::{normalize, score};
use model_scout_core::weights::WeightSet;
use proptest::prelude::*;

fn entity_strategy() -> impl Strategy<Value = (f64, f64, f64)> {
    (-50.0..150.0f64, -100.0..700.0f64, -50.0..150.0f64)
}

proptest! {
    #[test]
    fn at_or_below_zero_clamps(value in -1e6..=0.0f64, max in 1.0..1000.0f64) {
        prop_assert_eq!(normalize(value, max, true), 0.0);
        prop_assert_eq!(normalize(value, max, false), 1.0);
    }

    #[test]
    fn at_or_above_max_clamps(max in 1.0..1000.0f64, excess in 0.0..1e6f64) {
        prop_assert_eq!(normalize(max + excess, max, true), 1.0);
        prop_assert_eq!(normalize(max + excess, max, false), 0.0);
    }

    #[test]
    fn directions_are_complementary(max in 1.0..1000.0f64, frac in 0.0..=1.0f64) {
        let value = max * frac;
        let sum = normalize(value, max, true) + normalize(value, max, false);
        prop_assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_stays_in_unit_range(value in any::<f64>(), max in 1.0..1000.0f64, up in any::<bool>()) {
        let n = normalize(value, max, up);
        prop_assert!((0.0..=1.0).contains(&n));
    }

    #[test]
    fn ranking_is_descending(
        raw in prop::collection::vec(entity_strategy(), 0..20),
        wi in 0.0..10.0f64,
        ws in 0.0..10.0f64,
        wc in 0.0..10.0f64,
    ) {
        let models: Vec<Entity> = raw
            .iter()
            .enumerate()
            .map(|(i, &(a, b, c))| Entity::new(format!("m{i}"), a, b, c))
            .collect();
        let weights = WeightSet::new(wi, ws, wc).unwrap();
        let ranked = score(&models, &weights);
        prop_assert_eq!(ranked.len(), models.len());
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn normalized_weights_bound_totals(
        (a, b, c) in entity_strategy(),
        wi in 0.01..10.0f64,
        ws in 0.0..10.0f64,
        wc in 0.0..10.0f64,
    ) {
        let weights = WeightSet::new(wi, ws, wc).unwrap().normalized().unwrap();
        prop_assert!((weights.sum() - 1.0).abs() < 1e-9);
        let ranked = score(&[Entity::new("m", a, b, c)], &weights);
        prop_assert!(ranked[0].total >= 0.0 && ranked[0].total <= 1.0 + 1e-9);
    }
}
