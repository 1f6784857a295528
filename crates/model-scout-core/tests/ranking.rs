use model_scout_core::dataset::load_bundled_dataset;
use model_scout_core::model::Entity;
use model_scout_core::score::{score, score_entity};
use model_scout_core::weights::WeightSet;

fn make_model(name: &str, intelligence: f64, speed: f64, cost: f64) -> Entity {
    Entity::new(name, intelligence, speed, cost)
}

fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}

#[test]
fn nova_micro_beats_gpt4o() {
    let weights = WeightSet::new(0.4, 0.4, 0.2).unwrap();
    let ranked = score(
        &[
            make_model("Nova Micro", 82.0, 316.0, 12.0),
            make_model("GPT-4o", 90.0, 125.0, 20.0),
        ],
        &weights,
    );

    assert_eq!(ranked.len(), 2);
    let nova = &ranked[0];
    assert_eq!(nova.name(), "Nova Micro");
    assert_close(nova.normalized.intelligence, 0.82, "nova intel norm");
    assert_close(nova.normalized.speed, 0.632, "nova speed norm");
    assert_close(nova.normalized.cost, 0.88, "nova cost norm");
    assert_close(nova.weighted.intelligence, 0.328, "nova intel weighted");
    assert_close(nova.weighted.speed, 0.2528, "nova speed weighted");
    assert_close(nova.weighted.cost, 0.176, "nova cost weighted");
    assert_close(nova.total, 0.7568, "nova total");

    let gpt = &ranked[1];
    assert_eq!(gpt.name(), "GPT-4o");
    assert_close(gpt.normalized.intelligence, 0.90, "gpt intel norm");
    assert_close(gpt.normalized.speed, 0.25, "gpt speed norm");
    assert_close(gpt.normalized.cost, 0.80, "gpt cost norm");
    assert_close(gpt.weighted.intelligence, 0.36, "gpt intel weighted");
    assert_close(gpt.weighted.speed, 0.10, "gpt speed weighted");
    assert_close(gpt.weighted.cost, 0.16, "gpt cost weighted");
    assert_close(gpt.total, 0.62, "gpt total");
}

#[test]
fn bundled_dataset_ranking() {
    let ds = load_bundled_dataset().unwrap();
    let names: Vec<String> = ds.score().iter().map(|s| s.name().to_string()).collect();
    assert_eq!(
        names,
        [
            "Nova Micro",
            "Gemini 2.0 Flash",
            "Command R",
            "GPT-4o",
            "Claude 3 Sonnet",
            "Claude 3 Opus",
            "Mistral Large",
            "Llama 3.1 70B",
        ]
    );
}

#[test]
fn cost_heavy_weights_favor_cheap_models() {
    let ds = load_bundled_dataset().unwrap();
    let weights = WeightSet::new(0.0, 0.0, 1.0).unwrap();
    let ranked = score(&ds.models, &weights);
    assert_eq!(ranked[0].name(), "Mistral Large");
    assert_eq!(ranked.last().unwrap().name(), "Claude 3 Opus");
}

#[test]
fn equal_normalized_values_tie() {
    // Both clamp to the same normalized readings.
    let a = make_model("over", 150.0, 900.0, -20.0);
    let b = make_model("at-cap", 100.0, 500.0, 0.0);
    let w = WeightSet::equal();
    assert_eq!(score_entity(&a, &w).total, score_entity(&b, &w).total);

    let ranked = score(&[a, b], &w);
    assert_eq!(ranked[0].name(), "over");
    assert_eq!(ranked[1].name(), "at-cap");
}

#[test]
fn total_is_sum_of_contributions() {
    let w = WeightSet::new(0.7, 0.2, 0.1).unwrap();
    let s = score_entity(&make_model("m", 33.0, 410.0, 61.0), &w);
    assert_close(
        s.total,
        s.weighted.intelligence + s.weighted.speed + s.weighted.cost,
        "total",
    );
    assert_close(s.weighted.speed, 0.2 * 0.82, "speed contribution");
}

#[test]
fn scoring_does_not_touch_input() {
    let models = vec![make_model("a", 10.0, 10.0, 10.0), make_model("b", 90.0, 90.0, 90.0)];
    let before = models.clone();
    let _ = score(&models, &WeightSet::DEFAULT);
    assert_eq!(models, before);
}
