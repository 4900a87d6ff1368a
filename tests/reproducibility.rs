mod common;

use common::roster_from;
use groupforge::api::{self, EngineConfig};
use groupforge::optimizer::NoProgress;

fn mixed_roster() -> groupforge::roster::Roster {
    roster_from(&[
        &["CS", "F", "DK"],
        &["CS", "M", "DE"],
        &["EE", "F", "SE"],
        &["EE", "M", "DK"],
        &["ME", "F", "DE"],
        &["ME", "M", "SE"],
        &["CS", "F", "NO"],
        &["EE", "M", "NO"],
        &["ME", "F", "DK"],
        &["CS", "M", "SE"],
    ])
}

fn seeded_config(seed: u64) -> EngineConfig {
    EngineConfig {
        max_trials: Some(150),
        seed: Some(seed),
        ..EngineConfig::new(3)
    }
}

#[test]
fn same_seed_same_groups() {
    let roster = mixed_roster();

    let first = api::run(&roster, &seeded_config(1234), &NoProgress).unwrap();
    let second = api::run(&roster, &seeded_config(1234), &NoProgress).unwrap();

    assert_eq!(first.groups, second.groups);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.group_scores, second.group_scores);
    assert_eq!(first.trials_executed, second.trials_executed);
}

#[test]
fn seeded_runs_are_deterministic_across_configs() {
    let roster = mixed_roster();

    // A different trial budget changes what is sampled, but the run
    // itself must stay internally deterministic.
    let mut cfg = seeded_config(42);
    cfg.max_trials = Some(60);

    let first = api::run(&roster, &cfg, &NoProgress).unwrap();
    let second = api::run(&roster, &cfg, &NoProgress).unwrap();
    assert_eq!(first.groups, second.groups);
}
