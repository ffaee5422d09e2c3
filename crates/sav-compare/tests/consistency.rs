//! Post-load consistency checks over the full pipeline.

use sav_core::{Creature, Power};
use sav_state::{CreatureState, StateFactories};

fn scout() -> Creature {
    let mut creature = Creature::new("Scout", 42);
    creature.id = Some("Scout".into());
    creature.current_block = 3;
    creature.powers = vec![Power::new("Weak", 2)];
    creature
}

#[test]
fn diff_is_reflexive_over_capture() {
    let factories = StateFactories::new();
    let creature = scout();

    let a = CreatureState::capture(&creature, &factories).diff_encode();
    let b = CreatureState::capture(&creature, &factories).diff_encode();
    assert!(sav_compare::diff(&a, &b).unwrap());
}

#[test]
fn save_load_cycle_is_gameplay_equivalent() {
    let factories = StateFactories::new();
    let original = scout();

    let before = CreatureState::capture(&original, &factories);
    let loaded = CreatureState::decode(&before.encode(), &factories).unwrap();

    let mut reloaded = Creature::new("placeholder", 1);
    loaded.restore_into(&mut reloaded);
    let after = CreatureState::capture(&reloaded, &factories);

    assert!(sav_compare::diff(&before.diff_encode(), &after.diff_encode()).unwrap());
}

#[test]
fn health_drift_after_load_is_detected() {
    let factories = StateFactories::new();
    let original = scout();
    let before = CreatureState::capture(&original, &factories).diff_encode();

    let mut drifted = scout();
    drifted.current_health -= 1;
    let after = CreatureState::capture(&drifted, &factories).diff_encode();

    assert!(!sav_compare::diff(&before, &after).unwrap());
}

#[test]
fn scout_scenario() {
    let factories = StateFactories::new();

    // Two captures of the same creature agree.
    let a = CreatureState::capture(&scout(), &factories).diff_encode();
    let b = CreatureState::capture(&scout(), &factories).diff_encode();
    assert!(sav_compare::diff(&a, &b).unwrap());

    // Losing the block makes the pair diverge on current_block only.
    let mut blocked_down = scout();
    blocked_down.current_block = 0;
    let c = CreatureState::capture(&blocked_down, &factories).diff_encode();

    let mismatches = sav_compare::diff_records(&a, &c).unwrap();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].field, "current_block");
    assert!(!sav_compare::diff(&a, &c).unwrap());
}

#[test]
fn report_aggregates_all_divergences() {
    let factories = StateFactories::new();
    let a = CreatureState::capture(&scout(), &factories).diff_encode();

    let mut drifted = scout();
    drifted.current_health = 40;
    drifted.current_block = 0;
    let b = CreatureState::capture(&drifted, &factories).diff_encode();

    let report = sav_compare::ConsistencyReport::new(
        "pre-save vs post-load",
        sav_compare::diff_records(&a, &b).unwrap(),
    );
    assert!(!report.passed());
    assert_eq!(report.mismatches.len(), 2);
    report.print_summary();
}

#[test]
fn dead_creature_power_state_is_not_load_bearing() {
    let factories = StateFactories::new();

    let mut dead = scout();
    dead.current_health = 0;
    dead.current_block = 0;
    let a = CreatureState::capture(&dead, &factories).diff_encode();

    let mut dead_no_powers = dead.clone();
    dead_no_powers.powers.clear();
    let b = CreatureState::capture(&dead_no_powers, &factories).diff_encode();

    assert!(sav_compare::diff(&a, &b).unwrap());
}
