//! Whole-match behaviour of the simulation driver.

use battle_content::{ContentFactory, Scenario, builtin_catalog};
use battle_core::{
    AdditionalDamageSource, AreaShape, BattleConfig, BattleEvent, Effect, FieldSide,
    InterruptAction, TargetSelection, TargetedImpact, TilePosition,
};
use battle_runtime::{FileSnapshotStore, Outcome, RuntimeConfig, RuntimeError, Simulation};

fn demo(runtime: &RuntimeConfig) -> Simulation {
    Simulation::from_scenario(
        &Scenario::demo(),
        builtin_catalog().expect("builtin catalog is valid"),
        BattleConfig::default(),
        runtime,
    )
    .expect("demo scenario deploys")
}

#[test]
fn identical_inputs_replay_identically() {
    let runtime = RuntimeConfig::new().with_max_ticks(40);
    let mut first = demo(&runtime);
    let mut second = demo(&runtime);

    let first_outcome = first.run().unwrap();
    let second_outcome = second.run().unwrap();

    assert_eq!(first_outcome, second_outcome);
    assert_eq!(first.events(), second.events());
    assert_eq!(first.state_root().unwrap(), second.state_root().unwrap());
    assert!(first.field().tick.0 <= 40);
}

#[test]
fn finished_match_rejects_further_steps() {
    let mut simulation = demo(&RuntimeConfig::new().with_max_ticks(3));
    let outcome = simulation.run().unwrap();

    let tick = simulation.field().tick;
    assert!(matches!(simulation.step(), Err(RuntimeError::Finished(o)) if o == outcome));
    assert_eq!(simulation.field().tick, tick);
}

#[test]
fn restored_snapshot_continues_like_the_original() {
    let runtime = RuntimeConfig::new().with_max_ticks(25);
    let mut original = demo(&runtime);
    for _ in 0..3 {
        original.step().unwrap();
    }

    let snapshot = original.snapshot().unwrap();
    let bytes = snapshot.encode().unwrap();
    let already_recorded = original.events().len();

    let mut restored = Simulation::restore(
        battle_runtime::Snapshot::decode(&bytes).unwrap(),
        builtin_catalog().unwrap(),
        BattleConfig::default(),
        &runtime,
    );
    assert_eq!(restored.field(), original.field());
    assert!(restored.events().is_empty());

    let original_outcome = original.run().unwrap();
    let restored_outcome = restored.run().unwrap();
    assert_eq!(original_outcome, restored_outcome);
    assert_eq!(
        &original.events().as_slice()[already_recorded..],
        restored.events().as_slice()
    );
    assert_eq!(original.state_root().unwrap(), restored.state_root().unwrap());
}

#[test]
fn snapshots_survive_the_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileSnapshotStore::new(dir.path()).unwrap();
    let mut simulation = demo(&RuntimeConfig::default());

    for _ in 0..2 {
        simulation.step().unwrap();
        store.save(&simulation.snapshot().unwrap()).unwrap();
    }

    let latest = store.latest().unwrap().expect("two snapshots were saved");
    assert_eq!(&latest.field, simulation.field());
    assert_eq!(latest.state_root, simulation.state_root().unwrap());
}

#[test]
fn interrupt_attack_lands_without_attacker() {
    let mut simulation = demo(&RuntimeConfig::default());
    let target = TilePosition::new(FieldSide::Right, 0, 0);
    let action = InterruptAction::new(
        TargetSelection::Enemy,
        Some(target),
        vec![TargetedImpact::new(
            AreaShape::Single,
            Effect::attack(3, AdditionalDamageSource::Life),
        )],
    );
    let spike = simulation.field().occupant_at(target).unwrap();
    let tick = simulation.field().tick;

    let events = simulation.interrupt(&action).unwrap().to_vec();

    assert!(events.iter().any(|event| matches!(
        event,
        BattleEvent::AttackResolved { attacker: None, target, damage: 3, .. } if *target == spike
    )));
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, BattleEvent::CounterattackResolved { .. }))
    );
    assert_eq!(simulation.field().object(spike).unwrap().life_points, 5);
    assert_eq!(simulation.field().tick, tick);
}

#[test]
fn rejected_interrupt_leaves_the_match_untouched() {
    let mut simulation = demo(&RuntimeConfig::default());
    let before = simulation.field().clone();
    let recorded = simulation.events().len();
    let action = InterruptAction::new(
        TargetSelection::Enemy,
        Some(TilePosition::new(FieldSide::Left, 0, 0)),
        vec![TargetedImpact::new(AreaShape::Single, Effect::Death)],
    );

    assert!(matches!(
        simulation.interrupt(&action),
        Err(RuntimeError::Engine(_))
    ));
    assert_eq!(simulation.field(), &before);
    assert_eq!(simulation.events().len(), recorded);
}

#[test]
fn bundled_duel_matches_the_demo() {
    let factory = ContentFactory::bundled();
    let scenario = factory.load_scenario("duel").unwrap();
    let catalog = factory.load_presets().unwrap();
    let config = factory.load_config().unwrap();
    let runtime = RuntimeConfig::new().with_max_ticks(20);

    let mut bundled = Simulation::from_scenario(&scenario, catalog, config, &runtime).unwrap();
    let mut builtin = demo(&runtime);

    assert_eq!(bundled.run().unwrap(), builtin.run().unwrap());
    assert_eq!(bundled.state_root().unwrap(), builtin.state_root().unwrap());
    assert!(matches!(
        bundled.outcome(),
        Some(Outcome::Victory(_) | Outcome::Draw | Outcome::TickLimit)
    ));
}
