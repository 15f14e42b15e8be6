//! Mid-match snapshots survive a bincode round trip exactly.
#![cfg(feature = "serde")]

use battle_core::{
    AdditionalDamageSource, AreaShape, AutoAction, BattleConfig, BattleEngine, BattleEnv, Effect,
    Field, FieldObjectPreset, FieldSide, Impact, InterruptAction, PcgRng, PresetCatalog,
    StatusEntry, StatusKind, TargetSelection, TargetedImpact, Targeting, TilePosition,
};

#[test]
fn field_round_trips_mid_match() {
    let attack = Impact::new(
        Targeting::front_enemy(),
        AreaShape::Single,
        vec![Effect::attack(1, AdditionalDamageSource::Life)],
    );
    let catalog = PresetCatalog::new(vec![
        FieldObjectPreset::new("walker")
            .with_max_life_points(9)
            .with_auto_action(AutoAction::new(2, 1, [attack])),
        FieldObjectPreset::new("wall").with_max_life_points(20),
    ])
    .unwrap();
    let config = BattleConfig::default();
    let env = BattleEnv::new(&catalog, &PcgRng, &config);

    let mut field = Field::with_seed(5, 3, 2);
    let mut engine = BattleEngine::new(&mut field);
    engine
        .spawn(env, "walker", TilePosition::new(FieldSide::Left, 0, 0))
        .unwrap();
    engine
        .spawn(env, "wall", TilePosition::new(FieldSide::Right, 0, 1))
        .unwrap();
    engine
        .spawn(env, "wall", TilePosition::new(FieldSide::Right, 1, 0))
        .unwrap();
    engine
        .apply_interrupt_action(
            env,
            &InterruptAction::new(
                TargetSelection::Enemy,
                Some(TilePosition::new(FieldSide::Right, 0, 1)),
                vec![TargetedImpact::new(
                    AreaShape::Side,
                    Effect::status(StatusEntry::ticks(StatusKind::Sealed, 4)),
                )],
            ),
        )
        .unwrap();
    for _ in 0..3 {
        engine.advance_tick(env).unwrap();
    }

    let bytes = bincode::serialize(&field).unwrap();
    let restored: Field = bincode::deserialize(&bytes).unwrap();

    assert_eq!(restored, field);
    let ids = |f: &Field| f.roster().iter().map(|o| o.id).collect::<Vec<_>>();
    assert_eq!(ids(&restored), ids(&field));
    for object in restored.roster() {
        let position = object.position.unwrap();
        assert_eq!(restored.occupant_at(position), Some(object.id));
    }
    let remaining: Vec<_> = restored
        .roster()
        .iter()
        .flat_map(|o| o.statuses.iter().map(|e| e.duration))
        .collect();
    assert_eq!(
        remaining,
        vec![
            battle_core::Duration::Ticks(1),
            battle_core::Duration::Ticks(1)
        ]
    );
    assert_eq!(restored.state_root().unwrap(), field.state_root().unwrap());

    // Both copies keep resolving identically.
    let mut replay = restored.clone();
    BattleEngine::new(&mut field).advance_tick(env).unwrap();
    BattleEngine::new(&mut replay).advance_tick(env).unwrap();
    assert_eq!(field, replay);
}
