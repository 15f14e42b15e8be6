//! Built-in field object presets.

use battle_core::{
    AdditionalDamageSource, AreaShape, AutoAction, CatalogError, Effect, FieldObjectPreset, Impact,
    PresetCatalog, Priority, ReactionContent, ReactionTrigger, RelativeSide, Skill, StatusEntry,
    StatusKind, Targeting,
};

/// Front-most enemy in the actor's row.
fn attack_targeting(priority: Priority) -> Targeting {
    Targeting::HorizontalDirection {
        side: RelativeSide::Enemy,
        priority,
        is_excluding_oneself: true,
        does_search_other_rows: false,
    }
}

/// Single-target attack followed by a one-point shield scrape.
fn attack_impact(attack_points: u32, priority: Priority, additional: Vec<Effect>) -> Impact {
    let mut effects = vec![
        Effect::attack(attack_points, AdditionalDamageSource::Life),
        Effect::ShieldScraping { points: 1 },
    ];
    effects.extend(additional);
    Impact::new(attack_targeting(priority), AreaShape::Single, effects)
}

fn booshu() -> FieldObjectPreset {
    let heal_allies = Impact::new(
        Targeting::SelfTile,
        AreaShape::SideExcludingOneself,
        vec![Effect::Healing { points: 3 }],
    );
    FieldObjectPreset::new("booshu")
        .with_max_life_points(4)
        .with_auto_action(AutoAction::new(
            6,
            1,
            [attack_impact(3, Priority::FrontToBack, vec![]), heal_allies],
        ))
}

fn lil_gazi() -> FieldObjectPreset {
    FieldObjectPreset::new("lilGazi")
        .with_max_life_points(4)
        .with_auto_action(AutoAction::new(
            4,
            1,
            [attack_impact(4, Priority::FrontToBack, vec![])],
        ))
        .with_skill(Skill::StatusOnFormationChange {
            targeting: Targeting::SelfTile,
            area: AreaShape::SideExcludingOneself,
            statuses: vec![StatusEntry::indefinite(
                StatusKind::AttackPointsModification(1),
            )],
        })
}

fn loki() -> FieldObjectPreset {
    let double_damage = Effect::status(StatusEntry::ticks(StatusKind::DoubleDamageInflicted, 1));
    FieldObjectPreset::new("loki")
        .with_max_life_points(5)
        .with_auto_action(AutoAction::new(
            3,
            1,
            [attack_impact(2, Priority::Random, vec![double_damage])],
        ))
}

fn sneezle() -> FieldObjectPreset {
    let draw = Impact::new(
        Targeting::SelfTile,
        AreaShape::Single,
        vec![Effect::DrawCards { count: 1 }],
    );
    FieldObjectPreset::new("sneezle")
        .with_max_life_points(6)
        .with_auto_action(AutoAction::new(
            3,
            1,
            [attack_impact(2, Priority::FrontToBack, vec![])],
        ))
        .with_skill(Skill::reaction(
            ReactionTrigger::AttackOnOneself,
            ReactionContent::ImpactPerforming { impact: draw },
        ))
}

fn snoof() -> FieldObjectPreset {
    let freeze = Effect::status(StatusEntry::ticks(StatusKind::AutoActionWaitFrozen, 1));
    FieldObjectPreset::new("snoof")
        .with_max_life_points(3)
        .with_auto_action(AutoAction::new(
            3,
            1,
            [attack_impact(3, Priority::FrontToBack, vec![freeze])],
        ))
}

fn spike() -> FieldObjectPreset {
    FieldObjectPreset::new("spike")
        .with_max_life_points(8)
        .with_counterattack_points(2)
        .with_can_retreat(false)
}

/// The catalog shipped with the game, in declaration order.
///
/// # Errors
///
/// Returns [`CatalogError::DuplicatePreset`] if two built-in presets share an id.
pub fn builtin_catalog() -> Result<PresetCatalog, CatalogError> {
    PresetCatalog::new(vec![
        booshu(),
        lil_gazi(),
        loki(),
        sneezle(),
        snoof(),
        spike(),
        FieldObjectPreset::new("tester"),
    ])
}
