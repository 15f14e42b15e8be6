//! Effect pipeline: applies an impact's effects to the occupants of its area.
//!
//! Application is occupant-major. Affected occupants are taken in roster
//! order and every effect is applied to one occupant before moving to the
//! next. An occupant removed part-way through skips its remaining effects.

use crate::action::{AdditionalDamageSource, AreaShape, Effect, Impact, ReactionTrigger};
use crate::state::{FieldObject, ObjectId, StatusEntry, StatusFlags, TilePosition, apply_bonus};

use super::area::map_area;
use super::context::{Origin, Resolver};
use super::reactions::Trigger;
use super::targeting::resolve_target;
use super::{BattleEvent, EngineError};

/// Shield-first damage split.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DamageSplit {
    pub shield_absorbed: u32,
    pub remainder: u32,
}

impl DamageSplit {
    /// Consumes shield points first and returns what is left over.
    pub fn absorb(object: &mut FieldObject, damage: u32) -> Self {
        let shield_absorbed = damage.min(object.shield_points);
        object.shield_points -= shield_absorbed;
        Self {
            shield_absorbed,
            remainder: damage - shield_absorbed,
        }
    }
}

impl Resolver<'_, '_> {
    /// Resolves targeting for `actor` and applies the impact.
    ///
    /// `target_override` replaces the declared targeting rule (used when a
    /// reaction retargets to its invoker).
    pub(crate) fn perform_impact(
        &mut self,
        actor: ObjectId,
        impact: &Impact,
        target_override: Option<TilePosition>,
    ) -> Result<(), EngineError> {
        let Some(origin) = Origin::of(self.field, actor) else {
            return Ok(());
        };
        let target = match target_override {
            Some(target) => Some(target),
            None => resolve_target(self.field, self.env.rng(), actor, &impact.targeting),
        };
        let Some(target) = target else {
            tracing::debug!(%actor, "target unresolved");
            self.emit(BattleEvent::TargetUnresolved { actor });
            return Ok(());
        };
        self.apply_impact(&origin, Some(target), impact.area, &impact.effects)
    }

    /// Applies `effects` over the area mapped around an already resolved target.
    pub(crate) fn apply_impact(
        &mut self,
        origin: &Origin,
        target: Option<TilePosition>,
        area: AreaShape,
        effects: &[Effect],
    ) -> Result<(), EngineError> {
        for effect in effects {
            if let Effect::DrawCards { count } = effect {
                self.emit(BattleEvent::CardDrawRequested {
                    requester: origin.actor,
                    count: *count,
                });
            }
        }

        let tiles = map_area(self.field, target, area, origin);
        let occupants = self.field.occupants_of(&tiles);
        for occupant in occupants {
            for effect in effects.iter().filter(|e| !e.is_field_independent()) {
                if !self.field.contains(occupant) {
                    break;
                }
                self.apply_effect(origin, occupant, effect)?;
            }
        }
        Ok(())
    }

    fn apply_effect(
        &mut self,
        origin: &Origin,
        target: ObjectId,
        effect: &Effect,
    ) -> Result<(), EngineError> {
        tracing::trace!(effect = effect.name(), object = %target, "apply effect");
        match effect {
            Effect::Attack {
                attack_points,
                additional_damage_source,
            } => self.attack(origin, target, *attack_points, *additional_damage_source),
            Effect::ShieldScraping { points } => {
                if let Some(object) = self.field.object_mut(target) {
                    let scraped = (*points).min(object.shield_points);
                    object.shield_points -= scraped;
                    self.emit(BattleEvent::ShieldScraped {
                        target,
                        points: scraped,
                    });
                }
                Ok(())
            }
            Effect::Healing { points } => {
                if let Some(object) = self.field.object_mut(target) {
                    let before = object.life_points;
                    object.life_points = object
                        .life_points
                        .saturating_add(*points)
                        .min(object.effective_max_life_points())
                        .max(before);
                    let healed = object.life_points.saturating_sub(before);
                    self.emit(BattleEvent::Healed {
                        target,
                        points: healed,
                    });
                }
                Ok(())
            }
            Effect::LifePointsModification { delta } => {
                let Some(object) = self.field.object_mut(target) else {
                    return Ok(());
                };
                let before = object.life_points;
                object.life_points = apply_bonus(before, *delta).min(object.effective_max_life_points());
                let after = object.life_points;
                self.emit(BattleEvent::LifeChanged {
                    target,
                    delta: i64::from(after) - i64::from(before),
                });
                if after == 0 {
                    self.kill(target);
                }
                Ok(())
            }
            Effect::MaxLifePointsModification {
                delta,
                is_with_healing,
            } => {
                self.modify_max_life(target, *delta, *is_with_healing);
                Ok(())
            }
            Effect::Death => {
                self.kill(target);
                Ok(())
            }
            Effect::DrawCards { .. } => Ok(()),
            Effect::Retreat => {
                self.retreat(target);
                Ok(())
            }
            Effect::StatusApplication { status } => {
                self.apply_status(origin.actor, target, status.clone())
            }
            Effect::Absorption => {
                self.absorb(origin.actor, target);
                Ok(())
            }
        }
    }

    /// Attack value of `actor` for an attack with `base` points.
    ///
    /// One-time bonuses are consumed by the call. A missing actor (removed
    /// earlier in the impact, or an interrupt) attacks with the base points.
    fn attack_value(&mut self, actor: Option<ObjectId>, base: u32) -> u32 {
        let Some(object) = actor.and_then(|id| self.field.object_mut(id)) else {
            return base;
        };
        let statuses = &mut object.statuses;
        let mut value = i64::from(base)
            + i64::from(statuses.attack_points_bonus())
            + i64::from(statuses.one_time_attack_bonus());
        if statuses.has(StatusFlags::DOUBLE_DAMAGE) {
            value *= 2;
        }
        value += i64::from(statuses.additional_damage());
        statuses.consume_one_time_attack();
        value.clamp(0, i64::from(u32::MAX)) as u32
    }

    fn attack(
        &mut self,
        origin: &Origin,
        target: ObjectId,
        attack_points: u32,
        source: AdditionalDamageSource,
    ) -> Result<(), EngineError> {
        let damage = self.attack_value(origin.actor, attack_points);
        let Some(object) = self.field.object_mut(target) else {
            return Ok(());
        };

        let split = DamageSplit::absorb(object, damage);
        match source {
            AdditionalDamageSource::None => {}
            AdditionalDamageSource::Armor => {
                object.armor_points = object.armor_points.saturating_sub(split.remainder);
            }
            AdditionalDamageSource::Life => {
                object.life_points = object.life_points.saturating_sub(split.remainder);
            }
        }
        let survived = object.is_alive();
        // A reaction to being attacked replaces the innate counterattack.
        let counterattack = if object.reacts_to(ReactionTrigger::AttackOnOneself) {
            0
        } else {
            object.effective_counterattack_points()
        };

        tracing::debug!(
            attacker = ?origin.actor,
            object = %target,
            damage,
            shield_absorbed = split.shield_absorbed,
            "attack resolved"
        );
        self.emit(BattleEvent::AttackResolved {
            attacker: origin.actor,
            target,
            damage,
            shield_absorbed: split.shield_absorbed,
            remainder: split.remainder,
            source,
        });

        if !survived {
            self.kill(target);
        } else if let Some(attacker) = origin.actor.filter(|a| *a != target) {
            self.counterattack(target, attacker, counterattack);
        }

        self.dispatch(Trigger::AttackLanded {
            attacker: origin.actor,
            attacker_side: origin.side,
            target,
        })
    }

    /// Innate retaliation of a defender that survived an attack. Does not
    /// trigger reactions and is never itself counterattacked.
    fn counterattack(&mut self, defender: ObjectId, attacker: ObjectId, points: u32) {
        if points == 0 {
            return;
        }
        let Some(object) = self.field.object_mut(attacker) else {
            return;
        };
        let split = DamageSplit::absorb(object, points);
        object.life_points = object.life_points.saturating_sub(split.remainder);
        let survived = object.is_alive();

        self.emit(BattleEvent::CounterattackResolved {
            defender,
            attacker,
            damage: points,
            shield_absorbed: split.shield_absorbed,
        });
        if !survived {
            self.kill(attacker);
        }
    }

    fn modify_max_life(&mut self, target: ObjectId, delta: i32, with_healing: bool) {
        let Some(object) = self.field.object_mut(target) else {
            return;
        };
        object.max_life_points = apply_bonus(object.max_life_points, delta).max(1);
        if with_healing && delta > 0 {
            object.life_points = apply_bonus(object.life_points, delta);
        }
        object.clamp_life();
        let (max_life_points, life_points) = (object.max_life_points, object.life_points);
        self.emit(BattleEvent::MaxLifeChanged {
            target,
            max_life_points,
            life_points,
        });
    }

    pub(crate) fn apply_status(
        &mut self,
        applier: Option<ObjectId>,
        target: ObjectId,
        entry: StatusEntry,
    ) -> Result<(), EngineError> {
        let Some(object) = self.field.object_mut(target) else {
            return Ok(());
        };
        object.statuses.push(entry.clone());
        object.clamp_life();
        tracing::debug!(object = %target, status = entry.kind.name(), "status applied");
        self.emit(BattleEvent::StatusApplied {
            target,
            applier,
            entry,
        });
        self.dispatch(Trigger::StatusApplied { target, applier })
    }

    /// Removes `object` from the field as dead.
    pub(crate) fn kill(&mut self, object: ObjectId) {
        if self.field.remove(object).is_some() {
            tracing::debug!(%object, "object died");
            self.emit(BattleEvent::ObjectDied { object });
            self.refresh_auras();
        }
    }

    fn retreat(&mut self, object: ObjectId) {
        let Some(can_retreat) = self.field.object(object).map(FieldObject::effective_can_retreat)
        else {
            return;
        };
        if !can_retreat {
            self.emit(BattleEvent::RetreatRefused { object });
            return;
        }
        self.field.remove(object);
        self.emit(BattleEvent::ObjectRetreated { object });
        self.refresh_auras();
    }

    /// Removes `object` and grants its remaining life to `absorber` as max
    /// life points with healing.
    fn absorb(&mut self, absorber: Option<ObjectId>, object: ObjectId) {
        let absorber = absorber.filter(|id| *id != object);
        let Some(absorbed) = self.field.remove(object) else {
            return;
        };
        self.emit(BattleEvent::ObjectAbsorbed {
            absorber,
            object,
            life_points: absorbed.life_points,
        });
        if let Some(absorber) = absorber {
            let gained = i32::try_from(absorbed.life_points).unwrap_or(i32::MAX);
            self.modify_max_life(absorber, gained, true);
        }
        self.refresh_auras();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::env::{BattleEnv, FieldObjectPreset, PcgRng, PresetCatalog};
    use crate::state::{Field, FieldSide, StatusKind};

    struct Fixture {
        field: Field,
        catalog: PresetCatalog,
        config: BattleConfig,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                field: Field::new(3, 1),
                catalog: PresetCatalog::default(),
                config: BattleConfig::default(),
            }
        }

        fn place(&mut self, preset: FieldObjectPreset, side: FieldSide, column: u32) -> ObjectId {
            let id = self.field.allocate_object_id();
            let object = FieldObject::from_preset(&preset, id);
            self.field.insert(object, TilePosition::new(side, 0, column));
            id
        }

        fn hit(&mut self, actor: Option<ObjectId>, target: ObjectId, effects: &[Effect]) -> Vec<BattleEvent> {
            let env = BattleEnv::new(&self.catalog, &PcgRng, &self.config);
            let origin = match actor {
                Some(actor) => Origin::of(&self.field, actor).unwrap(),
                None => Origin::player(FieldSide::Left),
            };
            let tile = self.field.object(target).unwrap().position;
            let mut resolver = Resolver::new(&mut self.field, env);
            resolver
                .apply_impact(&origin, tile, AreaShape::Single, effects)
                .unwrap();
            resolver.into_log().into_vec()
        }
    }

    fn target_preset(shield: u32) -> FieldObjectPreset {
        FieldObjectPreset::new("target")
            .with_max_life_points(10)
            .with_armor_points(4)
            .with_shield_points(shield)
    }

    #[test]
    fn shield_absorbs_before_remainder_is_routed() {
        for (source, life, armor) in [
            (AdditionalDamageSource::None, 10, 4),
            (AdditionalDamageSource::Armor, 10, 1),
            (AdditionalDamageSource::Life, 7, 4),
        ] {
            let mut fx = Fixture::new();
            let target = fx.place(target_preset(2), FieldSide::Right, 0);
            fx.hit(None, target, &[Effect::attack(5, source)]);

            let object = fx.field.object(target).unwrap();
            assert_eq!(object.shield_points, 0, "{source}");
            assert_eq!(object.life_points, life, "{source}");
            assert_eq!(object.armor_points, armor, "{source}");
        }
    }

    #[test]
    fn small_attack_only_scrapes_shield() {
        let mut fx = Fixture::new();
        let target = fx.place(target_preset(5), FieldSide::Right, 0);
        let events = fx.hit(None, target, &[Effect::attack(3, AdditionalDamageSource::Life)]);

        let object = fx.field.object(target).unwrap();
        assert_eq!(object.shield_points, 2);
        assert_eq!(object.life_points, 10);
        assert!(matches!(
            events[0],
            BattleEvent::AttackResolved {
                shield_absorbed: 3,
                remainder: 0,
                ..
            }
        ));
    }

    #[test]
    fn attack_value_applies_modifiers_and_consumes_one_time_bonus() {
        let mut fx = Fixture::new();
        let actor = fx.place(
            FieldObjectPreset::new("actor")
                .with_status(StatusEntry::indefinite(StatusKind::AttackPointsModification(1)))
                .with_status(StatusEntry::indefinite(StatusKind::OneTimeAttackPointModification(2)))
                .with_status(StatusEntry::indefinite(StatusKind::DoubleDamageInflicted))
                .with_status(StatusEntry::indefinite(StatusKind::AdditionalDamageInflicted(1))),
            FieldSide::Left,
            0,
        );
        let target = fx.place(
            FieldObjectPreset::new("target").with_max_life_points(40),
            FieldSide::Right,
            0,
        );
        let attack = Effect::attack(3, AdditionalDamageSource::Life);

        fx.hit(Some(actor), target, &[attack.clone()]);
        // (3 + 1 + 2) * 2 + 1
        assert_eq!(fx.field.object(target).unwrap().life_points, 27);

        fx.hit(Some(actor), target, &[attack]);
        // (3 + 1) * 2 + 1
        assert_eq!(fx.field.object(target).unwrap().life_points, 18);
    }

    #[test]
    fn lethal_damage_removes_occupant_and_skips_remaining_effects() {
        let mut fx = Fixture::new();
        let target = fx.place(FieldObjectPreset::new("frail"), FieldSide::Right, 0);
        let events = fx.hit(
            None,
            target,
            &[
                Effect::attack(1, AdditionalDamageSource::Life),
                Effect::Healing { points: 5 },
            ],
        );
        assert!(!fx.field.contains(target));
        assert!(fx.field.grid(FieldSide::Right).occupied_count() == 0);
        assert!(events.contains(&BattleEvent::ObjectDied { object: target }));
        assert!(!events.iter().any(|e| matches!(e, BattleEvent::Healed { .. })));
    }

    #[test]
    fn healing_is_capped_at_max_life() {
        let mut fx = Fixture::new();
        let target = fx.place(target_preset(0), FieldSide::Left, 0);
        fx.field.object_mut(target).unwrap().life_points = 6;
        fx.hit(None, target, &[Effect::Healing { points: 100 }]);
        assert_eq!(fx.field.object(target).unwrap().life_points, 10);
    }

    #[test]
    fn life_modification_is_clamped_and_can_kill() {
        let mut fx = Fixture::new();
        let target = fx.place(target_preset(3), FieldSide::Left, 0);
        fx.hit(None, target, &[Effect::LifePointsModification { delta: 7 }]);
        assert_eq!(fx.field.object(target).unwrap().life_points, 10);

        let events = fx.hit(None, target, &[Effect::LifePointsModification { delta: -99 }]);
        assert!(!fx.field.contains(target));
        assert!(events.contains(&BattleEvent::LifeChanged { target, delta: -10 }));
    }

    #[test]
    fn max_life_modification_has_floor_and_optional_healing() {
        let mut fx = Fixture::new();
        let target = fx.place(target_preset(0), FieldSide::Left, 0);
        fx.hit(
            None,
            target,
            &[Effect::MaxLifePointsModification {
                delta: 3,
                is_with_healing: true,
            }],
        );
        let object = fx.field.object(target).unwrap();
        assert_eq!((object.max_life_points, object.life_points), (13, 13));

        fx.hit(
            None,
            target,
            &[Effect::MaxLifePointsModification {
                delta: -50,
                is_with_healing: false,
            }],
        );
        let object = fx.field.object(target).unwrap();
        assert_eq!((object.max_life_points, object.life_points), (1, 1));
    }

    #[test]
    fn shield_scraping_is_an_independent_deduction() {
        let mut fx = Fixture::new();
        let target = fx.place(target_preset(4), FieldSide::Right, 0);
        fx.hit(
            None,
            target,
            &[
                Effect::attack(3, AdditionalDamageSource::Life),
                Effect::ShieldScraping { points: 2 },
            ],
        );
        let object = fx.field.object(target).unwrap();
        assert_eq!(object.shield_points, 0);
        assert_eq!(object.life_points, 10);
    }

    #[test]
    fn retreat_respects_effective_flag() {
        let mut fx = Fixture::new();
        let stubborn = fx.place(
            FieldObjectPreset::new("stubborn").with_can_retreat(false),
            FieldSide::Left,
            0,
        );
        let events = fx.hit(None, stubborn, &[Effect::Retreat]);
        assert!(fx.field.contains(stubborn));
        assert_eq!(events, vec![BattleEvent::RetreatRefused { object: stubborn }]);

        fx.field
            .object_mut(stubborn)
            .unwrap()
            .statuses
            .push(StatusEntry::ticks(StatusKind::CanRetreatModification(true), 1));
        fx.hit(None, stubborn, &[Effect::Retreat]);
        assert!(!fx.field.contains(stubborn));
        assert_eq!(fx.field.occupant_at(TilePosition::new(FieldSide::Left, 0, 0)), None);
    }

    #[test]
    fn statuses_append_without_merging() {
        let mut fx = Fixture::new();
        let target = fx.place(target_preset(0), FieldSide::Left, 0);
        let entry = StatusEntry::ticks(StatusKind::AttackPointsModification(2), 3);
        fx.hit(None, target, &[Effect::status(entry.clone()), Effect::status(entry)]);
        let object = fx.field.object(target).unwrap();
        assert_eq!(object.statuses.len(), 2);
        assert_eq!(object.statuses.attack_points_bonus(), 4);
    }

    #[test]
    fn draw_cards_is_emitted_once_per_impact() {
        let mut fx = Fixture::new();
        let a = fx.place(target_preset(0), FieldSide::Right, 0);
        fx.place(target_preset(0), FieldSide::Right, 1);
        let env = BattleEnv::new(&fx.catalog, &PcgRng, &fx.config);
        let origin = Origin::player(FieldSide::Left);
        let tile = fx.field.object(a).unwrap().position;
        let mut resolver = Resolver::new(&mut fx.field, env);
        resolver
            .apply_impact(&origin, tile, AreaShape::Side, &[Effect::DrawCards { count: 2 }])
            .unwrap();
        let events = resolver.into_log().into_vec();
        assert_eq!(
            events,
            vec![BattleEvent::CardDrawRequested {
                requester: None,
                count: 2
            }]
        );
    }

    #[test]
    fn absorption_transfers_remaining_life() {
        let mut fx = Fixture::new();
        let eater = fx.place(
            FieldObjectPreset::new("eater").with_max_life_points(5),
            FieldSide::Left,
            0,
        );
        let meal = fx.place(
            FieldObjectPreset::new("meal").with_max_life_points(3),
            FieldSide::Left,
            1,
        );
        fx.hit(Some(eater), meal, &[Effect::Absorption]);
        assert!(!fx.field.contains(meal));
        let eater = fx.field.object(eater).unwrap();
        assert_eq!((eater.max_life_points, eater.life_points), (8, 8));
    }

    #[test]
    fn counterattack_hits_surviving_defenders_attacker() {
        let mut fx = Fixture::new();
        let attacker = fx.place(
            FieldObjectPreset::new("attacker")
                .with_max_life_points(5)
                .with_shield_points(1),
            FieldSide::Left,
            0,
        );
        let spike = fx.place(
            FieldObjectPreset::new("spike")
                .with_max_life_points(8)
                .with_counterattack_points(3),
            FieldSide::Right,
            0,
        );
        let events = fx.hit(
            Some(attacker),
            spike,
            &[Effect::attack(1, AdditionalDamageSource::Life)],
        );
        let object = fx.field.object(attacker).unwrap();
        assert_eq!((object.shield_points, object.life_points), (0, 3));
        assert!(events.contains(&BattleEvent::CounterattackResolved {
            defender: spike,
            attacker,
            damage: 3,
            shield_absorbed: 1,
        }));
    }
}
