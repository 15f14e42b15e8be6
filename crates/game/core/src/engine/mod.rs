//! Resolution engine.
//!
//! [`BattleEngine`] is the only writer of a [`Field`]. Each entry point
//! resolves on a scratch copy of the field and commits it only when the
//! whole operation succeeded, so callers never observe a partially applied
//! tick or interrupt.
//!
//! Per tick, the scheduler fires matured auto-actions in roster order; each
//! impact runs targeting, area mapping and the effect pipeline, and any
//! reactions it triggers are resolved synchronously through the same path.
//! The status lifecycle closes the tick.

mod area;
mod context;
mod errors;
mod events;
mod lifecycle;
mod pipeline;
mod reactions;
mod scheduler;
mod targeting;

pub use errors::EngineError;
pub use events::{BattleEvent, EventLog};
pub use targeting::resolve_target;

use crate::action::{InterruptAction, TargetSelection};
use crate::env::BattleEnv;
use crate::state::{Field, FieldObject, ObjectId, TilePosition};

use context::{Origin, Resolver};
use reactions::Trigger;

pub struct BattleEngine<'a> {
    field: &'a mut Field,
}

impl<'a> BattleEngine<'a> {
    pub fn new(field: &'a mut Field) -> Self {
        Self { field }
    }

    pub fn field(&self) -> &Field {
        self.field
    }

    /// Places `object` on `position`, refreshes auras and fires entry
    /// reactions.
    ///
    /// # Errors
    ///
    /// Fails if the position is outside the field or occupied, if the id is
    /// already on the field, or if an entry reaction cascades too deep.
    pub fn deploy(
        &mut self,
        env: BattleEnv<'_>,
        object: FieldObject,
        position: TilePosition,
    ) -> Result<EventLog, EngineError> {
        self.transact(env, |resolver| resolver.deploy(object, position))
            .map(|((), log)| log)
    }

    /// Instantiates a preset with a freshly allocated id and deploys it.
    ///
    /// # Errors
    ///
    /// Fails with [`EngineError::Catalog`] for unknown presets, otherwise as
    /// [`BattleEngine::deploy`].
    pub fn spawn(
        &mut self,
        env: BattleEnv<'_>,
        preset_id: &str,
        position: TilePosition,
    ) -> Result<(ObjectId, EventLog), EngineError> {
        self.transact(env, |resolver| {
            let id = resolver.field.allocate_object_id();
            let object = resolver.env.presets().instantiate(preset_id, id)?;
            resolver.deploy(object, position)?;
            Ok(id)
        })
    }

    /// Resolves one tick: scheduler firings with their cascades, then the
    /// status lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ReactionCascadeTooDeep`] if reactions nest
    /// deeper than the configured bound; the field is left untouched.
    pub fn advance_tick(&mut self, env: BattleEnv<'_>) -> Result<EventLog, EngineError> {
        let tick = self.field.tick;
        let (_, log) = self.transact(env, |resolver| {
            resolver.run_scheduler()?;
            resolver.close_tick()
        })?;
        tracing::debug!(%tick, events = log.len(), "tick closed");
        Ok(log)
    }

    /// Resolves an externally submitted one-shot action outside the tick
    /// schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterruptTarget`] when the target does
    /// not fit the action's target selection, or a cascade error.
    pub fn apply_interrupt_action(
        &mut self,
        env: BattleEnv<'_>,
        action: &InterruptAction,
    ) -> Result<EventLog, EngineError> {
        validate_interrupt(self.field, env, action)?;
        let origin = Origin::player(env.config().player_side);
        self.transact(env, |resolver| {
            for targeted in &action.targeted_impacts {
                resolver.apply_impact(
                    &origin,
                    action.target,
                    targeted.area,
                    std::slice::from_ref(&targeted.effect),
                )?;
            }
            Ok(())
        })
        .map(|((), log)| log)
    }

    fn transact<T>(
        &mut self,
        env: BattleEnv<'_>,
        operation: impl FnOnce(&mut Resolver<'_, '_>) -> Result<T, EngineError>,
    ) -> Result<(T, EventLog), EngineError> {
        let mut working = self.field.clone();
        let mut resolver = Resolver::new(&mut working, env);
        let value = operation(&mut resolver)?;
        let log = resolver.into_log();

        #[cfg(debug_assertions)]
        working.check_invariants();

        *self.field = working;
        Ok((value, log))
    }
}

impl Resolver<'_, '_> {
    fn deploy(&mut self, mut object: FieldObject, position: TilePosition) -> Result<(), EngineError> {
        if !self.field.contains_position(position) {
            return Err(EngineError::PositionOutOfBounds { position });
        }
        if let Some(occupant) = self.field.occupant_at(position) {
            return Err(EngineError::TileOccupied { position, occupant });
        }
        if self.field.contains(object.id) {
            return Err(EngineError::DuplicateObjectId(object.id));
        }

        // Default statuses may lower the effective maximum below base life.
        object.clamp_life();
        let id = object.id;
        let preset_id = object.preset_id.clone();
        self.field.insert(object, position);
        tracing::debug!(object = %id, %position, preset = %preset_id, "object entered");
        self.emit(BattleEvent::ObjectEntered {
            object: id,
            preset_id,
            position,
        });
        self.refresh_auras();
        self.dispatch(Trigger::Entered { object: id })
    }
}

fn validate_interrupt(
    field: &Field,
    env: BattleEnv<'_>,
    action: &InterruptAction,
) -> Result<(), EngineError> {
    let player = env.config().player_side;
    let valid = match (action.target_selection, action.target) {
        (TargetSelection::None, target) => target.is_none(),
        (_, None) => false,
        (selection, Some(target)) => {
            field.contains_position(target)
                && match selection {
                    TargetSelection::Ally => target.side == player,
                    TargetSelection::Enemy => target.side == player.opposite(),
                    TargetSelection::Anyone | TargetSelection::None => true,
                }
        }
    };
    if valid {
        Ok(())
    } else {
        Err(EngineError::InvalidInterruptTarget {
            selection: action.target_selection,
            target: action.target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{
        AreaShape, Effect, Impact, ReactionContent, ReactionTrigger, Skill, TargetedImpact,
        Targeting,
    };
    use crate::config::BattleConfig;
    use crate::env::{FieldObjectPreset, PcgRng, PresetCatalog};
    use crate::error::{BattleError, ErrorSeverity};
    use crate::state::{FieldSide, StatusEntry, StatusKind};

    fn catalog() -> PresetCatalog {
        // Applies a status to itself whenever its statuses change.
        let echo = FieldObjectPreset::new("echo").with_skill(Skill::reaction(
            ReactionTrigger::StatusChange,
            ReactionContent::ImpactPerforming {
                impact: Impact::new(
                    Targeting::SelfTile,
                    AreaShape::Single,
                    vec![Effect::status(StatusEntry::ticks(
                        StatusKind::AttackPointsModification(1),
                        1,
                    ))],
                ),
            },
        ));
        PresetCatalog::new(vec![
            FieldObjectPreset::new("dummy").with_max_life_points(3),
            echo,
        ])
        .unwrap()
    }

    #[test]
    fn spawn_places_and_logs_entry() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let env = BattleEnv::new(&catalog, &PcgRng, &config);
        let mut field = Field::new(2, 2);
        let position = TilePosition::new(FieldSide::Right, 1, 0);

        let (id, log) = BattleEngine::new(&mut field)
            .spawn(env, "dummy", position)
            .unwrap();
        assert_eq!(field.occupant_at(position), Some(id));
        assert_eq!(
            log.as_slice(),
            &[BattleEvent::ObjectEntered {
                object: id,
                preset_id: "dummy".into(),
                position,
            }]
        );
    }

    #[test]
    fn placement_errors_leave_field_untouched() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let env = BattleEnv::new(&catalog, &PcgRng, &config);
        let mut field = Field::new(1, 1);
        let position = TilePosition::new(FieldSide::Left, 0, 0);
        let mut engine = BattleEngine::new(&mut field);
        engine.spawn(env, "dummy", position).unwrap();
        let before = engine.field().clone();

        let err = engine.spawn(env, "dummy", position).unwrap_err();
        assert!(matches!(err, EngineError::TileOccupied { .. }));
        assert!(err.severity().is_recoverable());

        let err = engine
            .spawn(env, "dummy", TilePosition::new(FieldSide::Left, 0, 5))
            .unwrap_err();
        assert_eq!(err.severity(), ErrorSeverity::Validation);

        let err = engine.spawn(env, "ghost", position).unwrap_err();
        assert_eq!(err.error_code(), "CATALOG_PRESET_NOT_FOUND");
        assert_eq!(engine.field(), &before);
    }

    #[test]
    fn runaway_reaction_cascade_is_fatal_and_rolled_back() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let env = BattleEnv::new(&catalog, &PcgRng, &config);
        let mut field = Field::new(2, 1);
        let position = TilePosition::new(FieldSide::Left, 0, 0);
        BattleEngine::new(&mut field)
            .spawn(env, "echo", position)
            .unwrap();
        let before = field.clone();

        let poke = InterruptAction::new(
            TargetSelection::Ally,
            Some(position),
            vec![TargetedImpact::new(
                AreaShape::Single,
                Effect::status(StatusEntry::ticks(StatusKind::Sealed, 1)),
            )],
        );
        let err = BattleEngine::new(&mut field)
            .apply_interrupt_action(env, &poke)
            .unwrap_err();
        assert_eq!(err, EngineError::ReactionCascadeTooDeep { depth: 3, max: 2 });
        assert_eq!(err.severity(), ErrorSeverity::Fatal);
        assert_eq!(field, before);
    }

    #[test]
    fn interrupt_targets_are_validated_against_player_side() {
        let catalog = catalog();
        let config = BattleConfig::default();
        let env = BattleEnv::new(&catalog, &PcgRng, &config);
        let mut field = Field::new(2, 2);
        let mut engine = BattleEngine::new(&mut field);
        let heal = vec![TargetedImpact::new(AreaShape::Single, Effect::Healing { points: 1 })];

        let enemy_tile = TilePosition::new(FieldSide::Right, 0, 0);
        let ally_tile = TilePosition::new(FieldSide::Left, 0, 0);
        for (selection, target, ok) in [
            (TargetSelection::Ally, Some(ally_tile), true),
            (TargetSelection::Ally, Some(enemy_tile), false),
            (TargetSelection::Enemy, Some(enemy_tile), true),
            (TargetSelection::Enemy, None, false),
            (TargetSelection::Anyone, Some(enemy_tile), true),
            (TargetSelection::Anyone, Some(TilePosition::new(FieldSide::Right, 9, 0)), false),
            (TargetSelection::None, None, true),
            (TargetSelection::None, Some(ally_tile), false),
        ] {
            let action = InterruptAction::new(selection, target, heal.clone());
            let result = engine.apply_interrupt_action(env, &action);
            assert_eq!(result.is_ok(), ok, "{selection} {target:?}");
        }
    }
}
