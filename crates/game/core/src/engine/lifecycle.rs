//! Status lifecycle at tick close.

use crate::state::ObjectId;

use super::context::Resolver;
use super::reactions::Trigger;
use super::{BattleEvent, EngineError};

impl Resolver<'_, '_> {
    /// Closes the current tick.
    ///
    /// Damage-over-time entries deal their points first (directly to life),
    /// then every finite entry and field effect counts down one tick.
    pub(crate) fn close_tick(&mut self) -> Result<(), EngineError> {
        let ids: Vec<ObjectId> = self.field.roster().iter().map(|object| object.id).collect();

        for &id in &ids {
            self.tick_dots(id)?;
        }

        for id in ids {
            let Some(object) = self.field.object_mut(id) else {
                continue;
            };
            let expired = object.statuses.tick_down();
            object.clamp_life();
            for entry in expired {
                self.emit(BattleEvent::StatusExpired { target: id, entry });
            }
        }

        let mut expired_effects = Vec::new();
        self.field.field_effects.retain_mut(|effect| {
            let expired = effect.tick_down();
            if expired {
                expired_effects.push(effect.label.clone());
            }
            !expired
        });
        for label in expired_effects {
            self.emit(BattleEvent::FieldEffectExpired { label });
        }

        self.field.tick = self.field.tick + 1;
        Ok(())
    }

    fn tick_dots(&mut self, id: ObjectId) -> Result<(), EngineError> {
        let Some(object) = self.field.object(id) else {
            return Ok(());
        };
        for points in object.statuses.dot_points() {
            let Some(object) = self.field.object_mut(id) else {
                break;
            };
            let points = points.unsigned_abs();
            object.life_points = object.life_points.saturating_sub(points);
            let survived = object.is_alive();

            tracing::debug!(object = %id, points, "damage over time");
            self.emit(BattleEvent::DotTicked { target: id, points });
            if !survived {
                self.kill(id);
            }
            self.dispatch(Trigger::DotInflicted { target: id })?;
        }

        if let Some(object) = self.field.object_mut(id) {
            for entry in object.statuses.weaken_dots() {
                self.emit(BattleEvent::StatusExpired { target: id, entry });
            }
        }
        Ok(())
    }
}
