//! Auto-action scheduler: the per-tick timing loop.

use crate::state::{ObjectId, StatusFlags};

use super::context::Resolver;
use super::{BattleEvent, EngineError};

impl Resolver<'_, '_> {
    /// Advances every auto-action wait counter and fires matured actions.
    ///
    /// Objects are visited in roster order as of the start of the tick;
    /// objects removed earlier in the tick are skipped.
    pub(crate) fn run_scheduler(&mut self) -> Result<(), EngineError> {
        let scheduled: Vec<ObjectId> = self
            .field
            .roster()
            .iter()
            .filter(|object| object.auto_action.is_some())
            .map(|object| object.id)
            .collect();

        for actor in scheduled {
            let Some(object) = self.field.object_mut(actor) else {
                continue;
            };
            let Some(wait) = object.auto_action.as_ref().map(|action| action.wait) else {
                continue;
            };
            let flags = object.flags();
            if flags.contains(StatusFlags::WAIT_FROZEN) {
                tracing::trace!(%actor, "wait frozen");
                continue;
            }

            object.elapsed_auto_action_wait += 1;
            if object.elapsed_auto_action_wait < wait {
                continue;
            }
            object.elapsed_auto_action_wait = 0;

            if flags.contains(StatusFlags::SEALED) {
                tracing::debug!(%actor, "auto-action sealed");
                self.emit(BattleEvent::AutoActionSealed { actor });
                continue;
            }

            let repeats = object.effective_repeats().unwrap_or(1);
            for repetition in 0..repeats {
                if !self.field.contains(actor) {
                    break;
                }
                tracing::debug!(%actor, repetition, "auto-action fired");
                self.emit(BattleEvent::AutoActionFired { actor, repetition });
                self.perform_auto_action(actor, None)?;
            }
        }
        Ok(())
    }
}
