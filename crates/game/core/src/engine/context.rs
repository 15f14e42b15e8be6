//! Working context of one engine call.

use crate::env::BattleEnv;
use crate::state::{Field, FieldSide, ObjectId, TilePosition};

use super::{BattleEvent, EventLog};

/// Where an impact comes from.
///
/// Captured once when the impact starts, so effects keep a stable origin even
/// if the actor is removed part-way through (by a counterattack, say).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Origin {
    /// `None` for interrupt actions submitted by the player.
    pub actor: Option<ObjectId>,
    pub side: FieldSide,
    pub position: Option<TilePosition>,
}

impl Origin {
    /// Origin of an impact performed by a deployed object.
    pub fn of(field: &Field, actor: ObjectId) -> Option<Self> {
        let position = field.object(actor)?.position?;
        Some(Self {
            actor: Some(actor),
            side: position.side,
            position: Some(position),
        })
    }

    /// Origin of an interrupt action, anchored to the player's side.
    pub fn player(side: FieldSide) -> Self {
        Self {
            actor: None,
            side,
            position: None,
        }
    }
}

/// Mutable resolution state shared by targeting, the pipeline, the
/// scheduler, reactions and the lifecycle manager.
///
/// Works on the engine's scratch copy of the field; the engine commits the
/// copy only when the whole operation succeeded.
pub(crate) struct Resolver<'f, 'e> {
    pub field: &'f mut Field,
    pub env: BattleEnv<'e>,
    log: EventLog,
    /// Current reaction dispatch level; 0 outside any reaction.
    pub depth: u32,
}

impl<'f, 'e> Resolver<'f, 'e> {
    pub fn new(field: &'f mut Field, env: BattleEnv<'e>) -> Self {
        Self {
            field,
            env,
            log: EventLog::new(),
            depth: 0,
        }
    }

    pub fn emit(&mut self, event: BattleEvent) {
        self.log.push(event);
    }

    pub fn into_log(self) -> EventLog {
        self.log
    }
}
