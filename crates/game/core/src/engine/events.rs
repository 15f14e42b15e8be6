//! Observable record of a resolution.
//!
//! The event log is the only surface presentation and logging collaborators
//! see. Events are appended in the exact order the engine performed the
//! corresponding steps.

use crate::action::{AdditionalDamageSource, ReactionTrigger};
use crate::state::{ObjectId, StatusEntry, TilePosition};

#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    ObjectEntered {
        object: ObjectId,
        preset_id: String,
        position: TilePosition,
    },

    /// One repetition of a scheduled auto-action started.
    AutoActionFired { actor: ObjectId, repetition: u32 },

    /// The auto-action matured while the actor was sealed.
    AutoActionSealed { actor: ObjectId },

    /// An impact's targeting found no tile; the impact did nothing.
    TargetUnresolved { actor: ObjectId },

    /// `attacker` is `None` for interrupt actions.
    AttackResolved {
        attacker: Option<ObjectId>,
        target: ObjectId,
        damage: u32,
        shield_absorbed: u32,
        remainder: u32,
        source: AdditionalDamageSource,
    },

    CounterattackResolved {
        defender: ObjectId,
        attacker: ObjectId,
        damage: u32,
        shield_absorbed: u32,
    },

    ShieldScraped { target: ObjectId, points: u32 },

    Healed { target: ObjectId, points: u32 },

    /// Applied life change after clamping.
    LifeChanged { target: ObjectId, delta: i64 },

    MaxLifeChanged {
        target: ObjectId,
        max_life_points: u32,
        life_points: u32,
    },

    StatusApplied {
        target: ObjectId,
        applier: Option<ObjectId>,
        entry: StatusEntry,
    },

    StatusExpired { target: ObjectId, entry: StatusEntry },

    DotTicked { target: ObjectId, points: u32 },

    ObjectDied { object: ObjectId },

    ObjectRetreated { object: ObjectId },

    /// Retreat was requested but the object cannot retreat.
    RetreatRefused { object: ObjectId },

    ObjectAbsorbed {
        absorber: Option<ObjectId>,
        object: ObjectId,
        life_points: u32,
    },

    /// Forwarded to the card-management collaborator.
    CardDrawRequested {
        requester: Option<ObjectId>,
        count: u32,
    },

    ReactionTriggered {
        owner: ObjectId,
        trigger: ReactionTrigger,
        invoker: Option<ObjectId>,
    },

    FieldEffectExpired { label: String },
}

impl BattleEvent {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Ordered sequence of events produced by one engine call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct EventLog {
    events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: BattleEvent) {
        tracing::trace!(event = event.name(), "event");
        self.events.push(event);
    }

    pub fn append(&mut self, other: EventLog) {
        self.events.extend(other.events);
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn as_slice(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn into_vec(self) -> Vec<BattleEvent> {
        self.events
    }
}

impl IntoIterator for EventLog {
    type Item = BattleEvent;
    type IntoIter = std::vec::IntoIter<BattleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a BattleEvent;
    type IntoIter = std::slice::Iter<'a, BattleEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
