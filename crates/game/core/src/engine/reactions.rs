//! Reactive skill dispatch and formation-change auras.

use crate::action::{AreaShape, Effect, Impact, ReactionContent, ReactionTrigger, Skill, Targeting};
use crate::state::{AuraSource, FieldSide, ObjectId, StatusEntry, TilePosition};

use super::area::map_area;
use super::context::{Origin, Resolver};
use super::targeting::resolve_target;
use super::{BattleEvent, EngineError};

/// Something that happened during resolution that reaction skills can
/// listen to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Trigger {
    AttackLanded {
        attacker: Option<ObjectId>,
        attacker_side: FieldSide,
        target: ObjectId,
    },
    DotInflicted {
        target: ObjectId,
    },
    Entered {
        object: ObjectId,
    },
    StatusApplied {
        target: ObjectId,
        applier: Option<ObjectId>,
    },
}

impl Trigger {
    /// The object that caused the trigger, if any.
    fn invoker(&self) -> Option<ObjectId> {
        match *self {
            Self::AttackLanded { attacker, .. } => attacker,
            Self::DotInflicted { .. } => None,
            Self::Entered { object } => Some(object),
            Self::StatusApplied { applier, .. } => applier,
        }
    }

    /// Whether a reaction of `kind` owned by `owner` on `owner_side` listens
    /// to this trigger. `side_of` looks up the current side of an object.
    fn matches(
        &self,
        kind: ReactionTrigger,
        owner: ObjectId,
        owner_side: FieldSide,
        side_of: impl Fn(ObjectId) -> Option<FieldSide>,
    ) -> bool {
        match (kind, *self) {
            (
                ReactionTrigger::AllyAttacks,
                Self::AttackLanded {
                    attacker: Some(attacker),
                    attacker_side,
                    ..
                },
            ) => attacker != owner && attacker_side == owner_side,
            (
                ReactionTrigger::EnemyAttacks,
                Self::AttackLanded {
                    attacker: Some(_),
                    attacker_side,
                    ..
                },
            ) => attacker_side != owner_side,
            (ReactionTrigger::AttackOnOneself, Self::AttackLanded { target, .. }) => {
                target == owner
            }
            (ReactionTrigger::DotInflictedOnAnyone, Self::DotInflicted { .. }) => true,
            (ReactionTrigger::Entry, Self::Entered { object }) => object == owner,
            (ReactionTrigger::StatusChange, Self::StatusApplied { target, .. }) => target == owner,
            (ReactionTrigger::StatusChangeOnAlly, Self::StatusApplied { target, .. }) => {
                target != owner && side_of(target) == Some(owner_side)
            }
            _ => false,
        }
    }
}

struct PendingReaction {
    owner: ObjectId,
    trigger: ReactionTrigger,
    content: ReactionContent,
}

struct Aura {
    source: AuraSource,
    targeting: Targeting,
    area: AreaShape,
    statuses: Vec<StatusEntry>,
}

impl Resolver<'_, '_> {
    /// Fires every matching reaction synchronously.
    ///
    /// Owners are visited in roster order and skills in declaration order.
    /// Each nested dispatch level counts towards `max_reaction_depth`.
    pub(crate) fn dispatch(&mut self, trigger: Trigger) -> Result<(), EngineError> {
        let pending = self.matching_reactions(&trigger);
        if pending.is_empty() {
            return Ok(());
        }

        let depth = self.depth + 1;
        let max = self.env.config().max_reaction_depth;
        if depth > max {
            tracing::warn!(depth, max, ?trigger, "reaction cascade too deep");
            return Err(EngineError::ReactionCascadeTooDeep { depth, max });
        }

        self.depth = depth;
        let invoker = trigger.invoker();
        for reaction in pending {
            let alive = self
                .field
                .object(reaction.owner)
                .is_some_and(|object| object.is_alive());
            if !alive {
                continue;
            }
            self.emit(BattleEvent::ReactionTriggered {
                owner: reaction.owner,
                trigger: reaction.trigger,
                invoker,
            });
            match reaction.content {
                ReactionContent::AutoActionPerforming {
                    retarget_to_invoker,
                } => {
                    let retarget = invoker
                        .filter(|_| retarget_to_invoker)
                        .and_then(|invoker| self.field.object(invoker))
                        .and_then(|object| object.position);
                    self.perform_auto_action(reaction.owner, retarget)?;
                }
                ReactionContent::ImpactPerforming { impact } => {
                    self.perform_impact(reaction.owner, &impact, None)?;
                }
            }
        }
        self.depth = depth - 1;
        Ok(())
    }

    fn matching_reactions(&self, trigger: &Trigger) -> Vec<PendingReaction> {
        let side_of = |id: ObjectId| self.field.object(id).and_then(|object| object.side());
        let mut pending = Vec::new();
        for object in self.field.roster() {
            let Some(owner_side) = object.side().filter(|_| object.is_alive()) else {
                continue;
            };
            for skill in &object.skills {
                let Skill::Reaction {
                    trigger: kind,
                    content,
                } = skill
                else {
                    continue;
                };
                if trigger.matches(*kind, object.id, owner_side, side_of) {
                    pending.push(PendingReaction {
                        owner: object.id,
                        trigger: *kind,
                        content: content.clone(),
                    });
                }
            }
        }
        pending
    }

    /// Runs `actor`'s auto-action impacts once.
    ///
    /// Impacts that attack carry the actor's auto-action attack modifications.
    /// `retarget` replaces the targeting of the first impact.
    pub(crate) fn perform_auto_action(
        &mut self,
        actor: ObjectId,
        retarget: Option<TilePosition>,
    ) -> Result<(), EngineError> {
        let Some(object) = self.field.object(actor) else {
            return Ok(());
        };
        let Some(action) = object.auto_action.clone() else {
            return Ok(());
        };
        let modifications: Vec<Effect> = object
            .skills
            .iter()
            .filter_map(|skill| match skill {
                Skill::AutoActionAttackModification { additional_effect } => {
                    Some(additional_effect.clone())
                }
                _ => None,
            })
            .collect();

        for (index, impact) in action.impacts.iter().enumerate() {
            if !self.field.contains(actor) {
                break;
            }
            let override_target = if index == 0 { retarget } else { None };
            if impact.has_attack() && !modifications.is_empty() {
                let mut modified: Impact = impact.clone();
                modified.effects.extend(modifications.iter().cloned());
                self.perform_impact(actor, &modified, override_target)?;
            } else {
                self.perform_impact(actor, impact, override_target)?;
            }
        }
        Ok(())
    }

    /// Recomputes every formation-change aura from the current formation.
    ///
    /// Aura entries are tagged with their source and replaced wholesale, so
    /// they never stack with themselves and vanish with their owner.
    pub(crate) fn refresh_auras(&mut self) {
        let mut auras = Vec::new();
        for object in self.field.roster() {
            for (index, skill) in object.skills.iter().enumerate() {
                if let Skill::StatusOnFormationChange {
                    targeting,
                    area,
                    statuses,
                } = skill
                {
                    auras.push(Aura {
                        source: AuraSource {
                            owner: object.id,
                            skill: index as u8,
                        },
                        targeting: targeting.clone(),
                        area: *area,
                        statuses: statuses.clone(),
                    });
                }
            }
        }

        let had_auras = self
            .field
            .roster()
            .iter()
            .any(|object| object.statuses.iter().any(|entry| entry.aura.is_some()));
        if auras.is_empty() && !had_auras {
            return;
        }

        let ids: Vec<ObjectId> = self.field.roster().iter().map(|object| object.id).collect();
        for id in &ids {
            if let Some(object) = self.field.object_mut(*id) {
                object.statuses.clear_auras();
            }
        }

        for aura in auras {
            let owner = aura.source.owner;
            let Some(origin) = Origin::of(self.field, owner) else {
                continue;
            };
            let Some(target) = resolve_target(self.field, self.env.rng(), owner, &aura.targeting)
            else {
                continue;
            };
            let tiles = map_area(self.field, Some(target), aura.area, &origin);
            for occupant in self.field.occupants_of(&tiles) {
                if let Some(object) = self.field.object_mut(occupant) {
                    for entry in &aura.statuses {
                        object.statuses.push(entry.clone().with_aura(aura.source));
                    }
                }
            }
        }

        for id in ids {
            if let Some(object) = self.field.object_mut(id) {
                object.clamp_life();
            }
        }
        tracing::trace!("auras refreshed");
    }
}
