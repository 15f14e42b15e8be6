//! Skills carried by field objects.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;
use crate::state::StatusEntry;

use super::{AreaShape, Effect, Impact, Targeting};

/// Event categories a reaction skill listens to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionTrigger {
    /// An attack by another object on the owner's side lands.
    AllyAttacks,
    /// An attack by an object on the opposing side lands.
    EnemyAttacks,
    /// An attack lands on the owner.
    AttackOnOneself,
    /// A damage-over-time tick lands on any object.
    DotInflictedOnAnyone,
    /// The owner enters the field.
    Entry,
    /// A status is applied to the owner.
    StatusChange,
    /// A status is applied to another object on the owner's side.
    StatusChangeOnAlly,
}

/// What a reaction does once triggered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReactionContent {
    /// Runs the owner's auto-action impacts once, outside its schedule.
    AutoActionPerforming {
        /// Aim the first impact at the object that caused the trigger.
        retarget_to_invoker: bool,
    },
    /// Runs one embedded impact.
    ImpactPerforming { impact: Impact },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Skill {
    /// Appends an effect to every auto-action impact that attacks.
    AutoActionAttackModification { additional_effect: Effect },

    Reaction {
        trigger: ReactionTrigger,
        content: ReactionContent,
    },

    /// Aura re-applied on every formation change ("while on the field").
    StatusOnFormationChange {
        targeting: Targeting,
        area: AreaShape,
        statuses: Vec<StatusEntry>,
    },
}

impl Skill {
    pub fn reaction(trigger: ReactionTrigger, content: ReactionContent) -> Self {
        Self::Reaction { trigger, content }
    }

    /// The trigger of a reaction skill.
    pub fn trigger(&self) -> Option<ReactionTrigger> {
        match self {
            Self::Reaction { trigger, .. } => Some(*trigger),
            _ => None,
        }
    }
}

pub type SkillList = ArrayVec<Skill, { BattleConfig::MAX_SKILLS }>;
