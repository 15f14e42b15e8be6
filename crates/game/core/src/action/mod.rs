//! Declarative action descriptions.
//!
//! Everything in this module is stateless data: presets and interrupt
//! requests describe *what* should happen, and the engine turns those
//! descriptions into state mutations. An [`Impact`] is the atomic unit of
//! action resolution: a targeting rule, an area shape and an ordered list of
//! effects.

mod area;
mod effect;
mod impact;
mod interrupt;
mod skill;
mod targeting;

pub use area::AreaShape;
pub use effect::{AdditionalDamageSource, Effect};
pub use impact::{AutoAction, Impact, ImpactList};
pub use interrupt::{InterruptAction, TargetSelection, TargetedImpact};
pub use skill::{ReactionContent, ReactionTrigger, Skill, SkillList};
pub use targeting::{Priority, RelativeSide, Targeting};
