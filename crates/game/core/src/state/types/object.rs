use crate::action::{AutoAction, ReactionTrigger, SkillList};
use crate::env::FieldObjectPreset;

use super::{FieldSide, ObjectId, StatusEntries, StatusFlags, TilePosition};

/// A live battle unit.
///
/// Instances are value clones of a preset taken at creation time; they keep
/// only the preset id for reference and diverge freely afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldObject {
    pub id: ObjectId,
    pub preset_id: String,
    /// Tile currently occupied. `None` until the object is deployed.
    pub position: Option<TilePosition>,
    pub life_points: u32,
    pub max_life_points: u32,
    pub armor_points: u32,
    pub shield_points: u32,
    pub counterattack_points: u32,
    pub can_retreat: bool,
    pub auto_action: Option<AutoAction>,
    pub elapsed_auto_action_wait: u32,
    pub skills: SkillList,
    pub statuses: StatusEntries,
}

impl FieldObject {
    /// Clones the base values of `preset` into a fresh instance at full life.
    pub fn from_preset(preset: &FieldObjectPreset, id: ObjectId) -> Self {
        Self {
            id,
            preset_id: preset.id.clone(),
            position: None,
            life_points: preset.max_life_points,
            max_life_points: preset.max_life_points,
            armor_points: preset.armor_points,
            shield_points: preset.shield_points,
            counterattack_points: preset.counterattack_points,
            can_retreat: preset.can_retreat,
            auto_action: preset.auto_action.clone(),
            elapsed_auto_action_wait: 0,
            skills: preset.skills.clone(),
            statuses: StatusEntries::from_entries(preset.statuses.iter().cloned()),
        }
    }

    /// Debug label in the `{preset_id}-{n}` form.
    pub fn label(&self) -> String {
        format!("{}-{}", self.preset_id, self.id.0)
    }

    pub fn side(&self) -> Option<FieldSide> {
        self.position.map(|position| position.side)
    }

    pub fn is_alive(&self) -> bool {
        self.life_points > 0
    }

    pub fn flags(&self) -> StatusFlags {
        self.statuses.flags()
    }

    /// Max life points including active modifiers, never below 1.
    pub fn effective_max_life_points(&self) -> u32 {
        apply_bonus(self.max_life_points, self.statuses.max_life_bonus()).max(1)
    }

    pub fn effective_counterattack_points(&self) -> u32 {
        apply_bonus(
            self.counterattack_points,
            self.statuses.counterattack_bonus(),
        )
    }

    /// Base can-retreat flag unless an active status overrides it.
    pub fn effective_can_retreat(&self) -> bool {
        self.statuses
            .can_retreat_override()
            .unwrap_or(self.can_retreat)
    }

    /// Auto-action repeat count including modifiers, never below 1.
    pub fn effective_repeats(&self) -> Option<u32> {
        self.auto_action
            .as_ref()
            .map(|action| apply_bonus(action.repeats, self.statuses.repeats_bonus()).max(1))
    }

    /// Whether any reaction skill of this object listens to `trigger`.
    pub fn reacts_to(&self, trigger: ReactionTrigger) -> bool {
        self.skills.iter().any(|skill| skill.trigger() == Some(trigger))
    }

    /// Clamps current life to the effective maximum.
    pub(crate) fn clamp_life(&mut self) {
        self.life_points = self.life_points.min(self.effective_max_life_points());
    }
}

/// Adds a signed bonus to an unsigned base, saturating at both ends.
pub(crate) fn apply_bonus(base: u32, bonus: i32) -> u32 {
    let total = i64::from(base) + i64::from(bonus);
    total.clamp(0, i64::from(u32::MAX)) as u32
}
