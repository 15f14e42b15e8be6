//! Effects - the atomic state mutations an impact applies.
//!
//! Each effect mutates exactly the field object it is applied to, or removes
//! it. Card draw is the only effect without a field target; it is forwarded
//! to the card-management collaborator as an event.

use crate::state::StatusEntry;

/// Where attack damage left over after the shield goes.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AdditionalDamageSource {
    /// The remainder is discarded; only the shield is lost.
    #[default]
    None,
    /// The remainder reduces armor points.
    Armor,
    /// The remainder reduces life points, bypassing armor.
    Life,
}

/// A single effect applied to one occupant.
#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    /// Removes the occupant and grants its remaining life to the actor as
    /// max life points with healing.
    Absorption,

    Attack {
        attack_points: u32,
        additional_damage_source: AdditionalDamageSource,
    },

    Death,

    DrawCards {
        count: u32,
    },

    Healing {
        points: u32,
    },

    LifePointsModification {
        delta: i32,
    },

    MaxLifePointsModification {
        delta: i32,
        is_with_healing: bool,
    },

    Retreat,

    /// Shield reduction, independent of the shield consumed by attacks.
    ShieldScraping {
        points: u32,
    },

    StatusApplication {
        status: StatusEntry,
    },
}

impl Effect {
    pub fn attack(attack_points: u32, additional_damage_source: AdditionalDamageSource) -> Self {
        Self::Attack {
            attack_points,
            additional_damage_source,
        }
    }

    pub fn status(status: StatusEntry) -> Self {
        Self::StatusApplication { status }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub const fn is_attack(&self) -> bool {
        matches!(self, Self::Attack { .. })
    }

    /// True for effects that do not act on a field occupant.
    pub const fn is_field_independent(&self) -> bool {
        matches!(self, Self::DrawCards { .. })
    }
}
