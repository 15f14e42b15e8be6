//! Externally submitted one-shot actions (a played card, for instance).

use crate::state::TilePosition;

use super::{AreaShape, Effect};

/// Which tiles an interrupt action may be aimed at, relative to the player.
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
pub enum TargetSelection {
    Ally,
    Anyone,
    Enemy,
    /// No target tile; areas resolve relative to the player's side.
    None,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetedImpact {
    pub area: AreaShape,
    pub effect: Effect,
}

impl TargetedImpact {
    pub fn new(area: AreaShape, effect: Effect) -> Self {
        Self { area, effect }
    }
}

/// A one-shot impact list resolved outside the tick schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterruptAction {
    pub target_selection: TargetSelection,
    /// Tile chosen by the player; must be `None` for [`TargetSelection::None`].
    pub target: Option<TilePosition>,
    pub targeted_impacts: Vec<TargetedImpact>,
}

impl InterruptAction {
    pub fn new(
        target_selection: TargetSelection,
        target: Option<TilePosition>,
        targeted_impacts: Vec<TargetedImpact>,
    ) -> Self {
        Self {
            target_selection,
            target,
            targeted_impacts,
        }
    }
}
