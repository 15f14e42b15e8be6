use arrayvec::ArrayVec;

use crate::config::BattleConfig;

use super::{AreaShape, Effect, Targeting};

/// The unit of action: a targeting rule, an area shape and an ordered effect
/// list. Resolving an impact is a pure function of the current field state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impact {
    pub targeting: Targeting,
    pub area: AreaShape,
    pub effects: Vec<Effect>,
}

impl Impact {
    pub fn new(targeting: Targeting, area: AreaShape, effects: Vec<Effect>) -> Self {
        Self {
            targeting,
            area,
            effects,
        }
    }

    pub fn has_attack(&self) -> bool {
        self.effects.iter().any(Effect::is_attack)
    }
}

pub type ImpactList = ArrayVec<Impact, { BattleConfig::MAX_IMPACTS }>;

/// A field object's innate recurring action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoAction {
    /// Ticks of accrued wait needed before the action fires.
    pub wait: u32,
    /// Base number of times the impact list runs per firing.
    pub repeats: u32,
    pub impacts: ImpactList,
}

impl AutoAction {
    /// # Panics
    ///
    /// Panics if `impacts` yields more than [`BattleConfig::MAX_IMPACTS`] impacts.
    pub fn new(wait: u32, repeats: u32, impacts: impl IntoIterator<Item = Impact>) -> Self {
        Self {
            wait,
            repeats,
            impacts: impacts.into_iter().collect(),
        }
    }
}
