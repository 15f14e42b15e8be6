use crate::state::FieldSide;

/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Maximum number of nested reaction dispatch levels within one tick or
    /// interrupt. Level 1 is a reaction to a primary action; exceeding the
    /// bound aborts the resolution with a fatal configuration error.
    pub max_reaction_depth: u32,

    /// Side controlled by the player. Interrupt actions resolve relative to it.
    pub player_side: FieldSide,
}

impl BattleConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of skills carried by a preset or field object.
    pub const MAX_SKILLS: usize = 8;
    /// Maximum number of impacts in one auto-action.
    pub const MAX_IMPACTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_REACTION_DEPTH: u32 = 2;
    pub const DEFAULT_PLAYER_SIDE: FieldSide = FieldSide::Left;

    pub fn new() -> Self {
        Self {
            max_reaction_depth: Self::DEFAULT_MAX_REACTION_DEPTH,
            player_side: Self::DEFAULT_PLAYER_SIDE,
        }
    }

    pub fn with_max_reaction_depth(mut self, max_reaction_depth: u32) -> Self {
        self.max_reaction_depth = max_reaction_depth;
        self
    }

    pub fn with_player_side(mut self, player_side: FieldSide) -> Self {
        self.player_side = player_side;
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}
