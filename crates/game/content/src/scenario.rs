//! Match scenarios: grid size, seed and initial placements.

use battle_core::{FieldSide, TilePosition};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub preset_id: String,
    pub side: FieldSide,
    pub row: u32,
    pub column: u32,
}

impl Placement {
    pub fn new(preset_id: impl Into<String>, side: FieldSide, row: u32, column: u32) -> Self {
        Self {
            preset_id: preset_id.into(),
            side,
            row,
            column,
        }
    }

    pub fn position(&self) -> TilePosition {
        TilePosition::new(self.side, self.row, self.column)
    }
}

/// Initial setup of a match. Placements are deployed in order, which fixes
/// the roster order of the match.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
    pub placements: Vec<Placement>,
}

impl Scenario {
    /// Small built-in match between the reference presets.
    pub fn demo() -> Self {
        Self {
            width: 3,
            height: 2,
            seed: 7,
            placements: vec![
                Placement::new("booshu", FieldSide::Left, 0, 0),
                Placement::new("lilGazi", FieldSide::Left, 0, 1),
                Placement::new("sneezle", FieldSide::Left, 1, 0),
                Placement::new("spike", FieldSide::Right, 0, 0),
                Placement::new("loki", FieldSide::Right, 0, 1),
                Placement::new("snoof", FieldSide::Right, 1, 0),
            ],
        }
    }
}
