//! Targeting rules.
//!
//! A targeting rule picks at most one tile, starting from the actor's own
//! tile. Effects spanning several tiles are expressed with an
//! [`AreaShape`](super::AreaShape) anchored on the picked tile. Effects that
//! need no field target (card draw, for instance) use [`Targeting::SelfTile`].

/// A side expressed relative to the acting object.
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
pub enum RelativeSide {
    Ally,
    Enemy,
}

/// Scan order among the candidates of a row.
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
pub enum Priority {
    /// Lowest column first (closest to the centre line).
    FrontToBack,
    /// Highest column first.
    BackToFront,
    /// Uniformly random among the candidates.
    Random,
}

/// How an impact selects its target tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Targeting {
    /// Always the actor's own tile.
    SelfTile,

    /// Scan a row of one side for an occupied tile.
    HorizontalDirection {
        side: RelativeSide,
        priority: Priority,
        /// Skip the actor's own tile when scanning its own side.
        is_excluding_oneself: bool,
        /// When the actor's row is empty, try rows at +1, -1, +2, -2, ...
        does_search_other_rows: bool,
    },
}

impl Targeting {
    /// The default melee rule: nearest enemy in the same row.
    pub const fn front_enemy() -> Self {
        Self::HorizontalDirection {
            side: RelativeSide::Enemy,
            priority: Priority::FrontToBack,
            is_excluding_oneself: true,
            does_search_other_rows: false,
        }
    }

    pub const fn is_self(&self) -> bool {
        matches!(self, Self::SelfTile)
    }
}
