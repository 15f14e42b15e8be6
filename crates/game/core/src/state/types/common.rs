use std::fmt;

use crate::action::RelativeSide;

/// Unique identifier for a field object within one [`Field`](crate::state::Field).
///
/// Identifiers are allocated sequentially starting at 1 and never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(pub u32);

impl ObjectId {
    pub const FIRST: Self = Self(1);

    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One of the two opposing halves of the field.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::AsRefStr,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldSide {
    Left,
    Right,
}

impl FieldSide {
    pub const ALL: [FieldSide; 2] = [FieldSide::Left, FieldSide::Right];

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Resolves a side expressed relative to `self` into an absolute side.
    #[inline]
    pub const fn relative(self, relative: RelativeSide) -> Self {
        match relative {
            RelativeSide::Ally => self,
            RelativeSide::Enemy => self.opposite(),
        }
    }
}

/// Discrete tile position on one side of the field.
///
/// Coordinates are always expressed as seen from the right-hand side: row 0
/// is the top row and column 0 is the column closest to the centre line, i.e.
/// the front. The left side is rendered mirrored but shares this geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TilePosition {
    pub side: FieldSide,
    pub row: u32,
    pub column: u32,
}

impl TilePosition {
    pub const fn new(side: FieldSide, row: u32, column: u32) -> Self {
        Self { side, row, column }
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}, {}]", self.side, self.row, self.column)
    }
}

/// Size of one side's tile grid. Both sides always share the same dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    /// Columns per side (front to back).
    pub width: u32,
    /// Rows per side (top to bottom).
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub const fn contains(&self, row: u32, column: u32) -> bool {
        row < self.height && column < self.width
    }

    #[inline]
    pub const fn tile_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// Discrete simulation step counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
