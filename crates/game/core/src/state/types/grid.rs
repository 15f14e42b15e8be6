use super::{FieldSide, GridDimensions, ObjectId, TilePosition};

/// A single grid cell.
///
/// The tile only records *which* object sits on it. Ownership of the object
/// lives in the field roster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    occupant: Option<ObjectId>,
}

impl Tile {
    pub fn occupant(&self) -> Option<ObjectId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Rectangular arrangement of tiles for one side, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    side: FieldSide,
    dimensions: GridDimensions,
    tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn new(side: FieldSide, dimensions: GridDimensions) -> Self {
        Self {
            side,
            dimensions,
            tiles: vec![Tile::default(); dimensions.tile_count()],
        }
    }

    pub fn side(&self) -> FieldSide {
        self.side
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    fn index(&self, row: u32, column: u32) -> Option<usize> {
        self.dimensions
            .contains(row, column)
            .then(|| (row * self.dimensions.width + column) as usize)
    }

    pub fn tile(&self, row: u32, column: u32) -> Option<&Tile> {
        self.index(row, column).map(|index| &self.tiles[index])
    }

    pub fn occupant(&self, row: u32, column: u32) -> Option<ObjectId> {
        self.tile(row, column).and_then(Tile::occupant)
    }

    /// All positions of this grid, row-major, front to back within a row.
    pub fn positions(&self) -> impl Iterator<Item = TilePosition> + '_ {
        (0..self.dimensions.height).flat_map(move |row| self.row_positions(row))
    }

    /// Positions of one row, front to back. Empty if the row is out of range.
    pub fn row_positions(&self, row: u32) -> impl Iterator<Item = TilePosition> + '_ {
        let width = if row < self.dimensions.height {
            self.dimensions.width
        } else {
            0
        };
        (0..width).map(move |column| TilePosition::new(self.side, row, column))
    }

    /// Records `object` as the occupant of a tile.
    ///
    /// # Panics
    ///
    /// Panics if the tile is out of range or already occupied; both indicate a
    /// caller that skipped validation.
    pub(crate) fn place(&mut self, row: u32, column: u32, object: ObjectId) {
        let index = self
            .index(row, column)
            .unwrap_or_else(|| panic!("tile ({row}, {column}) is outside the {} grid", self.side));
        let tile = &mut self.tiles[index];
        assert!(
            tile.occupant.is_none(),
            "tile {} already occupied by {:?} while placing {object}",
            TilePosition::new(self.side, row, column),
            tile.occupant,
        );
        tile.occupant = Some(object);
    }

    /// Clears the occupant of a tile.
    ///
    /// # Panics
    ///
    /// Panics if the tile does not record `object`: the roster and the grid
    /// have drifted apart.
    pub(crate) fn vacate(&mut self, row: u32, column: u32, object: ObjectId) {
        let index = self
            .index(row, column)
            .unwrap_or_else(|| panic!("tile ({row}, {column}) is outside the {} grid", self.side));
        let tile = &mut self.tiles[index];
        assert_eq!(
            tile.occupant,
            Some(object),
            "occupancy desync at {}",
            TilePosition::new(self.side, row, column),
        );
        tile.occupant = None;
    }

    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_occupied()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_row_major_front_to_back() {
        let grid = TileGrid::new(FieldSide::Right, GridDimensions::new(2, 2));
        let positions: Vec<_> = grid.positions().map(|p| (p.row, p.column)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn place_and_vacate() {
        let mut grid = TileGrid::new(FieldSide::Left, GridDimensions::new(3, 2));
        grid.place(1, 2, ObjectId(7));
        assert_eq!(grid.occupant(1, 2), Some(ObjectId(7)));
        assert_eq!(grid.occupied_count(), 1);

        grid.vacate(1, 2, ObjectId(7));
        assert_eq!(grid.occupant(1, 2), None);
    }

    #[test]
    #[should_panic(expected = "already occupied")]
    fn double_occupancy_fails_fast() {
        let mut grid = TileGrid::new(FieldSide::Left, GridDimensions::new(1, 1));
        grid.place(0, 0, ObjectId(1));
        grid.place(0, 0, ObjectId(2));
    }

    #[test]
    #[should_panic(expected = "occupancy desync")]
    fn vacating_the_wrong_object_fails_fast() {
        let mut grid = TileGrid::new(FieldSide::Left, GridDimensions::new(1, 1));
        grid.place(0, 0, ObjectId(1));
        grid.vacate(0, 0, ObjectId(2));
    }

    #[test]
    fn out_of_range_rows_are_empty() {
        let grid = TileGrid::new(FieldSide::Left, GridDimensions::new(3, 1));
        assert_eq!(grid.row_positions(4).count(), 0);
        assert!(grid.tile(0, 3).is_none());
    }
}
