//! Area mapping: resolved target tile + shape -> affected tiles.

use crate::action::AreaShape;
use crate::state::{Field, FieldSide, TilePosition};

use super::context::Origin;

/// Tiles covered by `shape` around `target`.
///
/// `target` is `None` only for interrupt actions without a target tile; in
/// that case the target-anchored shapes (single, row) cover nothing and
/// `Side` covers the origin's side.
pub(crate) fn map_area(
    field: &Field,
    target: Option<TilePosition>,
    shape: AreaShape,
    origin: &Origin,
) -> Vec<TilePosition> {
    let side_tiles = |side: FieldSide| field.grid(side).positions().collect::<Vec<_>>();

    match (shape, target) {
        (AreaShape::None, _) => Vec::new(),
        (AreaShape::Single, Some(target)) => vec![target],
        (AreaShape::Row, Some(target)) => field
            .grid(target.side)
            .row_positions(target.row)
            .collect(),
        (AreaShape::Single | AreaShape::Row, None) => Vec::new(),
        (AreaShape::Side, target) => side_tiles(target.map_or(origin.side, |t| t.side)),
        (AreaShape::SideExcludingOneself, _) => {
            let mut tiles = side_tiles(origin.side);
            tiles.retain(|tile| Some(*tile) != origin.position);
            tiles
        }
        (AreaShape::All, _) => FieldSide::ALL.into_iter().flat_map(side_tiles).collect(),
    }
}
