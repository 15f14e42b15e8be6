//! Targeting resolution: actor + rule -> at most one tile.
//!
//! Column 0 is the front of both grids, so "front to back" is ascending
//! column order regardless of side.

use crate::action::{Priority, Targeting};
use crate::env::{RngOracle, compute_seed};
use crate::state::{Field, FieldSide, ObjectId, TilePosition};

/// Resolves `rule` for `actor` against the current field.
///
/// Returns `None` when the actor is not deployed or no candidate exists.
/// Random picks advance the field's draw nonce.
pub fn resolve_target(
    field: &mut Field,
    rng: &dyn RngOracle,
    actor: ObjectId,
    rule: &Targeting,
) -> Option<TilePosition> {
    let object = field.object(actor)?;
    let origin = object.position?;

    // A targeting override replaces every directional rule.
    let rule = match rule {
        Targeting::SelfTile => return Some(origin),
        declared => object
            .statuses
            .targeting_override()
            .unwrap_or(declared)
            .clone(),
    };

    let Targeting::HorizontalDirection {
        side,
        priority,
        is_excluding_oneself,
        does_search_other_rows,
    } = rule
    else {
        return Some(origin);
    };

    let target_side = origin.side.relative(side);
    let excluded = (is_excluding_oneself && target_side == origin.side).then_some(origin);
    let height = field.dimensions().height;

    for row in search_rows(origin.row, height, does_search_other_rows) {
        let candidates = candidates_in_row(field, target_side, row, excluded);
        if candidates.is_empty() {
            continue;
        }
        let picked = match priority {
            Priority::FrontToBack => candidates[0],
            Priority::BackToFront => candidates[candidates.len() - 1],
            Priority::Random => {
                let seed = compute_seed(
                    field.seed,
                    field.take_nonce(),
                    actor.0,
                    field.tick.0 as u32,
                );
                candidates[rng.pick_index(seed, candidates.len())]
            }
        };
        tracing::trace!(%actor, target = %picked, "target resolved");
        return Some(picked);
    }
    None
}

/// Rows to scan: the actor's row, then offsets +1, -1, +2, -2, ...
/// skipping rows outside the grid.
fn search_rows(row: u32, height: u32, search_other_rows: bool) -> Vec<u32> {
    let mut rows = vec![row];
    if !search_other_rows {
        return rows;
    }
    for offset in 1..height {
        if let Some(below) = row.checked_add(offset).filter(|r| *r < height) {
            rows.push(below);
        }
        if let Some(above) = row.checked_sub(offset) {
            rows.push(above);
        }
    }
    rows
}

fn candidates_in_row(
    field: &Field,
    side: FieldSide,
    row: u32,
    excluded: Option<TilePosition>,
) -> Vec<TilePosition> {
    let grid = field.grid(side);
    grid.row_positions(row)
        .filter(|position| Some(*position) != excluded)
        .filter(|position| grid.occupant(position.row, position.column).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::RelativeSide;
    use crate::env::{FieldObjectPreset, PcgRng};
    use crate::state::{FieldObject, StatusEntry, StatusKind};

    fn place(field: &mut Field, side: FieldSide, row: u32, column: u32) -> ObjectId {
        let id = field.allocate_object_id();
        let object = FieldObject::from_preset(&FieldObjectPreset::new("dummy"), id);
        field.insert(object, TilePosition::new(side, row, column));
        id
    }

    fn directional(side: RelativeSide, priority: Priority, exclude: bool, search: bool) -> Targeting {
        Targeting::HorizontalDirection {
            side,
            priority,
            is_excluding_oneself: exclude,
            does_search_other_rows: search,
        }
    }

    #[test]
    fn self_tile_always_resolves() {
        let mut field = Field::new(3, 3);
        let actor = place(&mut field, FieldSide::Left, 1, 2);
        assert_eq!(
            resolve_target(&mut field, &PcgRng, actor, &Targeting::SelfTile),
            Some(TilePosition::new(FieldSide::Left, 1, 2))
        );
    }

    #[test]
    fn front_and_back_priorities_pick_row_extremes() {
        let mut field = Field::new(3, 2);
        let actor = place(&mut field, FieldSide::Left, 0, 0);
        place(&mut field, FieldSide::Right, 0, 0);
        place(&mut field, FieldSide::Right, 0, 2);

        let front = directional(RelativeSide::Enemy, Priority::FrontToBack, false, false);
        let back = directional(RelativeSide::Enemy, Priority::BackToFront, false, false);
        assert_eq!(
            resolve_target(&mut field, &PcgRng, actor, &front),
            Some(TilePosition::new(FieldSide::Right, 0, 0))
        );
        assert_eq!(
            resolve_target(&mut field, &PcgRng, actor, &back),
            Some(TilePosition::new(FieldSide::Right, 0, 2))
        );
    }

    #[test]
    fn excluding_oneself_on_empty_row_is_unresolved() {
        let mut field = Field::new(3, 3);
        let actor = place(&mut field, FieldSide::Left, 1, 0);
        place(&mut field, FieldSide::Left, 0, 0);

        let rule = directional(RelativeSide::Ally, Priority::FrontToBack, true, false);
        assert_eq!(resolve_target(&mut field, &PcgRng, actor, &rule), None);

        let searching = directional(RelativeSide::Ally, Priority::FrontToBack, true, true);
        assert_eq!(
            resolve_target(&mut field, &PcgRng, actor, &searching),
            Some(TilePosition::new(FieldSide::Left, 0, 0))
        );
    }

    #[test]
    fn other_rows_are_searched_below_first() {
        assert_eq!(search_rows(2, 5, true), vec![2, 3, 1, 4, 0]);
        assert_eq!(search_rows(0, 3, true), vec![0, 1, 2]);
        assert_eq!(search_rows(1, 3, false), vec![1]);

        let mut field = Field::new(2, 3);
        let actor = place(&mut field, FieldSide::Left, 1, 0);
        let above = place(&mut field, FieldSide::Right, 0, 1);
        let below = place(&mut field, FieldSide::Right, 2, 1);
        let rule = directional(RelativeSide::Enemy, Priority::FrontToBack, false, true);
        let target = resolve_target(&mut field, &PcgRng, actor, &rule);
        assert_eq!(target.and_then(|t| field.occupant_at(t)), Some(below));
        assert_ne!(Some(above), target.and_then(|t| field.occupant_at(t)));
    }

    #[test]
    fn random_priority_is_deterministic_and_consumes_nonce() {
        let build = || {
            let mut field = Field::with_seed(11, 4, 1);
            let actor = place(&mut field, FieldSide::Left, 0, 0);
            for column in 0..4 {
                place(&mut field, FieldSide::Right, 0, column);
            }
            (field, actor)
        };
        let rule = directional(RelativeSide::Enemy, Priority::Random, false, false);
        let (mut a, actor) = build();
        let (mut b, _) = build();
        let first = resolve_target(&mut a, &PcgRng, actor, &rule);
        assert_eq!(first, resolve_target(&mut b, &PcgRng, actor, &rule));
        assert_eq!(a.nonce(), 1);
        assert_eq!(first.map(|t| t.side), Some(FieldSide::Right));
    }

    #[test]
    fn targeting_override_replaces_directional_rules() {
        let mut field = Field::new(2, 1);
        let actor = place(&mut field, FieldSide::Left, 0, 0);
        let ally = place(&mut field, FieldSide::Left, 0, 1);
        place(&mut field, FieldSide::Right, 0, 0);

        let confused = directional(RelativeSide::Ally, Priority::FrontToBack, true, false);
        field
            .object_mut(actor)
            .unwrap()
            .statuses
            .push(StatusEntry::ticks(StatusKind::TargetingModification(confused), 2));

        let target = resolve_target(&mut field, &PcgRng, actor, &Targeting::front_enemy());
        assert_eq!(target.and_then(|t| field.occupant_at(t)), Some(ally));
    }
}
