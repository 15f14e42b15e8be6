mod common;
mod field_effect;
mod grid;
mod object;
mod status;

pub use common::{FieldSide, GridDimensions, ObjectId, Tick, TilePosition};
pub use field_effect::FieldEffect;
pub use grid::{Tile, TileGrid};
pub use object::FieldObject;
pub(crate) use object::apply_bonus;
pub use status::{AuraSource, Duration, StatusEntries, StatusEntry, StatusFlags, StatusKind};
