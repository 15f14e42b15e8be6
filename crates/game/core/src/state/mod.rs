//! Authoritative field state representation.
//!
//! This module owns the grids, the roster of live field objects and the
//! field-level markers. Runtime layers clone or query this state but mutate
//! it exclusively through the engine.
pub mod types;

pub use types::{
    AuraSource, Duration, FieldEffect, FieldObject, FieldSide, GridDimensions, ObjectId,
    StatusEntries, StatusEntry, StatusFlags, StatusKind, Tick, Tile, TileGrid, TilePosition,
};
pub(crate) use types::apply_bonus;

/// Canonical snapshot of the deterministic battle state.
///
/// The roster is insertion-ordered and that order is the tie-break for every
/// "simultaneous" step of the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// RNG seed for deterministic random generation.
    ///
    /// Combined with `nonce` to generate a unique seed for every random draw.
    pub seed: u64,

    /// Number of random draws performed so far.
    nonce: u64,

    /// Sequential object ID allocator (monotonically increasing).
    next_object_id: ObjectId,

    /// Number of closed ticks.
    pub tick: Tick,

    left: TileGrid,
    right: TileGrid,
    roster: Vec<FieldObject>,
    pub field_effects: Vec<FieldEffect>,
}

impl Field {
    /// Builds empty mirrored grids with no objects.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_seed(0, width, height)
    }

    pub fn with_seed(seed: u64, width: u32, height: u32) -> Self {
        let dimensions = GridDimensions::new(width, height);
        Self {
            seed,
            nonce: 0,
            next_object_id: ObjectId::FIRST,
            tick: Tick::ZERO,
            left: TileGrid::new(FieldSide::Left, dimensions),
            right: TileGrid::new(FieldSide::Right, dimensions),
            roster: Vec::new(),
            field_effects: Vec::new(),
        }
    }

    pub fn dimensions(&self) -> GridDimensions {
        self.left.dimensions()
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Returns the current nonce and advances it.
    pub(crate) fn take_nonce(&mut self) -> u64 {
        let nonce = self.nonce;
        self.nonce += 1;
        nonce
    }

    pub fn grid(&self, side: FieldSide) -> &TileGrid {
        match side {
            FieldSide::Left => &self.left,
            FieldSide::Right => &self.right,
        }
    }

    fn grid_mut(&mut self, side: FieldSide) -> &mut TileGrid {
        match side {
            FieldSide::Left => &mut self.left,
            FieldSide::Right => &mut self.right,
        }
    }

    pub fn contains_position(&self, position: TilePosition) -> bool {
        self.dimensions().contains(position.row, position.column)
    }

    pub fn tile(&self, position: TilePosition) -> Option<&Tile> {
        self.grid(position.side)
            .tile(position.row, position.column)
    }

    pub fn occupant_at(&self, position: TilePosition) -> Option<ObjectId> {
        self.tile(position).and_then(Tile::occupant)
    }

    /// Live objects in roster order.
    pub fn roster(&self) -> &[FieldObject] {
        &self.roster
    }

    pub fn object(&self, id: ObjectId) -> Option<&FieldObject> {
        self.roster.iter().find(|object| object.id == id)
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut FieldObject> {
        self.roster.iter_mut().find(|object| object.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.object(id).is_some()
    }

    /// Objects standing on `side`, in roster order.
    pub fn objects_on(&self, side: FieldSide) -> impl Iterator<Item = &FieldObject> {
        self.roster
            .iter()
            .filter(move |object| object.side() == Some(side))
    }

    /// Roster-ordered ids of the objects standing on any of `tiles`.
    pub fn occupants_of(&self, tiles: &[TilePosition]) -> Vec<ObjectId> {
        self.roster
            .iter()
            .filter(|object| object.position.is_some_and(|p| tiles.contains(&p)))
            .map(|object| object.id)
            .collect()
    }

    /// Allocates a new unique ObjectId.
    pub fn allocate_object_id(&mut self) -> ObjectId {
        let id = self.next_object_id;
        self.next_object_id = id.next();
        id
    }

    /// Appends `object` to the roster standing on `position`.
    ///
    /// # Panics
    ///
    /// Panics if the tile is out of range or occupied, or if the id is
    /// already in the roster. The engine validates both before calling.
    pub(crate) fn insert(&mut self, mut object: FieldObject, position: TilePosition) {
        assert!(
            !self.contains(object.id),
            "object {} is already on the field",
            object.id
        );
        self.grid_mut(position.side)
            .place(position.row, position.column, object.id);
        if object.id >= self.next_object_id {
            self.next_object_id = object.id.next();
        }
        object.position = Some(position);
        self.roster.push(object);
    }

    /// Removes an object from the roster and vacates its tile.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<FieldObject> {
        let index = self.roster.iter().position(|object| object.id == id)?;
        let mut object = self.roster.remove(index);
        if let Some(position) = object.position.take() {
            self.grid_mut(position.side)
                .vacate(position.row, position.column, id);
        }
        Some(object)
    }

    pub fn add_field_effect(&mut self, effect: FieldEffect) {
        self.field_effects.push(effect);
    }

    /// Asserts that roster positions and tile occupants agree.
    ///
    /// # Panics
    ///
    /// Panics on the first disagreement found.
    pub fn check_invariants(&self) {
        for object in &self.roster {
            let position = object
                .position
                .unwrap_or_else(|| panic!("object {} is on the roster without a tile", object.id));
            assert_eq!(
                self.occupant_at(position),
                Some(object.id),
                "occupancy desync at {position}"
            );
        }
        let occupied = self.left.occupied_count() + self.right.occupied_count();
        assert_eq!(
            occupied,
            self.roster.len(),
            "tiles record occupants missing from the roster"
        );
    }

    /// Deterministic SHA-256 digest of the bincode encoding of this field.
    #[cfg(feature = "serde")]
    pub fn state_root(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
