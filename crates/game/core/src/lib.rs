//! Deterministic battle resolution for grid-based tactical combat.
//!
//! `battle-core` defines the canonical rules (impacts, effects, statuses,
//! reactions) and the world state they act upon. Two opposing tile grids make
//! up a [`Field`]; live [`FieldObject`]s are cloned from immutable presets and
//! mutated exclusively through [`engine::BattleEngine`], whose two entry points
//! (`advance_tick` and `apply_interrupt_action`) return an [`EventLog`] as the
//! only observable record of what happened.
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod state;

pub use action::{
    AdditionalDamageSource, AreaShape, AutoAction, Effect, Impact, ImpactList, InterruptAction,
    Priority, ReactionContent, ReactionTrigger, RelativeSide, Skill, SkillList, TargetSelection,
    TargetedImpact, Targeting,
};
pub use config::BattleConfig;
pub use engine::{BattleEngine, BattleEvent, EngineError, EventLog};
pub use env::{
    BattleEnv, CatalogError, FieldObjectPreset, PcgRng, PresetCatalog, PresetOracle, RngOracle,
    compute_seed,
};
pub use error::{BattleError, ErrorSeverity};
pub use state::{
    AuraSource, Duration, Field, FieldEffect, FieldObject, FieldSide, GridDimensions, ObjectId,
    StatusEntries, StatusEntry, StatusFlags, StatusKind, Tick, Tile, TileGrid, TilePosition,
};
