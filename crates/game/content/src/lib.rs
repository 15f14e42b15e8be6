//! Static battle content and loaders.
//!
//! This crate houses the built-in preset catalog and the match scenarios fed
//! to the runtime, and provides loaders for RON/TOML data files:
//! - Field object presets (data-driven via RON)
//! - Scenarios: grid size, seed and initial placements (RON)
//! - Battle configuration (TOML)
//!
//! Content is consumed by the engine as read-only input and never appears in
//! field state beyond the preset id copied into each instance.

pub mod presets;
pub mod scenario;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use presets::builtin_catalog;
pub use scenario::{Placement, Scenario};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, PresetLoader, ScenarioLoader};
