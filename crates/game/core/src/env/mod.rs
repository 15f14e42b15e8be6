//! Read-only collaborators of the engine.
//!
//! Presets, randomness and configuration are supplied from outside and never
//! mutated during resolution. [`BattleEnv`] bundles them so engine entry
//! points take a single borrowed argument.
mod presets;
mod rng;

pub use presets::{CatalogError, FieldObjectPreset, PresetCatalog, PresetOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};

use crate::config::BattleConfig;

#[derive(Clone, Copy)]
pub struct BattleEnv<'a> {
    presets: &'a dyn PresetOracle,
    rng: &'a dyn RngOracle,
    config: &'a BattleConfig,
}

impl<'a> BattleEnv<'a> {
    pub fn new(
        presets: &'a dyn PresetOracle,
        rng: &'a dyn RngOracle,
        config: &'a BattleConfig,
    ) -> Self {
        Self {
            presets,
            rng,
            config,
        }
    }

    pub fn presets(&self) -> &'a dyn PresetOracle {
        self.presets
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a BattleConfig {
        self.config
    }
}

impl core::fmt::Debug for BattleEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BattleEnv")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}
