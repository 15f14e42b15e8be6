//! Runtime configuration.

use std::env;
use std::path::PathBuf;

/// Limits and overrides applied by the [`Simulation`](crate::Simulation)
/// driver. Battle rules themselves live in
/// [`BattleConfig`](battle_core::BattleConfig).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Ticks after which an undecided match stops.
    pub max_ticks: u64,
    /// Replaces the scenario seed when set.
    pub seed: Option<u64>,
    /// Content directory to load presets and scenarios from.
    pub data_dir: Option<PathBuf>,
}

impl RuntimeConfig {
    pub const DEFAULT_MAX_TICKS: u64 = 100;

    pub fn new() -> Self {
        Self {
            max_ticks: Self::DEFAULT_MAX_TICKS,
            seed: None,
            data_dir: None,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks.max(1);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `BATTLE_MAX_TICKS` - Tick limit of a match (default: 100)
    /// - `BATTLE_SEED` - Overrides the scenario seed
    /// - `BATTLE_DATA_DIR` - Content directory (default: bundled content)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(max_ticks) = read_env::<u64>("BATTLE_MAX_TICKS") {
            config.max_ticks = max_ticks.max(1);
        }
        if let Some(seed) = read_env::<u64>("BATTLE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(dir) = read_env::<PathBuf>("BATTLE_DATA_DIR") {
            config.data_dir = Some(dir);
        }

        config
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
