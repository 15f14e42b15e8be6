//! Preset catalog loader.

use std::path::Path;

use battle_core::{FieldObjectPreset, PresetCatalog};

use crate::loaders::{LoadResult, read_file};

/// Loader for field object presets from RON files.
pub struct PresetLoader;

impl PresetLoader {
    /// Load a preset catalog from a RON file.
    ///
    /// RON format: `Vec<FieldObjectPreset>`; omitted preset fields take
    /// their defaults.
    pub fn load(path: &Path) -> LoadResult<PresetCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<PresetCatalog> {
        let presets: Vec<FieldObjectPreset> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse preset catalog RON: {}", e))?;
        PresetCatalog::new(presets)
            .map_err(|e| anyhow::anyhow!("Invalid preset catalog: {}", e))
    }
}
