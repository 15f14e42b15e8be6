//! Content factory for loading battle content from a data directory.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, PresetCatalog};

use crate::loaders::{ConfigLoader, LoadResult, PresetLoader, ScenarioLoader};
use crate::scenario::Scenario;

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── presets.ron
/// └── scenarios/
///     └── duel.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the preset catalog from `presets.ron`.
    pub fn load_presets(&self) -> LoadResult<PresetCatalog> {
        PresetLoader::load(&self.data_dir.join("presets.ron"))
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{}.ron", name));
        ScenarioLoader::load(&path)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn loads_from_a_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "max_reaction_depth = 3\n").unwrap();
        std::fs::write(dir.path().join("presets.ron"), r#"[(id: "tester")]"#).unwrap();
        std::fs::create_dir(dir.path().join("scenarios")).unwrap();
        std::fs::write(
            dir.path().join("scenarios").join("solo.ron"),
            r#"(width: 1, height: 1, seed: 3, placements: [(preset_id: "tester", side: Left, row: 0, column: 0)])"#,
        )
        .unwrap();

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().max_reaction_depth, 3);
        assert_eq!(factory.load_presets().unwrap().len(), 1);
        assert_eq!(factory.load_scenario("solo").unwrap().seed, 3);

        let err = factory.load_scenario("missing").unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
