//! Battle configuration loader.

use std::path::Path;

use battle_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`BattleConfig`] from a TOML file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::FieldSide;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("max_reaction_depth = 4\n").unwrap();
        assert_eq!(config.max_reaction_depth, 4);
        assert_eq!(config.player_side, FieldSide::Left);
    }

    #[test]
    fn player_side_is_read_by_variant_name() {
        let config = ConfigLoader::parse("player_side = \"Right\"\n").unwrap();
        assert_eq!(config.player_side, FieldSide::Right);
        assert_eq!(
            config.max_reaction_depth,
            BattleConfig::DEFAULT_MAX_REACTION_DEPTH
        );
    }
}
