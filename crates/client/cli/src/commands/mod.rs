//! Subcommands of the `battle` binary.

mod inspect;
mod presets;
mod run;

pub use inspect::Inspect;
pub use presets::Presets;
pub use run::Run;

use std::path::PathBuf;

use anyhow::Result;
use battle_content::{ContentFactory, builtin_catalog};
use battle_core::{BattleConfig, Field, FieldSide, PresetCatalog};

/// Output format shared by the subcommands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Summary,
    /// Full JSON output
    Json,
}

/// Catalog and rules from `data_dir`, or the built-in ones when no directory
/// is given.
fn load_rules(data_dir: Option<&PathBuf>) -> Result<(PresetCatalog, BattleConfig)> {
    match data_dir {
        Some(dir) => {
            let factory = ContentFactory::new(dir);
            Ok((factory.load_presets()?, factory.load_config()?))
        }
        None => Ok((builtin_catalog()?, BattleConfig::default())),
    }
}

/// One line per live object: side, tile, label, life.
fn roster_lines(field: &Field) -> Vec<String> {
    FieldSide::ALL
        .into_iter()
        .flat_map(|side| field.objects_on(side))
        .map(|object| {
            let position = object
                .position
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_owned());
            format!(
                "{position:<14} {:<12} life {}/{} shield {}",
                object.label(),
                object.life_points,
                object.effective_max_life_points(),
                object.shield_points,
            )
        })
        .collect()
}
