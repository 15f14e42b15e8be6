//! List the presets of the active catalog.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{OutputFormat, load_rules};

/// List the presets of a catalog
#[derive(Parser)]
pub struct Presets {
    /// Content directory (defaults to the built-in catalog)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Presets {
    pub fn execute(self) -> Result<()> {
        let (catalog, _) = load_rules(self.data_dir.as_ref())?;

        match self.format {
            OutputFormat::Summary => {
                for preset in catalog.iter() {
                    let auto_action = preset
                        .auto_action
                        .as_ref()
                        .map(|action| format!("every {} x{}", action.wait, action.repeats))
                        .unwrap_or_else(|| "-".to_owned());
                    println!(
                        "{:<10} life {:>3} armor {:>2} shield {:>2} counter {:>2} skills {} auto {}",
                        preset.id,
                        preset.max_life_points,
                        preset.armor_points,
                        preset.shield_points,
                        preset.counterattack_points,
                        preset.skills.len(),
                        auto_action,
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            }
        }

        Ok(())
    }
}
