//! Read and inspect snapshot files written by `battle run --snapshot-dir`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use battle_runtime::Snapshot;
use clap::Parser;

use super::{OutputFormat, roster_lines};

/// Inspect a saved field snapshot
#[derive(Parser)]
pub struct Inspect {
    /// Snapshot file (e.g. snapshots/field_12.bin)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let bytes = std::fs::read(&self.file)
            .with_context(|| format!("Failed to read snapshot: {}", self.file.display()))?;
        let snapshot = Snapshot::decode(&bytes)
            .with_context(|| format!("Failed to decode snapshot: {}", self.file.display()))?;

        match self.format {
            OutputFormat::Summary => {
                let field = &snapshot.field;
                let dimensions = field.dimensions();
                println!("Tick:       {}", field.tick);
                println!("Grid:       {}x{}", dimensions.width, dimensions.height);
                println!("Seed:       {} (nonce {})", field.seed, field.nonce());
                println!("Objects:    {}", field.roster().len());
                println!("State root: {}", hex::encode(snapshot.state_root));
                println!();
                for line in roster_lines(field) {
                    println!("  {line}");
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&snapshot.field)?);
            }
        }

        Ok(())
    }
}
