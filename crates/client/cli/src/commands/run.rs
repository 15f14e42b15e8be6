//! Run a scenario to completion and report the result.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use battle_content::{ContentFactory, Scenario, ScenarioLoader};
use battle_core::BattleEvent;
use battle_runtime::{FileSnapshotStore, Outcome, RuntimeConfig, Simulation};
use clap::Parser;
use serde::Serialize;

use super::{OutputFormat, load_rules, roster_lines};

/// Run a scenario to completion
#[derive(Parser)]
pub struct Run {
    /// Scenario name under `<data-dir>/scenarios`, or a path to a RON file.
    /// Runs the built-in demo when omitted.
    #[arg(value_name = "SCENARIO")]
    scenario: Option<String>,

    /// Content directory (falls back to BATTLE_DATA_DIR, then built-in content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Stop an undecided match after this many ticks
    #[arg(long, value_name = "TICKS")]
    max_ticks: Option<u64>,

    /// Override the scenario seed
    #[arg(long)]
    seed: Option<u64>,

    /// Save a snapshot after every tick into this directory
    #[arg(long, value_name = "DIR")]
    snapshot_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Serialize)]
struct Report<'a> {
    outcome: Outcome,
    ticks: u64,
    state_root: String,
    events: &'a [BattleEvent],
}

impl Run {
    pub fn execute(self) -> Result<()> {
        let mut runtime = RuntimeConfig::from_env();
        if let Some(max_ticks) = self.max_ticks {
            runtime = runtime.with_max_ticks(max_ticks);
        }
        if let Some(seed) = self.seed {
            runtime = runtime.with_seed(seed);
        }
        if let Some(dir) = &self.data_dir {
            runtime = runtime.with_data_dir(dir);
        }

        let scenario = self.load_scenario(runtime.data_dir.as_deref())?;
        let (catalog, config) = load_rules(runtime.data_dir.as_ref())?;
        let mut simulation = Simulation::from_scenario(&scenario, catalog, config, &runtime)
            .context("Failed to deploy scenario")?;

        let outcome = match &self.snapshot_dir {
            Some(dir) => run_with_snapshots(&mut simulation, dir)?,
            None => simulation.run()?,
        };

        let state_root = hex::encode(simulation.state_root()?);
        match self.format {
            OutputFormat::Summary => {
                println!("Outcome:    {outcome}");
                println!("Ticks:      {}", simulation.field().tick);
                println!("Events:     {}", simulation.events().len());
                println!("State root: {state_root}");
                println!();
                for line in roster_lines(simulation.field()) {
                    println!("  {line}");
                }
            }
            OutputFormat::Json => {
                let report = Report {
                    outcome,
                    ticks: simulation.field().tick.0,
                    state_root,
                    events: simulation.events().as_slice(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }

        Ok(())
    }

    fn load_scenario(&self, data_dir: Option<&Path>) -> Result<Scenario> {
        let Some(name) = &self.scenario else {
            return Ok(Scenario::demo());
        };

        let path = Path::new(name);
        if path.is_file() {
            return ScenarioLoader::load(path);
        }

        let factory = data_dir.map_or_else(ContentFactory::bundled, ContentFactory::new);
        factory
            .load_scenario(name)
            .with_context(|| format!("Unknown scenario '{}'", name))
    }
}

fn run_with_snapshots(simulation: &mut Simulation, dir: &Path) -> Result<Outcome> {
    let store = FileSnapshotStore::new(dir)?;
    store.save(&simulation.snapshot()?)?;

    loop {
        if let Some(outcome) = simulation.outcome() {
            tracing::info!(dir = %store.base_dir().display(), "snapshots written");
            return Ok(outcome);
        }
        simulation.step()?;
        store.save(&simulation.snapshot()?)?;
    }
}
