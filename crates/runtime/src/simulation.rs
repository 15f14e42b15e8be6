//! Tick-stepped match driver.

use std::fmt;

use battle_content::Scenario;
use battle_core::{
    BattleConfig, BattleEngine, BattleEnv, BattleEvent, EventLog, Field, FieldSide,
    InterruptAction, PcgRng, PresetCatalog,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::snapshot::Snapshot;

/// How a match ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Outcome {
    /// Only this side has objects left.
    Victory(FieldSide),
    /// Both sides were emptied in the same step.
    Draw,
    /// Both sides still stand when the tick limit is reached.
    TickLimit,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Victory(side) => write!(f, "{side} side wins"),
            Self::Draw => f.write_str("draw"),
            Self::TickLimit => f.write_str("tick limit reached"),
        }
    }
}

/// Owns a field and the collaborators the engine borrows, and drives it tick
/// by tick.
///
/// Every event produced since deployment is kept in order; failed steps leave
/// both the field and the log untouched.
pub struct Simulation {
    field: Field,
    catalog: PresetCatalog,
    config: BattleConfig,
    rng: PcgRng,
    max_ticks: u64,
    events: EventLog,
    outcome: Option<Outcome>,
}

impl Simulation {
    /// Wraps an already populated field.
    pub fn new(
        field: Field,
        catalog: PresetCatalog,
        config: BattleConfig,
        runtime: &RuntimeConfig,
    ) -> Self {
        let mut simulation = Self {
            field,
            catalog,
            config,
            rng: PcgRng,
            max_ticks: runtime.max_ticks,
            events: EventLog::new(),
            outcome: None,
        };
        simulation.outcome = decide(&simulation.field, simulation.max_ticks);
        simulation
    }

    /// Builds an empty field from `scenario` and deploys its placements in
    /// order.
    ///
    /// # Errors
    ///
    /// Fails on an empty grid, or with [`RuntimeError::Placement`] naming the
    /// first placement the engine rejects.
    pub fn from_scenario(
        scenario: &Scenario,
        catalog: PresetCatalog,
        config: BattleConfig,
        runtime: &RuntimeConfig,
    ) -> Result<Self> {
        if scenario.width == 0 || scenario.height == 0 {
            return Err(RuntimeError::EmptyGrid {
                width: scenario.width,
                height: scenario.height,
            });
        }

        let seed = runtime.seed.unwrap_or(scenario.seed);
        let mut simulation = Self::new(
            Field::with_seed(seed, scenario.width, scenario.height),
            catalog,
            config,
            runtime,
        );

        for placement in &scenario.placements {
            let env = BattleEnv::new(&simulation.catalog, &simulation.rng, &simulation.config);
            let mut engine = BattleEngine::new(&mut simulation.field);
            let (id, log) = engine
                .spawn(env, &placement.preset_id, placement.position())
                .map_err(|source| RuntimeError::Placement {
                    preset_id: placement.preset_id.clone(),
                    side: placement.side,
                    row: placement.row,
                    column: placement.column,
                    source,
                })?;
            tracing::debug!(object = %id, preset = %placement.preset_id, "placement deployed");
            simulation.record(log);
        }

        simulation.outcome = decide(&simulation.field, simulation.max_ticks);
        tracing::info!(
            seed,
            width = scenario.width,
            height = scenario.height,
            objects = simulation.field.roster().len(),
            "scenario deployed"
        );
        Ok(simulation)
    }

    /// Rebuilds a simulation around a snapshot's field. The event log starts
    /// empty.
    pub fn restore(
        snapshot: Snapshot,
        catalog: PresetCatalog,
        config: BattleConfig,
        runtime: &RuntimeConfig,
    ) -> Self {
        tracing::info!(tick = %snapshot.field.tick, "restoring from snapshot");
        Self::new(snapshot.field, catalog, config, runtime)
    }

    /// Resolves one tick and returns the events it produced.
    ///
    /// # Errors
    ///
    /// Fails with [`RuntimeError::Finished`] once the match is decided, or
    /// with the engine's error; the field is unchanged in both cases.
    pub fn step(&mut self) -> Result<&[BattleEvent]> {
        if let Some(outcome) = self.outcome {
            return Err(RuntimeError::Finished(outcome));
        }

        let tick = self.field.tick;
        let env = BattleEnv::new(&self.catalog, &self.rng, &self.config);
        let log = BattleEngine::new(&mut self.field).advance_tick(env)?;

        tracing::info!(%tick, events = log.len(), "tick resolved");
        let start = self.record(log);

        self.outcome = decide(&self.field, self.max_ticks);
        if let Some(outcome) = self.outcome {
            tracing::info!(%outcome, tick = %self.field.tick, "match finished");
        }
        Ok(&self.events.as_slice()[start..])
    }

    /// Steps until the match is decided.
    pub fn run(&mut self) -> Result<Outcome> {
        loop {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.step()?;
        }
    }

    /// Resolves an interrupt action between ticks.
    ///
    /// # Errors
    ///
    /// Fails with [`RuntimeError::Finished`] once the match is decided, or
    /// with the engine's validation or cascade error.
    pub fn interrupt(&mut self, action: &InterruptAction) -> Result<&[BattleEvent]> {
        if let Some(outcome) = self.outcome {
            return Err(RuntimeError::Finished(outcome));
        }

        let env = BattleEnv::new(&self.catalog, &self.rng, &self.config);
        let log = BattleEngine::new(&mut self.field).apply_interrupt_action(env, action)?;

        tracing::info!(
            selection = %action.target_selection,
            events = log.len(),
            "interrupt resolved"
        );
        let start = self.record(log);

        self.outcome = decide(&self.field, self.max_ticks);
        Ok(&self.events.as_slice()[start..])
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Every event recorded since deployment or restore.
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn max_ticks(&self) -> u64 {
        self.max_ticks
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        Snapshot::capture(&self.field)
    }

    pub fn state_root(&self) -> Result<[u8; 32]> {
        self.field.state_root().map_err(RuntimeError::Snapshot)
    }

    /// Appends `log` and returns the index of its first event.
    fn record(&mut self, log: EventLog) -> usize {
        let start = self.events.len();
        for event in &log {
            tracing::debug!(kind = event.name(), ?event, "event");
        }
        self.events.append(log);
        start
    }
}

fn decide(field: &Field, max_ticks: u64) -> Option<Outcome> {
    let standing = |side| field.objects_on(side).next().is_some();
    match (standing(FieldSide::Left), standing(FieldSide::Right)) {
        (false, false) => Some(Outcome::Draw),
        (true, false) => Some(Outcome::Victory(FieldSide::Left)),
        (false, true) => Some(Outcome::Victory(FieldSide::Right)),
        (true, true) if field.tick.0 >= max_ticks => Some(Outcome::TickLimit),
        (true, true) => None,
    }
}
