//! Match driver for the battle engine.
//!
//! The runtime owns one [`Field`](battle_core::Field) together with the
//! collaborators the engine borrows (preset catalog, RNG, configuration). It
//! deploys a [`Scenario`](battle_content::Scenario), steps ticks until one
//! side is wiped out or the tick limit is reached, and keeps the accumulated
//! event log.
//!
//! Modules:
//! - [`config`]: runtime limits, overridable from the environment
//! - [`simulation`]: the [`Simulation`] driver and its [`Outcome`]
//! - [`snapshot`]: bincode snapshots of the field, in memory or on disk
pub mod config;
pub mod error;
pub mod simulation;
pub mod snapshot;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use simulation::{Outcome, Simulation};
pub use snapshot::{FileSnapshotStore, Snapshot};
