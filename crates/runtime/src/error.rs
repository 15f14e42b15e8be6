//! Errors surfaced by the runtime.

use battle_core::{BattleError, EngineError, ErrorSeverity, FieldSide};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("scenario grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("placement of {preset_id} on {side} row {row} column {column} failed")]
    Placement {
        preset_id: String,
        side: FieldSide,
        row: u32,
        column: u32,
        #[source]
        source: EngineError,
    },

    #[error("match already finished: {0}")]
    Finished(crate::Outcome),

    #[error("snapshot encoding failed")]
    Snapshot(#[source] bincode::Error),

    #[error("snapshot state root mismatch: recorded {expected}, computed {actual}")]
    CorruptedSnapshot { expected: String, actual: String },

    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BattleError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Engine(err) => err.severity(),
            Self::Placement { source, .. } => source.severity(),
            Self::EmptyGrid { .. } => ErrorSeverity::Validation,
            Self::Finished(_) => ErrorSeverity::Recoverable,
            Self::Snapshot(_) | Self::CorruptedSnapshot { .. } | Self::Io(_) => {
                ErrorSeverity::Internal
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Engine(err) => err.error_code(),
            Self::EmptyGrid { .. } => "RUNTIME_EMPTY_GRID",
            Self::Placement { .. } => "RUNTIME_PLACEMENT_FAILED",
            Self::Finished(_) => "RUNTIME_MATCH_FINISHED",
            Self::Snapshot(_) => "RUNTIME_SNAPSHOT_ENCODING",
            Self::CorruptedSnapshot { .. } => "RUNTIME_SNAPSHOT_CORRUPTED",
            Self::Io(_) => "RUNTIME_SNAPSHOT_IO",
        }
    }
}
