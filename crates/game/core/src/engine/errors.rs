//! Errors surfaced by the engine entry points.

use crate::action::TargetSelection;
use crate::env::CatalogError;
use crate::error::{BattleError, ErrorSeverity};
use crate::state::{ObjectId, TilePosition};

/// Errors surfaced while resolving a tick, an interrupt or a placement.
///
/// Any error aborts the whole operation; the caller's field is left exactly
/// as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    #[error("reaction cascade reached depth {depth} (max {max})")]
    ReactionCascadeTooDeep { depth: u32, max: u32 },

    #[error("position {position} is outside the field")]
    PositionOutOfBounds { position: TilePosition },

    #[error("tile {position} is already occupied by {occupant}")]
    TileOccupied {
        position: TilePosition,
        occupant: ObjectId,
    },

    #[error("object {0} is already on the field")]
    DuplicateObjectId(ObjectId),

    #[error("interrupt target {target:?} is not valid for selection '{selection}'")]
    InvalidInterruptTarget {
        selection: TargetSelection,
        target: Option<TilePosition>,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl BattleError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::TileOccupied { .. } => ErrorSeverity::Recoverable,
            Self::PositionOutOfBounds { .. } | Self::InvalidInterruptTarget { .. } => {
                ErrorSeverity::Validation
            }
            Self::DuplicateObjectId(_) => ErrorSeverity::Internal,
            Self::ReactionCascadeTooDeep { .. } => ErrorSeverity::Fatal,
            Self::Catalog(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ReactionCascadeTooDeep { .. } => "ENGINE_REACTION_CASCADE_TOO_DEEP",
            Self::PositionOutOfBounds { .. } => "ENGINE_POSITION_OUT_OF_BOUNDS",
            Self::TileOccupied { .. } => "ENGINE_TILE_OCCUPIED",
            Self::DuplicateObjectId(_) => "ENGINE_DUPLICATE_OBJECT_ID",
            Self::InvalidInterruptTarget { .. } => "ENGINE_INVALID_INTERRUPT_TARGET",
            Self::Catalog(err) => err.error_code(),
        }
    }
}
