//! Rejection taxonomy for game actions.
//!
//! Every rule violation is a recoverable rejection returned to the caller
//! with no state mutation; the core has no fatal errors. The boundary
//! layer strips malformed input before it gets here, so these variants
//! cover well-typed but rule-breaking requests only.

use crate::board::grid::Pos;
use crate::board::piece::{PieceId, PieceKind};
use crate::board::player::PlayerId;

/// Why an action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("not enough gold: have {have}, need {need}")]
    InsufficientGold { have: u32, need: u32 },

    #[error("position {0} is outside the grid")]
    OutOfBounds(Pos),

    #[error("cell {0} is already occupied")]
    CellOccupied(Pos),

    #[error("target is out of range: distance {distance} exceeds {range}")]
    OutOfRange { distance: i32, range: i32 },

    #[error("no piece at {0}")]
    NoTarget(Pos),

    #[error("cannot attack a friendly piece")]
    FriendlyFire,

    #[error("no such piece: {0}")]
    InvalidPieceReference(PieceId),

    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),

    #[error("action not allowed in the current turn phase")]
    WrongPhase,

    #[error("piece {0} has already acted this turn")]
    PieceAlreadyActed(PieceId),

    #[error("a {0} cannot take that action")]
    KindNotAllowed(PieceKind),
}
