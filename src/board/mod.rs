//! Board representation and game-state types.
//!
//! Contains the core data structures for the grid, pieces, players, and
//! the overall game state.

pub mod grid;
pub mod piece;
pub mod player;
pub mod state;

pub use grid::{Grid, Pos};
pub use piece::{Piece, PieceId, PieceKind, UpgradeAttribute, ALL_KINDS};
pub use player::{Player, PlayerId, ALL_PLAYERS};
pub use state::{GameState, TurnPhase};
