//! Fogline engine library.
//!
//! A turn-based tactical grid-combat simulation core: board and economy
//! model, fog-of-war visibility, combat and heal resolution, the turn
//! state machine, and a scripted opponent. The surrounding session layer
//! owns all I/O and drives the [`engine::Game`] operations.

pub mod ai;
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod resolve;
pub mod visibility;

pub use board::{Pos, PieceId, PieceKind, PlayerId, TurnPhase, UpgradeAttribute};
pub use config::{ConfigError, GameConfig, KindStats};
pub use engine::Game;
pub use error::ActionError;
pub use event::GameEvent;
pub use visibility::PlayerView;
