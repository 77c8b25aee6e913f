//! Rules resolution.
//!
//! Applies validated actions to the game state: combat damage and
//! destruction, the automatic heal phase, and turn/phase sequencing with
//! win detection.

pub mod combat;
pub mod heal;
pub mod phase;

pub use combat::resolve_attack;
pub use heal::run_heal_phase;
pub use phase::{advance_turn, apply_win_check, winner_if_decided};
