//! Structured events for the rendering layer.
//!
//! Mutating operations return the events they produced; the core never
//! prints anything itself. Serialize so the session layer can forward
//! them over whatever channel it likes.

use serde::Serialize;

use crate::board::piece::PieceId;
use crate::board::player::PlayerId;

/// Something the rendering layer may want to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// An attack landed. `remaining_hp` is the target's hp after damage,
    /// clamped at zero.
    AttackResolved {
        attacker: PieceId,
        target: PieceId,
        damage: i32,
        remaining_hp: i32,
    },

    /// A piece dropped to zero hp and was removed. `gold_awarded` is set
    /// when the victim was an Ore deposit.
    PieceDefeated {
        piece: PieceId,
        gold_awarded: Option<u32>,
    },

    /// A Doctor restored hp to an adjacent ally during the heal phase.
    HealApplied {
        healer: PieceId,
        target: PieceId,
        new_hp: i32,
    },

    /// The match is over.
    GameOver { winner: PlayerId },
}
