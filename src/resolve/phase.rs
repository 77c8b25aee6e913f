//! Turn sequencing and win detection.
//!
//! The per-player phase flow is StructureAttack -> Purchases ->
//! PieceActions, then the automatic heal phase and a win check before play
//! passes to the opponent. The win check also runs after every attack
//! resolution, so a mid-turn Home or King kill ends the game immediately.

use crate::board::player::{PlayerId, ALL_PLAYERS};
use crate::board::state::{GameState, TurnPhase};
use crate::event::GameEvent;

/// Returns the winner if either side has lost its Home or King.
///
/// A side loses the moment either piece is gone; destruction at zero hp
/// already removed it from the player's references, so absence is the
/// whole test.
pub fn winner_if_decided(state: &GameState) -> Option<PlayerId> {
    for player in ALL_PLAYERS {
        if state.player(player).has_lost() {
            return Some(player.opponent());
        }
    }
    None
}

/// Runs the win check and, if decided, moves the machine to its terminal
/// state and returns the `GameOver` event.
pub fn apply_win_check(state: &mut GameState) -> Option<GameEvent> {
    let winner = winner_if_decided(state)?;
    state.phase = TurnPhase::GameOver(winner);
    Some(GameEvent::GameOver { winner })
}

/// Hands the turn to the opponent: resets the phase, clears per-turn
/// bookkeeping, and bumps the turn counter when play wraps back to the
/// first player.
pub fn advance_turn(state: &mut GameState) {
    let next = state.active.opponent();
    if next == PlayerId::North {
        state.turn += 1;
    }
    state.active = next;
    state.phase = TurnPhase::StructureAttack;
    state.acted.clear();
}
