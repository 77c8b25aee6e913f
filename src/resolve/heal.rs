//! The automatic heal phase.
//!
//! Not an action a player chooses: at the end of every turn, each Doctor
//! the acting player owns heals every allied piece (never itself, never a
//! Home) within Chebyshev distance 1, by the Doctor's attack stat, clamped
//! at the target's max hp. Doctors and targets iterate in owner-list
//! order so a seeded game replays identically.

use crate::board::piece::PieceKind;
use crate::board::player::PlayerId;
use crate::board::state::GameState;
use crate::event::GameEvent;

/// Runs the heal phase for `player`. Emits `HealApplied` only when hp
/// actually changed.
pub fn run_heal_phase(state: &mut GameState, player: PlayerId) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let owned = state.player(player).pieces.clone();

    for &healer in &owned {
        let Ok(piece) = state.piece(healer) else { continue };
        if piece.kind != PieceKind::Doctor {
            continue;
        }
        let heal_amount = piece.attack;
        let healer_pos = piece.pos;

        for &target in &owned {
            if target == healer {
                continue;
            }
            let Ok(target_piece) = state.piece(target) else { continue };
            if target_piece.kind == PieceKind::Home {
                continue;
            }
            if healer_pos.chebyshev(target_piece.pos) > 1 {
                continue;
            }
            let before = target_piece.hp;
            let new_hp = match state.piece_mut(target) {
                Ok(p) => p.restore(heal_amount),
                Err(_) => continue,
            };
            if new_hp != before {
                events.push(GameEvent::HealApplied { healer, target, new_hp });
            }
        }
    }
    events
}
