//! Attack resolution.
//!
//! Validates an attack against the grid and the attacker's stats, then
//! applies damage and the destruction cascade in one atomic step. Ore
//! kills pay out a small random gold bonus to the attacking side.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::board::grid::Pos;
use crate::board::piece::{PieceId, PieceKind};
use crate::board::state::GameState;
use crate::error::ActionError;
use crate::event::GameEvent;

/// Resolves one attack from `attacker` against whatever occupies
/// `target_pos`.
///
/// Ownership and phase legality are the caller's concern; this checks the
/// combat rules: a target must exist, must not be friendly, and must be
/// within the attacker's Manhattan attack range. Rejections mutate
/// nothing.
pub fn resolve_attack(
    state: &mut GameState,
    rng: &mut SmallRng,
    attacker: PieceId,
    target_pos: Pos,
) -> Result<Vec<GameEvent>, ActionError> {
    let attacker_piece = state.piece(attacker)?;
    let attacker_owner = attacker_piece.owner;
    let damage = attacker_piece.attack;
    let range = attacker_piece.attack_range;
    let from = attacker_piece.pos;

    let target = state
        .grid
        .piece_at(target_pos)
        .ok_or(ActionError::NoTarget(target_pos))?;
    let target_piece = state.piece(target)?;
    if target_piece.owner.is_some() && target_piece.owner == attacker_owner {
        return Err(ActionError::FriendlyFire);
    }
    let distance = from.manhattan(target_pos);
    if distance > range {
        return Err(ActionError::OutOfRange { distance, range });
    }

    let remaining_hp = state.piece_mut(target)?.take_damage(damage);
    let mut events = vec![GameEvent::AttackResolved {
        attacker,
        target,
        damage,
        remaining_hp,
    }];

    if remaining_hp <= 0 {
        let victim = state.destroy(target)?;
        let gold_awarded = if victim.kind == PieceKind::Ore {
            let bonus = rng.gen_range(1..=3u32);
            if let Some(owner) = attacker_owner {
                state.player_mut(owner).gold += bonus;
            }
            Some(bonus)
        } else {
            None
        };
        events.push(GameEvent::PieceDefeated {
            piece: target,
            gold_awarded,
        });
    }

    Ok(events)
}
