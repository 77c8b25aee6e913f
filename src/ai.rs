//! Scripted opponent.
//!
//! Plays one full turn through the same public operations a human uses,
//! with a fixed policy: maybe buy one unit near the base, then each piece
//! attacks the first enemy in range or steps toward the opposing King.
//! All randomness comes from the game's seeded rng, so scripted games
//! replay exactly.

use rand::Rng;

use crate::board::grid::Pos;
use crate::board::piece::{PieceId, PieceKind};
use crate::board::player::PlayerId;
use crate::engine::Game;
use crate::error::ActionError;
use crate::event::GameEvent;

/// Kinds the scripted side considers buying, rolled uniformly.
const BUY_CHOICES: [PieceKind; 3] = [PieceKind::Doctor, PieceKind::Bow, PieceKind::Sword];

/// Minimum gold before the scripted side shops at all.
const BUY_THRESHOLD: u32 = 3;

/// Plays one complete turn for `player` and returns every event it
/// produced, the automatic heal phase included.
pub fn play_turn(game: &mut Game, player: PlayerId) -> Result<Vec<GameEvent>, ActionError> {
    let mut events = Vec::new();

    // The scripted side never fires its Home; the purchase attempt (or the
    // explicit phase end below) declines the structure attack.
    maybe_buy(game, player);
    game.end_purchase_phase(player)?;

    let roster = piece_roster(game, player);
    for piece in roster {
        match decide(game, player, piece) {
            Decision::Attack(target) => {
                let mut produced = game.attack_action(player, piece, target)?;
                let over = produced.iter().any(|e| matches!(e, GameEvent::GameOver { .. }));
                events.append(&mut produced);
                if over {
                    return Ok(events);
                }
            }
            Decision::Step(to) => game.move_action(player, piece, to)?,
            Decision::Skip => game.skip_action(player, piece)?,
        }
    }

    let mut produced = game.end_piece_actions(player)?;
    events.append(&mut produced);
    Ok(events)
}

/// One purchase attempt when the treasury allows it. A rejection (the
/// rolled kind may cost more than current gold) is swallowed; the turn
/// goes on without the unit.
fn maybe_buy(game: &mut Game, player: PlayerId) {
    if game.state().player(player).gold < BUY_THRESHOLD {
        return;
    }

    let base = game.state().player(player).base;
    let mut cells: Vec<Pos> = Vec::new();
    for dx in -1..=1i32 {
        for dy in -1..=1i32 {
            if dx.abs() + dy.abs() != 1 {
                continue;
            }
            let pos = Pos::new(base.x + dx, base.y + dy);
            if game.state().grid.in_bounds(pos) && game.state().grid.piece_at(pos).is_none() {
                cells.push(pos);
            }
        }
    }
    if cells.is_empty() {
        return;
    }

    let kind = BUY_CHOICES[game.rng_mut().gen_range(0..BUY_CHOICES.len())];
    let pos = cells[game.rng_mut().gen_range(0..cells.len())];
    let _ = game.purchase(player, kind, pos);
}

/// Owned non-Home pieces in owner-list order, snapshotted before any of
/// them act.
fn piece_roster(game: &Game, player: PlayerId) -> Vec<PieceId> {
    game.state()
        .player(player)
        .pieces
        .iter()
        .copied()
        .filter(|&id| {
            game.state()
                .piece(id)
                .map(|p| !p.kind.is_structure())
                .unwrap_or(false)
        })
        .collect()
}

enum Decision {
    Attack(Pos),
    Step(Pos),
    Skip,
}

/// Attack the first enemy in range (never as a Doctor), else one step
/// toward the opposing King, else skip.
fn decide(game: &Game, player: PlayerId, piece: PieceId) -> Decision {
    let Ok(actor) = game.state().piece(piece) else {
        return Decision::Skip;
    };

    if actor.kind.can_attack() {
        let mut enemies: Vec<&crate::board::piece::Piece> = game
            .state()
            .pieces()
            .filter(|p| p.owner == Some(player.opponent()))
            .collect();
        enemies.sort_by_key(|p| p.id);
        if let Some(target) = enemies
            .iter()
            .find(|p| actor.pos.manhattan(p.pos) <= actor.attack_range)
        {
            return Decision::Attack(target.pos);
        }
    }

    let Some(king_id) = game.state().player(player.opponent()).king else {
        return Decision::Skip;
    };
    let Ok(king) = game.state().piece(king_id) else {
        return Decision::Skip;
    };

    let dx = king.pos.x - actor.pos.x;
    let dy = king.pos.y - actor.pos.y;
    let step = if dx != 0 {
        Pos::new(actor.pos.x + dx.signum(), actor.pos.y)
    } else if dy != 0 {
        Pos::new(actor.pos.x, actor.pos.y + dy.signum())
    } else {
        return Decision::Skip;
    };

    if actor.move_range >= 1
        && game.state().grid.in_bounds(step)
        && game.state().grid.piece_at(step).is_none()
    {
        Decision::Step(step)
    } else {
        Decision::Skip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::TurnPhase;
    use crate::config::GameConfig;

    #[test]
    fn scripted_turn_completes_and_passes_play() {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        play_turn(&mut game, PlayerId::North).unwrap();
        assert_eq!(game.active_player(), PlayerId::South);
        assert_eq!(game.phase(), TurnPhase::StructureAttack);
    }

    #[test]
    fn scripted_side_shops_when_rich() {
        let mut game = Game::with_seed(GameConfig::default(), 3).unwrap();
        let before = game.state().player(PlayerId::North).pieces.len();
        play_turn(&mut game, PlayerId::North).unwrap();
        // Gold 10 and a free cell by the base: the buy always goes through
        // unless the rolled kind was unaffordable, which it is not here.
        let after = game.state().player(PlayerId::North).pieces.len();
        assert_eq!(after, before + 1);
    }

    #[test]
    fn broke_side_does_not_shop() {
        let mut config = GameConfig::default();
        config.starting_gold = 2;
        let mut game = Game::with_seed(config, 3).unwrap();
        play_turn(&mut game, PlayerId::North).unwrap();
        assert_eq!(game.state().player(PlayerId::North).pieces.len(), 2);
        assert_eq!(game.state().player(PlayerId::North).gold, 2);
    }

    #[test]
    fn pieces_advance_toward_the_opposing_king() {
        let mut config = GameConfig::default();
        config.starting_gold = 0;
        let mut game = Game::with_seed(config, 3).unwrap();
        let king = game.state().player(PlayerId::North).king.unwrap();
        let before = game.state().piece(king).unwrap().pos;

        play_turn(&mut game, PlayerId::North).unwrap();
        let after = game.state().piece(king).unwrap().pos;
        let enemy_king = game.state().player(PlayerId::South).king.unwrap();
        let goal = game.state().piece(enemy_king).unwrap().pos;
        assert!(after.manhattan(goal) < before.manhattan(goal));
        // Steps in x first while |dx| > 0.
        assert_eq!(after, Pos::new(before.x + 1, before.y));
    }

    #[test]
    fn fixed_seed_replays_identically() {
        let run = |seed: u64| {
            let mut game = Game::with_seed(GameConfig::default(), seed).unwrap();
            for _ in 0..6 {
                if game.winner().is_some() {
                    break;
                }
                let side = game.active_player();
                play_turn(&mut game, side).unwrap();
            }
            let mut snapshot: Vec<_> = game
                .state()
                .pieces()
                .map(|p| (p.id, p.kind, p.pos, p.hp))
                .collect();
            snapshot.sort_by_key(|entry| entry.0);
            (
                snapshot,
                game.state().player(PlayerId::North).gold,
                game.state().player(PlayerId::South).gold,
            )
        };
        assert_eq!(run(99), run(99));
    }
}
