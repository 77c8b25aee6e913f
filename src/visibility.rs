//! Fog-of-war visibility.
//!
//! A player sees the union of Manhattan vision balls around their own
//! pieces, plus their own base cell. Visibility has no memory: it is
//! recomputed from current positions on every query, so an enemy that was
//! seen and then moved away becomes unknown again. That forgetting is
//! deliberate and load-bearing; do not cache sightings across turns.
//!
//! Agents and renderers must only ever receive the filtered [`PlayerView`],
//! never the raw [`GameState`].

use std::collections::HashSet;

use serde::Serialize;

use crate::board::grid::Pos;
use crate::board::piece::Piece;
use crate::board::player::PlayerId;
use crate::board::state::{GameState, TurnPhase};

/// The set of cells `player` currently observes.
pub fn visible_cells(state: &GameState, player: PlayerId) -> HashSet<Pos> {
    let mut cells = HashSet::new();
    let side = state.player(player);
    cells.insert(side.base);

    for &id in &side.pieces {
        let Ok(piece) = state.piece(id) else { continue };
        let v = piece.vision;
        for dx in -v..=v {
            let rest = v - dx.abs();
            for dy in -rest..=rest {
                let pos = Pos::new(piece.pos.x + dx, piece.pos.y + dy);
                if state.grid.in_bounds(pos) {
                    cells.insert(pos);
                }
            }
        }
    }
    cells
}

/// Everything one player is allowed to know about the current state.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub viewer: PlayerId,
    pub turn: u32,
    pub phase: TurnPhase,
    pub gold: u32,
    pub base: Pos,
    /// The viewer's pieces, in id order, with full stats.
    pub own_pieces: Vec<Piece>,
    /// Enemy and neutral pieces whose cell is currently observed, in id
    /// order. Everything else is withheld.
    pub visible_others: Vec<Piece>,
}

/// Builds the filtered snapshot for `player`.
///
/// Pure query: identical states yield identical views, piece lists sorted
/// by id.
pub fn player_view(state: &GameState, player: PlayerId) -> PlayerView {
    let cells = visible_cells(state, player);

    let mut own_pieces: Vec<Piece> = Vec::new();
    let mut visible_others: Vec<Piece> = Vec::new();
    for piece in state.pieces() {
        if piece.owner == Some(player) {
            own_pieces.push(piece.clone());
        } else if cells.contains(&piece.pos) {
            visible_others.push(piece.clone());
        }
    }
    own_pieces.sort_by_key(|p| p.id);
    visible_others.sort_by_key(|p| p.id);

    let side = state.player(player);
    PlayerView {
        viewer: player,
        turn: state.turn,
        phase: state.phase,
        gold: side.gold,
        base: side.base,
        own_pieces,
        visible_others,
    }
}
