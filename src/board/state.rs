//! Game state: the single ownership authority.
//!
//! `GameState` owns the piece table, the grid occupancy, both players, and
//! the turn bookkeeping. Pieces exist only in the table; players and the
//! grid refer to them by id, so destruction can never leave a dangling
//! handle.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::grid::{Grid, Pos};
use super::piece::{Piece, PieceId, PieceKind};
use super::player::{Player, PlayerId};
use crate::config::KindStats;
use crate::error::ActionError;

/// The phase of the acting player's turn.
///
/// Heal and win-check are automatic transitions, not awaited states: they
/// run inside the advance out of `PieceActions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnPhase {
    /// The player may issue one attack from their Home, or decline by
    /// moving on to purchases.
    StructureAttack,
    /// Zero or more purchases.
    Purchases,
    /// Exactly one action per owned non-Home piece.
    PieceActions,
    /// Terminal. Every mutating operation rejects.
    GameOver(PlayerId),
}

/// Complete simulation state at a point in time.
#[derive(Debug, Clone)]
pub struct GameState {
    pub grid: Grid,
    pieces: HashMap<PieceId, Piece>,
    players: [Player; 2],
    next_piece_id: u32,
    /// 1-based full-turn counter; increments when play returns to the
    /// first player.
    pub turn: u32,
    pub active: PlayerId,
    pub phase: TurnPhase,
    /// Pieces that have resolved their one action this turn.
    pub acted: BTreeSet<PieceId>,
}

impl GameState {
    pub fn new(width: i32, height: i32, players: [Player; 2]) -> Self {
        GameState {
            grid: Grid::new(width, height),
            pieces: HashMap::new(),
            players,
            next_piece_id: 0,
            turn: 1,
            active: PlayerId::North,
            phase: TurnPhase::StructureAttack,
            acted: BTreeSet::new(),
        }
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id.index()]
    }

    /// Looks up a live piece, rejecting stale or unknown ids.
    pub fn piece(&self, id: PieceId) -> Result<&Piece, ActionError> {
        self.pieces
            .get(&id)
            .ok_or(ActionError::InvalidPieceReference(id))
    }

    pub fn piece_mut(&mut self, id: PieceId) -> Result<&mut Piece, ActionError> {
        self.pieces
            .get_mut(&id)
            .ok_or(ActionError::InvalidPieceReference(id))
    }

    /// All live pieces, in unspecified order. Callers that need
    /// determinism must sort by id.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Creates a piece from a kind's stat line and registers it on the
    /// grid and with its owner. Validate-then-apply: a placement rejection
    /// leaves no trace of the piece.
    pub fn spawn(
        &mut self,
        owner: Option<PlayerId>,
        kind: PieceKind,
        stats: &KindStats,
        pos: Pos,
    ) -> Result<PieceId, ActionError> {
        let id = PieceId(self.next_piece_id);
        self.grid.place(id, pos)?;
        self.next_piece_id += 1;

        let name = match owner {
            Some(p) => format!("{} {} {}", self.player(p).name, kind, id),
            None => format!("{} {}", kind, id),
        };
        self.pieces.insert(
            id,
            Piece {
                id,
                owner,
                kind,
                name,
                hp: stats.hp,
                max_hp: stats.hp,
                attack: stats.attack,
                cost: stats.cost,
                vision: stats.vision,
                move_range: stats.move_range,
                attack_range: stats.attack_range,
                pos,
            },
        );

        if let Some(p) = owner {
            let player = self.player_mut(p);
            player.pieces.push(id);
            match kind {
                PieceKind::Home => player.home = Some(id),
                PieceKind::King => player.king = Some(id),
                _ => {}
            }
        }
        Ok(id)
    }

    /// Removes a destroyed piece from the grid, its owner's collection,
    /// and the table, in one step. Returns the removed piece.
    pub fn destroy(&mut self, id: PieceId) -> Result<Piece, ActionError> {
        let piece = self
            .pieces
            .remove(&id)
            .ok_or(ActionError::InvalidPieceReference(id))?;
        self.grid.remove(piece.pos);
        if let Some(owner) = piece.owner {
            self.player_mut(owner).forget_piece(id);
        }
        Ok(piece)
    }

    /// Relocates a piece, keeping grid and piece position in sync. The
    /// caller has already validated range; this validates the cell.
    pub fn relocate(&mut self, id: PieceId, to: Pos) -> Result<(), ActionError> {
        let from = self.piece(id)?.pos;
        self.grid.place(id, to)?;
        self.grid.remove(from);
        self.pieces
            .get_mut(&id)
            .ok_or(ActionError::InvalidPieceReference(id))?
            .pos = to;
        Ok(())
    }
}
