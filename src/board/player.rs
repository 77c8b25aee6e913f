//! Players and ownership bookkeeping.
//!
//! Exactly two sides compete. A player holds only piece ids; the piece
//! table in `board::state` owns the pieces themselves.

use std::fmt;

use serde::Serialize;

use super::grid::Pos;
use super::piece::PieceId;

/// One of the two competing sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerId {
    North,
    South,
}

/// Both players, in turn order.
pub const ALL_PLAYERS: [PlayerId; 2] = [PlayerId::North, PlayerId::South];

impl PlayerId {
    pub const fn opponent(self) -> PlayerId {
        match self {
            PlayerId::North => PlayerId::South,
            PlayerId::South => PlayerId::North,
        }
    }

    /// Index into per-player arrays.
    pub const fn index(self) -> usize {
        match self {
            PlayerId::North => 0,
            PlayerId::South => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::North => f.write_str("North"),
            PlayerId::South => f.write_str("South"),
        }
    }
}

/// Per-side state: economy and owned piece ids.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gold: u32,
    /// Fixed at game start; always visible to its owner.
    pub base: Pos,
    /// Owned piece ids in creation order. Drives heal and AI iteration
    /// order, so it must stay deterministic.
    pub pieces: Vec<PieceId>,
    /// Cleared when the Home is destroyed.
    pub home: Option<PieceId>,
    /// Cleared when the King is destroyed.
    pub king: Option<PieceId>,
}

impl Player {
    pub fn new(id: PlayerId, name: String, gold: u32, base: Pos) -> Self {
        Player {
            id,
            name,
            gold,
            base,
            pieces: Vec::new(),
            home: None,
            king: None,
        }
    }

    /// Drops `piece` from the owned list and from the Home/King reference
    /// if it held one.
    pub fn forget_piece(&mut self, piece: PieceId) {
        self.pieces.retain(|&id| id != piece);
        if self.home == Some(piece) {
            self.home = None;
        }
        if self.king == Some(piece) {
            self.king = None;
        }
    }

    /// A side has lost once either its Home or its King is gone.
    pub fn has_lost(&self) -> bool {
        self.home.is_none() || self.king.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_involutive() {
        for p in ALL_PLAYERS {
            assert_eq!(p.opponent().opponent(), p);
        }
        assert_ne!(PlayerId::North, PlayerId::South);
    }

    #[test]
    fn forget_piece_clears_references() {
        let mut player = Player::new(PlayerId::North, "North".into(), 10, Pos::new(1, 1));
        player.pieces = vec![PieceId(1), PieceId(2)];
        player.home = Some(PieceId(1));
        player.king = Some(PieceId(2));

        player.forget_piece(PieceId(1));
        assert_eq!(player.pieces, vec![PieceId(2)]);
        assert_eq!(player.home, None);
        assert_eq!(player.king, Some(PieceId(2)));
        assert!(player.has_lost());
    }
}
