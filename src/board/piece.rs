//! Piece kinds and piece data.
//!
//! Every game entity is a `Piece`: the two structures (Home), the royals,
//! the purchasable units, and neutral Ore deposits. Kinds form a closed
//! enum; per-kind base stats live in the config table, never here.

use std::fmt;

use serde::Serialize;

use super::grid::Pos;
use super::player::PlayerId;

/// Stable piece identifier, never reused within a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The archetype of a piece, determining its base stats and legal actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    King,
    Doctor,
    Bow,
    Sword,
    Home,
    Ore,
}

/// All kinds, in stat-table order.
pub const ALL_KINDS: [PieceKind; 6] = [
    PieceKind::King,
    PieceKind::Doctor,
    PieceKind::Bow,
    PieceKind::Sword,
    PieceKind::Home,
    PieceKind::Ore,
];

impl PieceKind {
    /// Display name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Doctor => "Doctor",
            PieceKind::Bow => "Bow",
            PieceKind::Sword => "Sword",
            PieceKind::Home => "Home",
            PieceKind::Ore => "Ore",
        }
    }

    /// Kinds a player may buy. King and Home exist once per player from
    /// setup; Ore is always neutral.
    pub const fn purchasable(self) -> bool {
        matches!(self, PieceKind::Doctor | PieceKind::Bow | PieceKind::Sword)
    }

    /// Structures cannot move and take no per-piece action.
    pub const fn is_structure(self) -> bool {
        matches!(self, PieceKind::Home)
    }

    /// Doctors never declare a manual attack; their offensive stat drives
    /// the automatic heal phase instead.
    pub const fn can_attack(self) -> bool {
        !matches!(self, PieceKind::Doctor | PieceKind::Ore)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The attribute targeted by an upgrade action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UpgradeAttribute {
    /// Raises current and maximum hp together.
    Hp,
    /// Raises attack power (for a Doctor, the heal amount).
    Attack,
    /// Extends attack range by one cell.
    AttackRange,
}

/// A piece on the board.
///
/// Owned exclusively by the piece table in `board::state`; `Player` holds
/// only ids and `Grid` only pos-to-id entries, so there is exactly one
/// authority for every field here.
#[derive(Debug, Clone, Serialize)]
pub struct Piece {
    pub id: PieceId,
    /// `None` marks a neutral piece (only Ore).
    pub owner: Option<PlayerId>,
    pub kind: PieceKind,
    /// Deterministic display name derived from owner, kind, and id.
    /// Cosmetic only.
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub cost: u32,
    pub vision: i32,
    pub move_range: i32,
    pub attack_range: i32,
    pub pos: Pos,
}

impl Piece {
    /// Applies damage, clamping hp at zero. Returns the new hp.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.hp = (self.hp - amount).max(0);
        self.hp
    }

    /// Restores hp, clamping at max. Returns the new hp.
    pub fn restore(&mut self, amount: i32) -> i32 {
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp
    }

    pub fn is_destroyed(&self) -> bool {
        self.hp <= 0
    }
}
