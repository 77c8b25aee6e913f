//! Grid cells and occupancy.
//!
//! A bounded 2D cell space mapping occupied cells to piece ids. The grid
//! knows nothing about pieces beyond their ids; the piece table in
//! `board::state` is the single owner of piece data.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::piece::PieceId;
use crate::error::ActionError;

/// A cell coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    /// Manhattan distance: |dx| + |dy|. Used for movement, attack range,
    /// vision, and placement radius.
    pub fn manhattan(self, other: Pos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Chebyshev distance: max(|dx|, |dy|). Used for heal adjacency.
    pub fn chebyshev(self, other: Pos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Bounded cell space with at most one piece per cell.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: HashMap<Pos, PieceId>,
}

impl Grid {
    /// Creates an empty grid with the given extents.
    pub fn new(width: i32, height: i32) -> Self {
        Grid {
            width,
            height,
            cells: HashMap::new(),
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Boundary test using closed extents: 0 <= x < width, 0 <= y < height.
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Returns the piece occupying `pos`, if any.
    pub fn piece_at(&self, pos: Pos) -> Option<PieceId> {
        self.cells.get(&pos).copied()
    }

    /// Registers `id` at `pos`. Rejects out-of-bounds or occupied cells
    /// without mutating anything.
    pub fn place(&mut self, id: PieceId, pos: Pos) -> Result<(), ActionError> {
        if !self.in_bounds(pos) {
            return Err(ActionError::OutOfBounds(pos));
        }
        if self.cells.contains_key(&pos) {
            return Err(ActionError::CellOccupied(pos));
        }
        self.cells.insert(pos, id);
        Ok(())
    }

    /// Clears the occupancy entry for `pos`. No-op if the cell is empty.
    pub fn remove(&mut self, pos: Pos) {
        self.cells.remove(&pos);
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.len()
    }
}
