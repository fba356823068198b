//! Active falling piece logic

use crate::board::{BOARD_HEIGHT, Grid, LockedMap};
use crate::tetromino::PieceKind;

/// Spawn origin: top center of the board
pub const SPAWN_COL: i32 = 5;
pub const SPAWN_ROW: i32 = 0;

/// The active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The kind of piece
    pub kind: PieceKind,
    /// Origin column, increases rightward
    pub col: i32,
    /// Origin row, increases downward; may briefly be above the board
    pub row: i32,
    /// Index into the kind's rotation frames, always < frame count
    pub rotation: usize,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            col: SPAWN_COL,
            row: SPAWN_ROW,
            rotation: 0,
        }
    }

    /// Get the absolute positions of all 4 cells as (col, row)
    pub fn cells(&self) -> [(i32, i32); 4] {
        let frame = self.kind.frames()[self.rotation];
        frame.map(|(dc, dr)| (self.col + dc, self.row + dr))
    }

    /// Try to move by (dc, dr), returns true if the move was committed
    ///
    /// The attempt is atomic: on failure the origin is rolled back and the
    /// piece is exactly as it was before the call.
    pub fn try_move(&mut self, dc: i32, dr: i32, grid: &Grid) -> bool {
        self.col += dc;
        self.row += dr;
        if grid.are_cells_valid(&self.cells()) {
            true
        } else {
            self.col -= dc;
            self.row -= dr;
            false
        }
    }

    /// Try to advance to the next rotation frame, returns true on success
    ///
    /// No wall kicks: a rotation that collides with a wall or locked cells
    /// fails outright and leaves the piece untouched.
    pub fn try_rotate(&mut self, grid: &Grid) -> bool {
        let previous = self.rotation;
        self.rotation = (self.rotation + 1) % self.kind.frames().len();
        if grid.are_cells_valid(&self.cells()) {
            true
        } else {
            self.rotation = previous;
            false
        }
    }

    /// Whether moving down by one row would hit the floor or a locked cell
    pub fn has_landed(&self, locked: &LockedMap) -> bool {
        self.cells()
            .iter()
            .any(|&(col, row)| row + 1 >= BOARD_HEIGHT as i32 || locked.contains(col, row + 1))
    }
}
