//! Board state: the sparse locked-cell map and its dense grid snapshot
//!
//! The locked map is the authoritative record of settled cells. The grid is
//! a dense materialization of it, rebuilt every tick, and is what all
//! collision and line-clear checks run against.

use crate::piece::Piece;
use crate::tetromino::PieceKind;
use std::collections::HashMap;

/// Board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled by a locked piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Sparse mapping from (col, row) to the kind of the piece locked there
///
/// Rows above the visible board are negative; entries there are legal and
/// only matter for the topped-out check.
#[derive(Debug, Clone, Default)]
pub struct LockedMap {
    cells: HashMap<(i32, i32), PieceKind>,
}

impl LockedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a position holds a locked cell
    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.cells.contains_key(&(col, row))
    }

    /// Get the kind locked at a position, if any
    pub fn get(&self, col: i32, row: i32) -> Option<PieceKind> {
        self.cells.get(&(col, row)).copied()
    }

    /// Number of locked cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Write every cell of a piece into the map, keyed by position
    ///
    /// The sole mutator of the map aside from line clearing.
    pub fn lock(&mut self, piece: &Piece) {
        for (col, row) in piece.cells() {
            self.cells.insert((col, row), piece.kind);
        }
    }

    /// Remove full rows and shift the rows above them down
    ///
    /// Full rows are the ones the grid snapshot reports as full; the
    /// snapshot is taken before any removal, so detection is independent of
    /// processing order. Entries within a cleared row are dropped; every
    /// entry strictly above it moves down by one row. Returns the number of
    /// rows cleared.
    pub fn clear_lines(&mut self, grid: &Grid) -> usize {
        let full_rows: Vec<i32> = (0..BOARD_HEIGHT as i32)
            .filter(|&row| grid.is_row_full(row as usize))
            .collect();

        for &cleared in &full_rows {
            self.cells.retain(|&(_, row), _| row != cleared);

            // Shift from the bottom up so a moved entry never lands on one
            // that has yet to move.
            let mut above: Vec<(i32, i32)> = self
                .cells
                .keys()
                .copied()
                .filter(|&(_, row)| row < cleared)
                .collect();
            above.sort_by_key(|&(_, row)| std::cmp::Reverse(row));

            for (col, row) in above {
                if let Some(kind) = self.cells.remove(&(col, row)) {
                    self.cells.insert((col, row + 1), kind);
                }
            }
        }

        full_rows.len()
    }

    /// Whether the stack has reached the spawn zone (a cell settled within
    /// the topmost row)
    pub fn is_topped_out(&self) -> bool {
        self.cells.keys().any(|&(_, row)| row < 1)
    }
}

/// Dense BOARD_HEIGHT x BOARD_WIDTH snapshot of the locked map
#[derive(Debug, Clone)]
pub struct Grid {
    /// Stored as [row][col], row 0 is the top, row increases downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }
}

impl Grid {
    /// Materialize the locked map into a dense grid
    ///
    /// Pure function of the locked map; entries outside the visible board
    /// (negative rows) are not represented.
    pub fn build(locked: &LockedMap) -> Self {
        let mut grid = Self::default();
        for row in 0..BOARD_HEIGHT {
            for col in 0..BOARD_WIDTH {
                if let Some(kind) = locked.get(col as i32, row as i32) {
                    grid.cells[row][col] = Cell::Filled(kind);
                }
            }
        }
        grid
    }

    /// Get the cell at a position
    /// Returns None if out of bounds
    pub fn cell(&self, col: i32, row: i32) -> Option<Cell> {
        if col < 0 || row < 0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        if col >= BOARD_WIDTH || row >= BOARD_HEIGHT {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Check whether one piece cell may occupy a position
    ///
    /// The column must be on the board and the row must not be below it.
    /// Rows above the board (row < 0) are exempt from the occupancy check so
    /// pieces can spawn and rotate partially above the visible area, but not
    /// from the column check.
    pub fn is_cell_valid(&self, col: i32, row: i32) -> bool {
        if col < 0 || col >= BOARD_WIDTH as i32 {
            return false;
        }
        if row < 0 {
            return true;
        }
        if row >= BOARD_HEIGHT as i32 {
            return false;
        }
        self.cells[row as usize][col as usize].is_empty()
    }

    /// Check whether a set of piece cells are all valid
    pub fn are_cells_valid(&self, cells: &[(i32, i32)]) -> bool {
        cells.iter().all(|&(col, row)| self.is_cell_valid(col, row))
    }

    /// Whether every cell in a row is filled
    pub fn is_row_full(&self, row: usize) -> bool {
        row < BOARD_HEIGHT && self.cells[row].iter().all(|cell| cell.is_filled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked_with(cells: &[(i32, i32, PieceKind)]) -> LockedMap {
        let mut locked = LockedMap::new();
        for &(col, row, kind) in cells {
            locked.cells.insert((col, row), kind);
        }
        locked
    }

    fn fill_row(locked: &mut LockedMap, row: i32, skip_col: Option<i32>) {
        for col in 0..BOARD_WIDTH as i32 {
            if Some(col) != skip_col {
                locked.cells.insert((col, row), PieceKind::O);
            }
        }
    }

    #[test]
    fn test_build_materializes_locked_cells() {
        let locked = locked_with(&[(3, 5, PieceKind::T), (0, 19, PieceKind::Z)]);
        let grid = Grid::build(&locked);
        assert_eq!(grid.cell(3, 5), Some(Cell::Filled(PieceKind::T)));
        assert_eq!(grid.cell(0, 19), Some(Cell::Filled(PieceKind::Z)));
        assert_eq!(grid.cell(4, 5), Some(Cell::Empty));
    }

    #[test]
    fn test_build_ignores_rows_above_board() {
        let locked = locked_with(&[(4, -1, PieceKind::S)]);
        let grid = Grid::build(&locked);
        for row in 0..BOARD_HEIGHT as i32 {
            assert_eq!(grid.cell(4, row), Some(Cell::Empty));
        }
    }

    #[test]
    fn test_cell_validity_column_bounds() {
        let grid = Grid::default();
        assert!(!grid.is_cell_valid(-1, 5));
        assert!(!grid.is_cell_valid(BOARD_WIDTH as i32, 5));
        assert!(grid.is_cell_valid(0, 5));
        assert!(grid.is_cell_valid(BOARD_WIDTH as i32 - 1, 5));
    }

    #[test]
    fn test_cell_validity_above_board() {
        // Negative rows skip the occupancy check but keep the column check.
        let grid = Grid::default();
        assert!(grid.is_cell_valid(4, -1));
        assert!(grid.is_cell_valid(4, -3));
        assert!(!grid.is_cell_valid(-1, -1));
        assert!(!grid.is_cell_valid(BOARD_WIDTH as i32, -2));
    }

    #[test]
    fn test_cell_validity_below_board() {
        let grid = Grid::default();
        assert!(!grid.is_cell_valid(4, BOARD_HEIGHT as i32));
    }

    #[test]
    fn test_cell_validity_occupied() {
        let locked = locked_with(&[(4, 10, PieceKind::J)]);
        let grid = Grid::build(&locked);
        assert!(!grid.is_cell_valid(4, 10));
        assert!(grid.is_cell_valid(4, 9));
    }

    #[test]
    fn test_clear_lines_noop_without_full_rows() {
        let mut locked = locked_with(&[(3, 18, PieceKind::T), (4, 19, PieceKind::L)]);
        let grid = Grid::build(&locked);
        assert_eq!(locked.clear_lines(&grid), 0);
        assert_eq!(locked.len(), 2);
        assert_eq!(locked.get(3, 18), Some(PieceKind::T));
        assert_eq!(locked.get(4, 19), Some(PieceKind::L));
    }

    #[test]
    fn test_clear_single_row_shifts_above() {
        let mut locked = LockedMap::new();
        fill_row(&mut locked, 19, None);
        locked.cells.insert((2, 18), PieceKind::Z);
        locked.cells.insert((7, 10), PieceKind::S);

        let grid = Grid::build(&locked);
        assert_eq!(locked.clear_lines(&grid), 1);

        // The full row is gone, everything above moved down exactly one.
        assert_eq!(locked.len(), 2);
        assert_eq!(locked.get(2, 19), Some(PieceKind::Z));
        assert_eq!(locked.get(7, 11), Some(PieceKind::S));
    }

    #[test]
    fn test_clear_middle_row_leaves_rows_below_untouched() {
        let mut locked = LockedMap::new();
        fill_row(&mut locked, 15, None);
        locked.cells.insert((1, 14), PieceKind::T);
        locked.cells.insert((5, 19), PieceKind::J);

        let grid = Grid::build(&locked);
        assert_eq!(locked.clear_lines(&grid), 1);
        assert_eq!(locked.get(1, 15), Some(PieceKind::T));
        assert_eq!(locked.get(5, 19), Some(PieceKind::J));
        assert_eq!(locked.len(), 2);
    }

    #[test]
    fn test_clear_two_rows_compacts_stack() {
        let mut locked = LockedMap::new();
        fill_row(&mut locked, 18, None);
        fill_row(&mut locked, 19, None);
        locked.cells.insert((4, 17), PieceKind::Hook);

        let grid = Grid::build(&locked);
        assert_eq!(locked.clear_lines(&grid), 2);
        assert_eq!(locked.len(), 1);
        assert_eq!(locked.get(4, 19), Some(PieceKind::Hook));
    }

    #[test]
    fn test_clear_preserves_stack_order_above() {
        // A full column segment above the cleared row must keep its order.
        let mut locked = LockedMap::new();
        fill_row(&mut locked, 19, None);
        locked.cells.insert((0, 18), PieceKind::T);
        locked.cells.insert((0, 17), PieceKind::S);
        locked.cells.insert((0, 16), PieceKind::Z);

        let grid = Grid::build(&locked);
        assert_eq!(locked.clear_lines(&grid), 1);
        assert_eq!(locked.get(0, 19), Some(PieceKind::T));
        assert_eq!(locked.get(0, 18), Some(PieceKind::S));
        assert_eq!(locked.get(0, 17), Some(PieceKind::Z));
    }

    #[test]
    fn test_lock_then_clear_last_gap() {
        // Fill row 19 except one column, lock a piece into the gap.
        let mut locked = LockedMap::new();
        fill_row(&mut locked, 19, Some(4));
        locked.cells.insert((6, 18), PieceKind::L);

        // T frame 0 at origin (4,18) has cells (3,18),(4,18),(5,18),(4,19),
        // so its nub fills the gap.
        let filler = Piece {
            kind: PieceKind::T,
            col: 4,
            row: 18,
            rotation: 0,
        };
        assert!(!locked.contains(4, 19));
        locked.lock(&filler);
        assert_eq!(locked.get(4, 19), Some(PieceKind::T));

        let grid = Grid::build(&locked);
        assert_eq!(locked.clear_lines(&grid), 1);

        // Row 19 cleared; the three T cells from row 18 and the L cell
        // shifted down to row 19.
        assert_eq!(locked.get(3, 19), Some(PieceKind::T));
        assert_eq!(locked.get(4, 19), Some(PieceKind::T));
        assert_eq!(locked.get(5, 19), Some(PieceKind::T));
        assert_eq!(locked.get(6, 19), Some(PieceKind::L));
        assert_eq!(locked.len(), 4);
    }

    #[test]
    fn test_topped_out() {
        assert!(!LockedMap::new().is_topped_out());
        assert!(!locked_with(&[(4, 1, PieceKind::T)]).is_topped_out());
        assert!(locked_with(&[(4, 0, PieceKind::T)]).is_topped_out());
        assert!(locked_with(&[(4, -1, PieceKind::T)]).is_topped_out());
    }

    #[test]
    fn test_row_full() {
        let mut locked = LockedMap::new();
        fill_row(&mut locked, 19, Some(9));
        let grid = Grid::build(&locked);
        assert!(!grid.is_row_full(19));

        locked.cells.insert((9, 19), PieceKind::Z);
        let grid = Grid::build(&locked);
        assert!(grid.is_row_full(19));
    }
}
