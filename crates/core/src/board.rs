//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with the color of a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the board (y < 0) are the spawn region: never stored, always free.

use arrayvec::ArrayVec;

use crate::pieces::ShapeMatrix;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices reported by [`Board::find_full_rows`], top to bottom
pub type RowList = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a single mino may sit at (x, y).
    ///
    /// Horizontal bounds and the floor are hard limits. Anything above the
    /// board is free; inside the board the cell must be empty.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    /// Check whether `shape` placed with its top-left corner at (x, y) fits.
    ///
    /// Invalid if any occupied cell lands left of column 0, right of the last
    /// column, below the floor, or on a filled cell. Cells above the board are
    /// always permitted.
    pub fn is_valid_position(&self, shape: &ShapeMatrix, x: i8, y: i8) -> bool {
        shape.minos().all(|(dx, dy)| self.is_free(x + dx, y + dy))
    }

    /// Write every occupied cell of `shape` at (x, y) into the board with `kind`.
    ///
    /// Cells above the board are dropped. Returns the number of cells written.
    pub fn place_piece(&mut self, shape: &ShapeMatrix, x: i8, y: i8, kind: PieceKind) -> usize {
        let mut written = 0;
        for (dx, dy) in shape.minos() {
            let py = y + dy;
            if py < 0 {
                continue;
            }
            if self.set(x + dx, py, Some(kind)) {
                written += 1;
            }
        }
        written
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| cell.is_some()))
            .unwrap_or(false)
    }

    /// Number of filled cells in a row (0 for rows outside the board)
    pub fn filled_in_row(&self, y: usize) -> usize {
        self.row(y)
            .map(|row| row.iter().filter(|cell| cell.is_some()).count())
            .unwrap_or(0)
    }

    /// Borrow a single row
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Indices of all full rows, top to bottom
    pub fn find_full_rows(&self) -> RowList {
        (0..BOARD_HEIGHT as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove the given rows, shift everything above them down and refill the top
    /// with empty rows. Returns the number of rows removed.
    ///
    /// Uses a two-pointer pass with zero allocation. Indices outside the board and
    /// duplicates are ignored.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        // Everything above the last written row is new, empty space
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        write_y
    }

    /// Find and clear all full rows in one step. Returns the number cleared.
    pub fn clear_full_rows(&mut self) -> usize {
        let rows = self.find_full_rows();
        self.clear_rows(&rows)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the board into a row-major 2D grid (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [None; BOARD_SIZE];
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [None; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT as usize)
            .filter_map(|y| self.row(y).map(|row| row.to_vec()))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::base_shape;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_is_free_spawn_region() {
        let board = Board::new();

        // Above the board is free, but only within the columns
        assert!(board.is_free(0, -3));
        assert!(!board.is_free(-1, -3));
        assert!(!board.is_free(10, -1));

        // Floor is a hard limit
        assert!(board.is_free(0, 19));
        assert!(!board.is_free(0, 20));
    }

    #[test]
    fn test_place_piece_drops_cells_above_board() {
        let mut board = Board::new();
        let o = base_shape(PieceKind::O);

        // Top row of the O sits at y = -1
        let written = board.place_piece(&o, 4, -1, PieceKind::O);
        assert_eq!(written, 2);
        assert!(board.is_occupied(4, 0));
        assert!(board.is_occupied(5, 0));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_clear_rows_non_adjacent() {
        let mut cells = vec![vec![None; 10]; 20];
        for x in 0..10 {
            cells[19][x] = Some(PieceKind::I);
            cells[17][x] = Some(PieceKind::J);
        }
        cells[18][0] = Some(PieceKind::T);
        cells[16][9] = Some(PieceKind::L);
        let mut board = Board::from_cells(cells);

        let rows = board.find_full_rows();
        assert_eq!(rows.as_slice(), &[17, 19]);
        assert_eq!(board.clear_rows(&rows), 2);

        // Row 18 drops one (past row 19), row 16 drops two
        let after = board.to_cells();
        assert_eq!(after[19][0], Some(PieceKind::T));
        assert_eq!(after[18][9], Some(PieceKind::L));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_clear_rows_ignores_out_of_range() {
        let mut board = Board::new();
        board.set(3, 19, Some(PieceKind::S));
        assert_eq!(board.clear_rows(&[25]), 0);
        assert_eq!(board.get(3, 19), Some(Some(PieceKind::S)));
    }

    #[test]
    fn test_write_grid() {
        let mut board = Board::new();
        board.set(2, 7, Some(PieceKind::Z));
        let mut grid = [[None; 10]; 20];
        board.write_grid(&mut grid);
        assert_eq!(grid[7][2], Some(PieceKind::Z));
        assert_eq!(grid[7][3], None);
    }
}
