//! Board module - manages the game grid
//!
//! The board is an N x N grid (8x8 by default) where each cell is empty or filled.
//! Uses a flat vector in row-major order for cache locality; the size is fixed for
//! the lifetime of a board.
//! Coordinates: (x, y) where x is the column (left to right) and y the row (top to bottom).

use crate::error::{CoreError, CoreResult};
use crate::pieces::Piece;
use crate::types::{Cell, MAX_BOARD_SIZE};

/// Square occupancy grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: u8,
    /// Flat cells, row-major order (y * size + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with `size` cells per side
    pub fn new(size: u8) -> CoreResult<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(CoreError::InvalidBoardSize {
                size: size as usize,
            });
        }
        let side = size as usize;
        Ok(Self {
            size,
            cells: vec![Cell::Empty; side * side],
        })
    }

    /// Build a board from rows of 0/1 values
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_core::Board;
    ///
    /// let board = Board::from_rows(&[vec![1, 1], vec![0, 1]]).unwrap();
    /// assert!(board.is_row_full(0));
    /// assert!(board.is_col_full(1));
    /// ```
    pub fn from_rows(rows: &[Vec<u8>]) -> CoreResult<Self> {
        let side = rows.len();
        if side > MAX_BOARD_SIZE as usize || rows.iter().any(|row| row.len() != side) {
            return Err(CoreError::InvalidBoardRows);
        }
        let mut board = Self::new(side as u8).map_err(|_| CoreError::InvalidBoardRows)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                let cell = Cell::from_u8(v).ok_or(CoreError::InvalidBoardRows)?;
                board.cells[y * side + x] = cell;
            }
        }
        Ok(board)
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        let side = self.size as usize;
        if x >= side || y >= side {
            return None;
        }
        Some(y * side + x)
    }

    /// Cells per side
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_open(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Some(Cell::Empty))
    }

    /// Within bounds and filled
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        matches!(self.get(x, y), Some(Cell::Filled))
    }

    /// Check whether `piece` fits with its origin at (x, y)
    ///
    /// True iff every translated cell is on the board and empty. Stops at the
    /// first cell that fails.
    pub fn is_valid_placement(&self, piece: &Piece, x: usize, y: usize) -> bool {
        piece.cells().iter().all(|&(dx, dy)| {
            match (x.checked_add(dx as usize), y.checked_add(dy as usize)) {
                (Some(px), Some(py)) => self.is_open(px, py),
                _ => false,
            }
        })
    }

    /// Fill every cell of `piece` with its origin at (x, y)
    ///
    /// Validates first; on failure the board is left untouched and
    /// `PreconditionViolation` is returned. Returns the number of cells filled.
    pub fn place(&mut self, piece: &Piece, x: usize, y: usize) -> CoreResult<usize> {
        if !self.is_valid_placement(piece, x, y) {
            return Err(CoreError::PreconditionViolation { x, y });
        }
        for &(dx, dy) in piece.cells() {
            self.set(x + dx as usize, y + dy as usize, Cell::Filled);
        }
        Ok(piece.len())
    }

    /// True iff some origin on the board yields a valid placement
    pub fn has_any_valid_move(&self, piece: &Piece) -> bool {
        let side = self.size as usize;
        (0..side).any(|y| (0..side).any(|x| self.is_valid_placement(piece, x, y)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        let side = self.size as usize;
        if y >= side {
            return false;
        }
        let start = y * side;
        self.cells[start..start + side].iter().all(|cell| cell.is_filled())
    }

    /// Check if a column is completely filled
    pub fn is_col_full(&self, x: usize) -> bool {
        let side = self.size as usize;
        if x >= side {
            return false;
        }
        (0..side).all(|y| self.cells[y * side + x].is_filled())
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    /// Get a reference to the internal cells, row-major
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Rows of 0/1 values (read-only snapshot form)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size as usize)
            .map(|row| row.iter().map(|cell| cell.as_u8()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        let side = crate::types::DEFAULT_BOARD_SIZE as usize;
        Self {
            size: crate::types::DEFAULT_BOARD_SIZE,
            cells: vec![Cell::Empty; side * side],
        }
    }
}
