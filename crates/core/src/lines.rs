//! Line-clear resolution
//!
//! Detection is pure: [`find_full_lines`] only reads the board. Clearing is a
//! separate step so a cell sitting on both a full row and a full column is reset
//! once while still counting toward two lines.

use serde::Serialize;

use crate::board::Board;
use crate::types::Cell;

/// Full rows and columns, each in ascending index order
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct FullLines {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl FullLines {
    /// Lines counted for scoring (rows + columns)
    pub fn count(&self) -> u32 {
        (self.rows.len() + self.cols.len()) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }

    /// Whether (x, y) lies on any full row or column
    pub fn covers(&self, x: usize, y: usize) -> bool {
        self.rows.contains(&y) || self.cols.contains(&x)
    }

    /// Every affected coordinate exactly once, row-major, for a board of `size`
    pub fn cells(&self, size: u8) -> Vec<(usize, usize)> {
        let side = size as usize;
        let mut out = Vec::new();
        for y in 0..side {
            for x in 0..side {
                if self.covers(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

/// Find every full row and column
///
/// # Examples
///
/// ```
/// use block_blast_core::{find_full_lines, Board};
///
/// let board = Board::from_rows(&[
///     vec![1, 1, 1],
///     vec![1, 0, 1],
///     vec![1, 0, 1],
/// ])
/// .unwrap();
/// let lines = find_full_lines(&board);
/// assert_eq!(lines.rows, vec![0]);
/// assert_eq!(lines.cols, vec![0, 2]);
/// ```
pub fn find_full_lines(board: &Board) -> FullLines {
    let side = board.size() as usize;
    FullLines {
        rows: (0..side).filter(|&y| board.is_row_full(y)).collect(),
        cols: (0..side).filter(|&x| board.is_col_full(x)).collect(),
    }
}

/// Reset every cell on a listed row or column
///
/// Returns the number of distinct cells that were emptied.
pub fn clear_lines(board: &mut Board, lines: &FullLines) -> usize {
    let mut cleared = 0;
    for (x, y) in lines.cells(board.size()) {
        if board.is_filled(x, y) {
            cleared += 1;
        }
        board.set(x, y, Cell::Empty);
    }
    cleared
}
