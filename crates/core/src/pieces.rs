//! Pieces module - polyomino shapes and the piece catalog
//!
//! A piece is a rigid set of non-negative `(dx, dy)` offsets from its origin.
//! Pieces are never rotated; the catalog offers each orientation as its own shape.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::rng::RandomSource;
use crate::types::{Offset, MAX_PIECE_CELLS};

/// Cells of a piece, sorted row-major and de-duplicated
pub type PieceCells = ArrayVec<Offset, MAX_PIECE_CELLS>;

/// An immutable polyomino shape
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    cells: PieceCells,
}

impl Piece {
    /// Build a piece from its cell offsets
    ///
    /// Duplicate offsets collapse into one cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_core::Piece;
    ///
    /// let corner = Piece::new(&[(0, 0), (1, 0), (0, 1)]).unwrap();
    /// assert_eq!(corner.len(), 3);
    /// assert_eq!((corner.width(), corner.height()), (2, 2));
    /// assert!(Piece::new(&[]).is_err());
    /// ```
    pub fn new(offsets: &[Offset]) -> CoreResult<Self> {
        let mut sorted: Vec<Offset> = offsets.to_vec();
        sorted.sort_by_key(|&(dx, dy)| (dy, dx));
        sorted.dedup();

        if sorted.is_empty() {
            return Err(CoreError::EmptyPiece);
        }
        if sorted.len() > MAX_PIECE_CELLS {
            return Err(CoreError::PieceTooLarge {
                cells: sorted.len(),
                max: MAX_PIECE_CELLS,
            });
        }

        let cells = sorted.into_iter().collect();
        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[Offset] {
        &self.cells
    }

    /// Number of board cells the piece occupies
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty pieces
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounding box width
    pub fn width(&self) -> u8 {
        self.cells.iter().map(|&(dx, _)| dx + 1).max().unwrap_or(0)
    }

    /// Bounding box height
    pub fn height(&self) -> u8 {
        self.cells.iter().map(|&(_, dy)| dy + 1).max().unwrap_or(0)
    }

    pub fn contains(&self, dx: u8, dy: u8) -> bool {
        self.cells.contains(&(dx, dy))
    }
}

/// The fifteen shapes dealt by default
pub const STANDARD_SHAPES: [&[Offset]; 15] = [
    // single
    &[(0, 0)],
    // dominoes
    &[(0, 0), (1, 0)],
    &[(0, 0), (0, 1)],
    // straight triominoes
    &[(0, 0), (1, 0), (2, 0)],
    &[(0, 0), (0, 1), (0, 2)],
    // corner
    &[(0, 0), (1, 0), (0, 1)],
    // T
    &[(0, 0), (1, 0), (2, 0), (1, 1)],
    // square
    &[(0, 0), (1, 0), (0, 1), (1, 1)],
    // straight tetrominoes
    &[(0, 0), (1, 0), (2, 0), (3, 0)],
    &[(0, 0), (0, 1), (0, 2), (0, 3)],
    // L / J
    &[(0, 0), (1, 0), (2, 0), (0, 1)],
    &[(0, 0), (1, 0), (2, 0), (2, 1)],
    // Z
    &[(0, 0), (1, 0), (1, 1), (2, 1)],
    // upside-down T
    &[(1, 0), (0, 1), (1, 1), (2, 1)],
    // P pentomino
    &[(0, 0), (1, 0), (0, 1), (1, 1), (2, 1)],
];

/// Build the standard piece library
pub fn standard_library() -> Vec<Piece> {
    STANDARD_SHAPES
        .iter()
        .filter_map(|shape| Piece::new(shape).ok())
        .collect()
}

/// Fixed library of shapes with uniform random selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceCatalog {
    pieces: Vec<Piece>,
}

impl PieceCatalog {
    pub fn new(pieces: Vec<Piece>) -> CoreResult<Self> {
        if pieces.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(Self { pieces })
    }

    /// Catalog over [`STANDARD_SHAPES`]
    pub fn standard() -> Self {
        Self {
            pieces: standard_library(),
        }
    }

    /// Pick a piece uniformly at random
    pub fn random_piece(&self, rng: &mut impl RandomSource) -> Piece {
        let idx = rng.next_range(self.pieces.len() as u32) as usize;
        self.pieces[idx].clone()
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

impl Default for PieceCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
