//! Error types for the rules engine
//!
//! `PlacementError` covers player-facing rejections: each one leaves the session
//! untouched apart from its status line. `CoreError` covers construction and
//! programming errors. `StoreError` covers the best-score persistence boundary.

use thiserror::Error;

/// Why a placement or selection request was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    /// Target placement leaves the board or overlaps a filled cell
    #[error("Invalid placement: slot {slot} at ({x}, {y})")]
    InvalidPlacement { slot: usize, x: usize, y: usize },

    /// Requested slot has already been used
    #[error("No piece in slot {slot}")]
    NoPieceInSlot { slot: usize },

    /// Placement at the selection requested with nothing selected
    #[error("No slot selected")]
    NoSelection,

    /// Requested slot does not exist
    #[error("Slot {slot} out of range (session has {slot_count} slots)")]
    SlotOutOfRange { slot: usize, slot_count: usize },

    /// A previous placement is still resolving
    #[error("A placement is still resolving")]
    StateLocked,

    /// The session is over; only a restart is accepted
    #[error("Game is over")]
    GameOver,
}

impl PlacementError {
    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            PlacementError::InvalidPlacement { .. } => "invalid_placement",
            PlacementError::NoPieceInSlot { .. } => "no_piece_in_slot",
            PlacementError::NoSelection => "no_selection",
            PlacementError::SlotOutOfRange { .. } => "slot_out_of_range",
            PlacementError::StateLocked => "state_locked",
            PlacementError::GameOver => "game_over",
        }
    }

    /// Rejections that front-ends should treat as a silent no-op.
    ///
    /// Only an invalid placement is worth telling the player about.
    pub fn is_noop(self) -> bool {
        !matches!(self, PlacementError::InvalidPlacement { .. })
    }
}

/// Construction and programming errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// `place` was asked to write a piece that does not fit
    #[error("Precondition violated: piece does not fit at ({x}, {y})")]
    PreconditionViolation { x: usize, y: usize },

    #[error("A piece needs at least one cell")]
    EmptyPiece,

    #[error("Piece has {cells} cells (max {max})")]
    PieceTooLarge { cells: usize, max: usize },

    #[error("Piece library is empty")]
    EmptyCatalog,

    #[error("Invalid board size: {size}")]
    InvalidBoardSize { size: usize },

    #[error("Invalid slot count: {count}")]
    InvalidSlotCount { count: usize },

    #[error("Invalid goal ladder: {reason}")]
    InvalidGoalLadder { reason: String },

    /// Rows handed to `Board::from_rows` are not a square grid of 0/1 values
    #[error("Board rows must form a square grid of 0/1 values")]
    InvalidBoardRows,
}

/// Best-score persistence failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store contents are not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rules engine construction
pub type CoreResult<T> = Result<T, CoreError>;
