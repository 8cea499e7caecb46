//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! The default playfield is a square 8x8 grid:
//!
//! - **Size**: 8 cells per side (indexed 0-7 on both axes)
//! - **Coordinates**: `(x, y)` with x left to right, y top to bottom
//!
//! # Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `LINE_CLEAR_POINTS` | 25 | Points per cleared row or column |
//! | `COMBO_STEP_POINTS` | 8 | Per-line bonus per combo step |
//! | `INITIAL_COMBO` | 1 | Combo value of a fresh session |
//!
//! # Examples
//!
//! ```
//! use block_blast_types::{Cell, GameIntent, Phase, DEFAULT_BOARD_SIZE, DEFAULT_GOALS};
//!
//! assert_eq!(DEFAULT_BOARD_SIZE, 8);
//! assert_eq!(DEFAULT_GOALS, [100, 250, 500, 900, 1400]);
//!
//! assert_eq!(Cell::from_u8(1), Some(Cell::Filled));
//! assert_eq!(Phase::from_str("game_over"), Some(Phase::GameOver));
//! assert_eq!(GameIntent::from_str("restart"), Some(GameIntent::Restart));
//! ```

/// Default board size in cells per side (8x8)
pub const DEFAULT_BOARD_SIZE: u8 = 8;

/// Largest supported board size
pub const MAX_BOARD_SIZE: u8 = 32;

/// Default number of piece slots offered at once
pub const DEFAULT_SLOT_COUNT: usize = 3;

/// Largest supported slot count
pub const MAX_SLOT_COUNT: usize = 8;

/// Most cells a single piece may occupy (the 5x5 preview box)
pub const MAX_PIECE_CELLS: usize = 25;

/// Side of the square box piece previews are drawn in
pub const PIECE_PREVIEW_SIZE: u8 = 5;

/// Default goal ladder (ascending score milestones)
pub const DEFAULT_GOALS: [u32; 5] = [100, 250, 500, 900, 1400];

/// Points per cleared line, before combo bonus
pub const LINE_CLEAR_POINTS: u32 = 25;

/// Per-line bonus for every combo step above the baseline
pub const COMBO_STEP_POINTS: u32 = 8;

/// Combo streak value of a fresh session and after a turn without clears
pub const INITIAL_COMBO: u32 = 1;

/// Presentation pause between marking cleared cells and zeroing them (180ms)
pub const CLEAR_BURST_MS: u32 = 180;

/// Input polling interval for the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Key under which the best score is persisted
pub const BEST_SCORE_KEY: &str = "blockBlastBest";

/// Offset of a single piece cell relative to the piece origin, `(dx, dy)`
pub type Offset = (u8, u8);

/// Occupancy of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

impl Cell {
    /// Convert from the binary wire value (0 = empty, 1 = filled)
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Filled),
            _ => None,
        }
    }

    /// Binary value of the cell
    pub fn as_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Filled => 1,
        }
    }

    pub fn is_filled(self) -> bool {
        self == Cell::Filled
    }
}

/// Turn orchestrator phase
///
/// - **Idle**: no slot selected
/// - **Selecting**: a slot is chosen, waiting for a target cell
/// - **Resolving**: a placement was accepted and line clears are pending
/// - **GameOver**: no remaining piece fits anywhere; only restart leaves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Selecting,
    Resolving,
    GameOver,
}

impl Phase {
    /// Parse a phase from its snake_case name
    ///
    /// # Examples
    ///
    /// ```
    /// use block_blast_types::Phase;
    ///
    /// assert_eq!(Phase::from_str("idle"), Some(Phase::Idle));
    /// assert_eq!(Phase::from_str("Resolving"), Some(Phase::Resolving));
    /// assert_eq!(Phase::from_str("paused"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "idle" => Some(Phase::Idle),
            "selecting" => Some(Phase::Selecting),
            "resolving" => Some(Phase::Resolving),
            "game_over" | "gameover" => Some(Phase::GameOver),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selecting => "selecting",
            Phase::Resolving => "resolving",
            Phase::GameOver => "game_over",
        }
    }

    /// Whether a new placement may be accepted in this phase
    pub fn accepts_placement(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Selecting)
    }
}

/// A player intent submitted by a front-end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameIntent {
    /// Toggle selection of a slot
    Select(usize),
    /// Drop the current selection
    Deselect,
    /// Place the piece in `slot` with its origin at `(x, y)`
    Place { slot: usize, x: usize, y: usize },
    /// Place the selected piece with its origin at `(x, y)`
    PlaceSelected { x: usize, y: usize },
    /// Throw the session away and start over
    Restart,
}

impl GameIntent {
    /// Parse the argument-free intents from their names
    ///
    /// Intents that carry coordinates or slot indices are built directly.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "deselect" | "cancel" => Some(GameIntent::Deselect),
            "restart" => Some(GameIntent::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameIntent::Select(_) => "select",
            GameIntent::Deselect => "deselect",
            GameIntent::Place { .. } => "place",
            GameIntent::PlaceSelected { .. } => "placeSelected",
            GameIntent::Restart => "restart",
        }
    }
}
