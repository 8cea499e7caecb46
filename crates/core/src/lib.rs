//! Core rules engine - pure, deterministic, and testable
//!
//! Everything about the puzzle lives here: the square board, the polyomino
//! library, line detection and clearing, combo scoring, the goal ladder and the
//! session that sequences a turn. Nothing in this crate touches the terminal.
//!
//! # Module Structure
//!
//! - [`board`]: square occupancy grid with placement validation
//! - [`pieces`]: polyomino shapes and the catalog pieces are dealt from
//! - [`lines`]: full row/column detection and clearing
//! - [`scoring`]: placement points, line-clear combos and goal progress
//! - [`session`]: turn sequencing, slots, best score and game over
//! - [`rng`]: deterministic random sources
//! - [`store`]: best-score persistence
//! - [`config`]: board size, slot count, goal ladder and seed
//!
//! # Game Rules
//!
//! - Pieces never rotate; they are placed exactly as dealt.
//! - Three pieces are dealt at once and refilled only when all are used.
//! - Every full row and column clears simultaneously after a placement; a cell
//!   on both is cleared once but counts toward two lines.
//! - Consecutive clearing turns grow the combo; a turn without clears resets it.
//! - The game ends when no remaining piece fits anywhere.
//!
//! # Example
//!
//! ```
//! use block_blast_core::{GameConfig, GameSession};
//!
//! let mut game = GameSession::new(GameConfig::default().with_seed(7)).unwrap();
//! let piece = game.slot(0).unwrap().clone();
//! assert!(game.board().is_valid_placement(&piece, 0, 0));
//!
//! let outcome = game.attempt_placement(0, 0, 0).unwrap();
//! assert_eq!(outcome.placement_points, piece.len() as u32);
//! assert_eq!(game.score(), outcome.score);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod lines;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod store;

pub use block_blast_types as types;

pub use board::Board;
pub use config::GameConfig;
pub use error::{CoreError, CoreResult, PlacementError, StoreError};
pub use lines::{clear_lines, find_full_lines, FullLines};
pub use pieces::{standard_library, Piece, PieceCatalog, STANDARD_SHAPES};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{calculate_clear_gain, goal_progress, placement_score, ClearGain, GoalProgress};
pub use session::GameSession;
pub use snapshot::{GameSnapshot, PendingClear, Preview, TurnOutcome};
pub use store::{load_best_score, save_best_score, JsonFileStore, KeyValueStore, MemoryStore};
