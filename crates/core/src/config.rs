//! Game configuration
//!
//! Every knob has a default matching the classic 8x8, three-slot game. Values can
//! be overridden from the environment:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `BLOCK_BLAST_BOARD_SIZE` | cells per side |
//! | `BLOCK_BLAST_SLOTS` | piece slots per deal |
//! | `BLOCK_BLAST_GOALS` | comma separated goal ladder |
//! | `BLOCK_BLAST_SEED` | RNG seed |
//!
//! Unparsable values fall back to the default.

use std::env;

use crate::error::{CoreError, CoreResult};
use crate::pieces::{standard_library, Piece};
use crate::types::{
    DEFAULT_BOARD_SIZE, DEFAULT_GOALS, DEFAULT_SLOT_COUNT, MAX_BOARD_SIZE, MAX_SLOT_COUNT,
};

/// Session configuration
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub board_size: u8,
    pub slot_count: usize,
    pub goals: Vec<u32>,
    pub pieces: Vec<Piece>,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            slot_count: DEFAULT_SLOT_COUNT,
            goals: DEFAULT_GOALS.to_vec(),
            pieces: standard_library(),
            seed: 1,
        }
    }
}

impl GameConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let board_size = lookup("BLOCK_BLAST_BOARD_SIZE")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.board_size);

        let slot_count = lookup("BLOCK_BLAST_SLOTS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.slot_count);

        let goals = lookup("BLOCK_BLAST_GOALS")
            .and_then(|s| parse_goals(&s))
            .unwrap_or(defaults.goals);

        let seed = lookup("BLOCK_BLAST_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            board_size,
            slot_count,
            goals,
            pieces: defaults.pieces,
            seed,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_board_size(mut self, board_size: u8) -> Self {
        self.board_size = board_size;
        self
    }

    pub fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    pub fn with_goals(mut self, goals: Vec<u32>) -> Self {
        self.goals = goals;
        self
    }

    pub fn with_pieces(mut self, pieces: Vec<Piece>) -> Self {
        self.pieces = pieces;
        self
    }

    /// Check every knob is within supported bounds
    pub fn validate(&self) -> CoreResult<()> {
        if self.board_size == 0 || self.board_size > MAX_BOARD_SIZE {
            return Err(CoreError::InvalidBoardSize {
                size: self.board_size as usize,
            });
        }
        if self.slot_count == 0 || self.slot_count > MAX_SLOT_COUNT {
            return Err(CoreError::InvalidSlotCount {
                count: self.slot_count,
            });
        }
        if self.goals.is_empty() {
            return Err(CoreError::InvalidGoalLadder {
                reason: "ladder is empty".to_string(),
            });
        }
        if self.goals.windows(2).any(|w| w[0] > w[1]) {
            return Err(CoreError::InvalidGoalLadder {
                reason: "goals must be in ascending order".to_string(),
            });
        }
        if self.pieces.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        Ok(())
    }
}

fn parse_goals(s: &str) -> Option<Vec<u32>> {
    let goals: Option<Vec<u32>> = s
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect();
    goals.filter(|g| !g.is_empty())
}
