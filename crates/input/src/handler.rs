//! Board cursor and intent queue.
//!
//! Key presses arrive faster than frames; commands are folded into the cursor
//! immediately and the resulting intents are queued until the next frame drains
//! them.

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::map::{handle_key_event, InputCommand};
use crate::types::{GameIntent, DEFAULT_BOARD_SIZE};

const INTENT_QUEUE_CAPACITY: usize = 16;

/// Tracks the board cursor and buffers intents between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    board_size: u8,
    cursor_x: usize,
    cursor_y: usize,
    queue: ArrayVec<GameIntent, INTENT_QUEUE_CAPACITY>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_board_size(DEFAULT_BOARD_SIZE)
    }

    /// Handler for a board of `board_size` cells per side, cursor at the centre
    pub fn with_board_size(board_size: u8) -> Self {
        let centre = (board_size as usize).saturating_sub(1) / 2;
        Self {
            board_size,
            cursor_x: centre,
            cursor_y: centre,
            queue: ArrayVec::new(),
        }
    }

    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_y)
    }

    /// Move the cursor to (x, y), clamped to the board
    pub fn set_cursor(&mut self, x: usize, y: usize) {
        let max = (self.board_size as usize).saturating_sub(1);
        self.cursor_x = x.min(max);
        self.cursor_y = y.min(max);
    }

    /// Fold one command into the cursor, returning the intent it produces
    pub fn handle_command(&mut self, cmd: InputCommand) -> Option<GameIntent> {
        match cmd {
            InputCommand::MoveCursor { dx, dy } => {
                let x = offset(self.cursor_x, dx);
                let y = offset(self.cursor_y, dy);
                self.set_cursor(x, y);
                None
            }
            InputCommand::SelectSlot(slot) => Some(GameIntent::Select(slot)),
            InputCommand::Confirm => Some(GameIntent::PlaceSelected {
                x: self.cursor_x,
                y: self.cursor_y,
            }),
            InputCommand::Cancel => Some(GameIntent::Deselect),
            InputCommand::Restart => Some(GameIntent::Restart),
        }
    }

    /// Map and queue a key press
    ///
    /// Returns false when the key was dropped because the queue is full.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(intent) = handle_key_event(key).and_then(|cmd| self.handle_command(cmd)) else {
            return true;
        };
        self.queue.try_push(intent).is_ok()
    }

    /// Take every queued intent, oldest first
    pub fn drain_intents(&mut self) -> ArrayVec<GameIntent, INTENT_QUEUE_CAPACITY> {
        std::mem::take(&mut self.queue)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn offset(v: usize, d: i8) -> usize {
    if d < 0 {
        v.saturating_sub(d.unsigned_abs() as usize)
    } else {
        v.saturating_add(d as usize)
    }
}
