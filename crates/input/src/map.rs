//! Key mapping from terminal events to input commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a single key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Move the board cursor by one cell
    MoveCursor { dx: i8, dy: i8 },
    /// Toggle a slot (zero-based)
    SelectSlot(usize),
    /// Place the selected piece at the cursor
    Confirm,
    /// Drop the selection
    Cancel,
    Restart,
}

/// Map keyboard input to an input command.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputCommand::MoveCursor { dx: -1, dy: 0 })
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputCommand::MoveCursor { dx: 1, dy: 0 })
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputCommand::MoveCursor { dx: 0, dy: -1 })
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputCommand::MoveCursor { dx: 0, dy: 1 })
        }

        // Slots
        KeyCode::Char(c @ '1'..='9') => Some(InputCommand::SelectSlot((c as u8 - b'1') as usize)),

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputCommand::Confirm),
        KeyCode::Esc => Some(InputCommand::Cancel),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
