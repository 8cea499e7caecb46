//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events to [`InputCommand`]s and tracks the board cursor,
//! turning commands into [`GameIntent`](crate::types::GameIntent)s the session
//! understands. Nothing here knows about the session itself.

pub mod handler;
pub mod map;

pub use block_blast_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, should_quit, InputCommand};
