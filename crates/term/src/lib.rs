//! Terminal front-end for the puzzle.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`] and
//! [`TerminalRenderer`] flushes the changed cells with `crossterm`. Board cells
//! are two columns wide to compensate for the terminal glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_blast_core as core;
pub use block_blast_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, BoardOverlay, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, terminal_viewport, TerminalRenderer};
