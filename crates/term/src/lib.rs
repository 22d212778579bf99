//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: a [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a plain framebuffer, and
//! the [`TerminalRenderer`] flushes that framebuffer to the terminal with
//! diffed redraws. No widget toolkit, no layout engine.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph};
pub use game_view::{BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
