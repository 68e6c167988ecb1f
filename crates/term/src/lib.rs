//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It does not use a widget
//! library: [`GameView`] paints a [`core::GameSnapshot`] into a
//! [`FrameBuffer`], and [`TerminalRenderer`] flushes that buffer to the
//! terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the view pure so frames can be asserted on in tests
//! - Only write changed patches after the first frame

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fallter_core as core;
pub use fallter_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{
    diff_patches_into, encode_full_into, encode_patches_into, DrawStats, Patch, TerminalRenderer,
    TerminalSession,
};
