//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Command`]. It knows nothing
//! about game rules; whether a command does anything is up to the core.

pub mod map;

pub use fallter_types as types;

pub use map::{handle_key_event, should_quit};
