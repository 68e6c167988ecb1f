//! Fallter (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof so the binary, integration
//! tests and benches can write `fallter::core::GameState` and friends.

pub use fallter_core as core;
pub use fallter_input as input;
pub use fallter_term as term;
pub use fallter_types as types;
