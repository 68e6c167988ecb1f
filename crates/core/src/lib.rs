//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-letter word game: the board,
//! letter generation, word detection, scoring, gravity and the turn
//! orchestrator. It has no dependencies on rendering or input, so the whole
//! game can be driven headless:
//!
//! - **Deterministic**: the same seed produces the same letter sequence
//! - **Testable**: every transition is a plain method on an owned value
//! - **Portable**: terminal, GUI or scripted front-ends share the same core
//!
//! # Module Structure
//!
//! - [`board`]: 9x9 letter grid and the [`CellMask`] cell set
//! - [`config`]: tunables with environment overrides
//! - [`countdown`]: big-glyph overlays shown before play starts
//! - [`dictionary`]: the word membership oracle
//! - [`game_state`]: the turn orchestrator
//! - [`gravity`]: per-column compaction after a clear
//! - [`rng`]: frequency-weighted letter generator and upcoming queue
//! - [`scoring`]: word points and the combo multiplier
//! - [`snapshot`]: plain-data view of a game for front-ends
//! - [`words`]: word resolver
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use fallter_core::{Board, GameConfig, GameState, WordList};
//! use fallter_core::types::{Command, GamePhase};
//!
//! let config = GameConfig::default().with_seed(12345).with_countdown(0);
//! let dictionary = Arc::new(WordList::from_words(["word", "tile"]));
//! let mut game = GameState::new(config, dictionary);
//! game.start();
//! assert_eq!(game.phase(), GamePhase::Running);
//!
//! game.apply_command(Command::MoveLeft);
//! game.apply_command(Command::HardDrop);
//! assert_eq!(game.board().filled_count(), 1);
//! ```
//!
//! # Timing
//!
//! Time is logical. Call [`GameState::tick`](game_state::GameState::tick) with
//! the elapsed milliseconds; the active tile descends one row every
//! `tick_ms` (500ms by default) and a word clear holds the next spawn for
//! `settle_ms` (300ms by default).

pub mod board;
pub mod config;
pub mod countdown;
pub mod dictionary;
pub mod game_state;
pub mod gravity;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod words;

pub use fallter_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, CellMask};
pub use config::{ConfigError, GameConfig};
pub use countdown::countdown_mask;
pub use dictionary::{Dictionary, DictionaryError, WordList};
pub use game_state::{GameState, Tile};
pub use rng::{LetterGenerator, LetterQueue, SimpleRng};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
pub use words::{resolve, Orientation, Resolution, WordMatch};
