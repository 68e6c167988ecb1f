//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! Everything here is plain data, usable from the core engine, the terminal
//! front-end and any other presentation layer.
//!
//! # Board Dimensions
//!
//! - **Width**: 9 columns (indexed 0-8)
//! - **Height**: 9 rows (indexed 0-8, row 0 at the top)
//! - **Spawn position**: (4, 0), the center column of the top row
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds of logical time:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Automatic descent interval |
//! | `CLEAR_SETTLE_MS` | 300 | Delay between a word clear and gravity + next spawn |
//! | `COUNTDOWN_STEP_MS` | 1000 | Duration of each countdown number |
//! | `COUNTDOWN_GO_MS` | 300 | How long "GO" stays up before play starts |
//!
//! # Examples
//!
//! ```
//! use fallter_types::{Command, Letter, GRID_HEIGHT, GRID_WIDTH};
//!
//! let letter = Letter::from_char('q').unwrap();
//! assert_eq!(letter.as_char(), 'Q');
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(GRID_WIDTH, 9);
//! assert_eq!(GRID_HEIGHT, 9);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Board width in cells (9 columns)
pub const GRID_WIDTH: u8 = 9;

/// Board height in cells (9 rows)
pub const GRID_HEIGHT: u8 = 9;

/// Column where new tiles appear
pub const SPAWN_X: u8 = GRID_WIDTH / 2;

/// Row where new tiles appear
pub const SPAWN_Y: u8 = 0;

/// Automatic descent interval (one row every 500ms)
pub const TICK_MS: u32 = 500;

/// Settle delay after a word clear, before gravity runs and the next tile spawns
pub const CLEAR_SETTLE_MS: u32 = 300;

/// First number shown by the start countdown
pub const COUNTDOWN_FROM: u8 = 3;

/// Duration of each countdown number
pub const COUNTDOWN_STEP_MS: u32 = 1000;

/// Duration of the final "GO" frame
pub const COUNTDOWN_GO_MS: u32 = 300;

/// Default number of upcoming letters shown to the player
pub const QUEUE_LEN: usize = 3;

/// Upper bound for the configurable upcoming queue
pub const MAX_QUEUE_LEN: usize = 5;

/// Number of entries kept in the found-words log
pub const FOUND_WORDS_CAP: usize = 20;

/// Shortest run of letters that can count as a word
pub const MIN_WORD_LEN: usize = 4;

/// Points per letter of a cleared word
pub const LETTER_POINTS: u32 = 10;

/// How many recently generated letters are down-weighted
pub const RECENT_WINDOW: usize = 2;

/// Weight multiplier applied per recent occurrence of a letter
pub const RECENT_PENALTY: f64 = 0.3;


/// A single uppercase ASCII letter carried by a tile
///
/// Stored as the ASCII byte (`b'A'..=b'Z'`). Serialized as a one-character
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub struct Letter(u8);

/// Error returned when a character is not an ASCII letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not an ASCII letter: {0:?}")]
pub struct InvalidLetter(pub char);

impl Letter {
    /// The most frequent letter in English text
    pub const E: Letter = Letter(b'E');

    /// Parse a letter (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fallter_types::Letter;
    ///
    /// assert_eq!(Letter::from_char('e').unwrap().as_char(), 'E');
    /// assert_eq!(Letter::from_char('-'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Some(Letter(c.to_ascii_uppercase() as u8))
        } else {
            None
        }
    }

    /// Uppercase character
    pub fn as_char(self) -> char {
        self.0 as char
    }

    /// Lowercase character, the form dictionary keys use
    pub fn to_lowercase(self) -> char {
        self.0.to_ascii_lowercase() as char
    }

    /// Alphabet position (0 = A)
    pub fn index(self) -> usize {
        (self.0 - b'A') as usize
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Letter> for char {
    fn from(value: Letter) -> Self {
        value.as_char()
    }
}

impl TryFrom<char> for Letter {
    type Error = InvalidLetter;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Letter::from_char(value).ok_or(InvalidLetter(value))
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(Letter)`: Cell holding a locked letter
pub type Cell = Option<Letter>;

/// Logical player commands
///
/// These are independent of the input device: keyboard, swipe gestures and
/// on-screen buttons all map onto this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Move the active tile one cell left
    MoveLeft,
    /// Move the active tile one cell right
    MoveRight,
    /// Drop the active tile one cell, locking it if it cannot move
    SoftDrop,
    /// Drop the active tile to its lowest reachable cell and lock it
    HardDrop,
    /// Pause or resume
    TogglePause,
    /// Reset everything and count down into a new game
    Restart,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::HardDrop,
        Command::TogglePause,
        Command::Restart,
    ];

    /// Parse command from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use fallter_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("TOGGLEPAUSE"), Some(Command::TogglePause));
    /// assert_eq!(Command::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Command::MoveLeft),
            "right" => Some(Command::MoveRight),
            "down" => Some(Command::SoftDrop),
            "drop" => Some(Command::HardDrop),
            "pause" => Some(Command::TogglePause),
            _ => Self::ALL
                .into_iter()
                .find(|cmd| cmd.as_str().eq_ignore_ascii_case(s)),
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
            Command::Restart => "restart",
        }
    }

    /// Whether the command steers or drops the active tile
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Command::MoveLeft | Command::MoveRight | Command::SoftDrop | Command::HardDrop
        )
    }
}

/// Game lifecycle phase
///
/// ```text
/// NotStarted -> CountdownToStart -> Running <-> Paused
///                                   Running -> GameOver -> NotStarted (restart)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    NotStarted,
    CountdownToStart,
    Running,
    Paused,
    GameOver,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::NotStarted => "not_started",
            GamePhase::CountdownToStart => "countdown",
            GamePhase::Running => "running",
            GamePhase::Paused => "paused",
            GamePhase::GameOver => "game_over",
        }
    }

    /// Movement commands and the descent timer only act while running.
    pub fn accepts_movement(&self) -> bool {
        matches!(self, GamePhase::Running)
    }

    pub fn is_over(&self) -> bool {
        matches!(self, GamePhase::GameOver)
    }
}

/// Core-side event emitted after a tile locks.
///
/// Observers (views, sound hooks) can take it to react to word clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveEvent {
    /// Cell where the tile locked
    pub x: i8,
    pub y: i8,
    /// Number of words kept after deduplication
    pub words: u32,
    /// Sum of letter points before the combo multiplier
    pub points: u32,
    /// Combo counter after this lock
    pub combo: u32,
    /// Amount added to the score
    pub score_delta: u32,
}

impl ResolveEvent {
    pub fn cleared_any(&self) -> bool {
        self.words > 0
    }
}
