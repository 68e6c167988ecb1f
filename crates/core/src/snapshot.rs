use arrayvec::ArrayVec;
use serde::Serialize;

use crate::board::CellMask;
use crate::game_state::Tile;
use crate::types::{Cell, GamePhase, Letter, GRID_HEIGHT, GRID_WIDTH, MAX_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub letter: Letter,
    pub x: i8,
    pub y: i8,
}

impl From<Tile> for ActiveSnapshot {
    fn from(value: Tile) -> Self {
        Self {
            letter: value.letter,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct TimersSnapshot {
    /// Time accumulated toward the next automatic descent
    pub drop_ms: u32,
    /// Time left before gravity and the next spawn, 0 when no clear is settling
    pub settle_ms: u32,
    /// Time spent on the current countdown value
    pub countdown_ms: u32,
}

/// Everything a view needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub upcoming: ArrayVec<Letter, MAX_QUEUE_LEN>,
    pub score: u32,
    pub combo: u32,
    /// Most recent first
    pub found_words: Vec<String>,
    pub phase: GamePhase,
    /// Countdown value while counting down (0 is "GO")
    pub countdown: Option<u8>,
    /// Cells emptied by the last clear, set until the board settles
    pub cleared: CellMask,
    pub episode_id: u32,
    pub seed: u32,
    pub tile_id: u32,
    pub timers: TimersSnapshot,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.upcoming.clear();
        self.score = 0;
        self.combo = 0;
        self.found_words.clear();
        self.phase = GamePhase::NotStarted;
        self.countdown = None;
        self.cleared = CellMask::empty();
        self.episode_id = 0;
        self.seed = 0;
        self.tile_id = 0;
        self.timers = TimersSnapshot::default();
    }

    /// Movement commands would be accepted
    pub fn playable(&self) -> bool {
        self.phase.accepts_movement() && self.active.is_some()
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .flatten()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            active: None,
            ghost_y: None,
            upcoming: ArrayVec::new(),
            score: 0,
            combo: 0,
            found_words: Vec::new(),
            phase: GamePhase::NotStarted,
            countdown: None,
            cleared: CellMask::empty(),
            episode_id: 0,
            seed: 0,
            tile_id: 0,
            timers: TimersSnapshot::default(),
        }
    }
}
