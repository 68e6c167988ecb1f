//! Game state module - the turn orchestrator
//!
//! Ties together the board, letter queue, dictionary, word resolver and
//! gravity. A turn is: spawn -> fall/steer -> lock -> resolve -> (settle ->
//! gravity) -> spawn. Time is logical: callers advance it with
//! [`GameState::tick`] and feed player input through
//! [`GameState::apply_command`].

use std::collections::VecDeque;
use std::sync::Arc;

use crate::board::{Board, CellMask};
use crate::config::{ConfigError, GameConfig};
use crate::dictionary::{Dictionary, WordList};
use crate::gravity;
use crate::rng::LetterQueue;
use crate::snapshot::{ActiveSnapshot, GameSnapshot, TimersSnapshot};
use crate::types::{
    Command, GamePhase, Letter, ResolveEvent, FOUND_WORDS_CAP, SPAWN_X, SPAWN_Y,
};
use crate::words;

/// The falling tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub letter: Letter,
    pub x: i8,
    pub y: i8,
}

impl Tile {
    /// A tile at the spawn cell
    pub fn new(letter: Letter) -> Self {
        Self {
            letter,
            x: SPAWN_X as i8,
            y: SPAWN_Y as i8,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    dictionary: Arc<dyn Dictionary>,
    board: Board,
    active: Option<Tile>,
    queue: LetterQueue,
    phase: GamePhase,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned tiles.
    tile_id: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<ResolveEvent>,
    score: u32,
    combo: u32,
    found_words: VecDeque<String>,
    /// Cells emptied by the last clear, kept until the board settles.
    cleared: CellMask,
    drop_timer_ms: u32,
    /// Time left before gravity + spawn; `Some` only while a clear settles.
    settle_timer_ms: Option<u32>,
    countdown: Option<u8>,
    countdown_timer_ms: u32,
}

impl GameState {
    /// Create a game that has not started yet
    pub fn new(config: GameConfig, dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            queue: LetterQueue::new(config.seed, config.queue_len),
            config,
            dictionary,
            board: Board::new(),
            active: None,
            phase: GamePhase::NotStarted,
            episode_id: 0,
            tile_id: 0,
            last_event: None,
            score: 0,
            combo: 0,
            found_words: VecDeque::with_capacity(FOUND_WORDS_CAP),
            cleared: CellMask::empty(),
            drop_timer_ms: 0,
            settle_timer_ms: None,
            countdown: None,
            countdown_timer_ms: 0,
        }
    }

    /// Like [`GameState::new`] but rejects out-of-range tunables
    pub fn try_new(
        config: GameConfig,
        dictionary: Arc<dyn Dictionary>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, dictionary))
    }

    /// Start counting down (or start play directly when the countdown is 0).
    ///
    /// Only valid from `NotStarted`.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        if self.config.countdown_from == 0 {
            self.begin_running();
        } else {
            self.phase = GamePhase::CountdownToStart;
            self.countdown = Some(self.config.countdown_from);
            self.countdown_timer_ms = 0;
        }
        true
    }

    fn begin_running(&mut self) {
        self.phase = GamePhase::Running;
        self.countdown = None;
        self.countdown_timer_ms = 0;
        log::debug!("episode {} running (seed {})", self.episode_id, self.config.seed);
        self.spawn_tile();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn dictionary(&self) -> &dyn Dictionary {
        self.dictionary.as_ref()
    }

    /// Swap the word oracle; takes effect at the next lock
    pub fn set_dictionary(&mut self, dictionary: Arc<dyn Dictionary>) {
        self.dictionary = dictionary;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase.is_over()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn tile_id(&self) -> u32 {
        self.tile_id
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Found words, most recent first
    pub fn found_words(&self) -> impl Iterator<Item = &str> {
        self.found_words.iter().map(String::as_str)
    }

    pub fn cleared(&self) -> CellMask {
        self.cleared
    }

    pub fn countdown(&self) -> Option<u8> {
        self.countdown
    }

    /// A clear is waiting for gravity and the next spawn
    pub fn is_settling(&self) -> bool {
        self.settle_timer_ms.is_some()
    }

    pub fn upcoming(&self) -> &[Letter] {
        self.queue.upcoming()
    }

    pub fn active(&self) -> Option<Tile> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replace the board, e.g. to set up a puzzle.
    ///
    /// The active tile is dropped if the new board occupies its cell, and a
    /// fresh one spawns in its place (or the game ends if the spawn cell is
    /// taken too).
    pub fn load_board(&mut self, board: Board) {
        self.board = board;
        let Some(tile) = self.active else {
            return;
        };
        if self.board.is_valid(tile.x, tile.y) {
            return;
        }
        self.active = None;
        let in_play = matches!(self.phase, GamePhase::Running | GamePhase::Paused);
        if in_play && self.settle_timer_ms.is_none() {
            self.spawn_tile();
        }
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.upcoming.clear();
        for &letter in self.queue.upcoming() {
            let _ = out.upcoming.try_push(letter);
        }
        out.score = self.score;
        out.combo = self.combo;
        out.found_words.clear();
        out.found_words.extend(self.found_words.iter().cloned());
        out.phase = self.phase;
        out.countdown = self.countdown;
        out.cleared = self.cleared;
        out.episode_id = self.episode_id;
        out.seed = self.config.seed;
        out.tile_id = self.tile_id;
        out.timers = TimersSnapshot {
            drop_ms: self.drop_timer_ms,
            settle_ms: self.settle_timer_ms.unwrap_or(0),
            countdown_ms: self.countdown_timer_ms,
        };
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Spawn the next tile from the queue, ending the game if the spawn cell is taken
    pub(crate) fn spawn_tile(&mut self) -> bool {
        debug_assert!(self.active.is_none(), "spawn with a tile still falling");

        if self.board.is_spawn_blocked() {
            self.end_game();
            return false;
        }

        let letter = self.queue.draw();
        self.active = Some(Tile::new(letter));
        self.tile_id = self.tile_id.wrapping_add(1);
        self.drop_timer_ms = 0;
        log::debug!("tile {} spawned: {}", self.tile_id, letter);
        true
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.active = None;
        self.settle_timer_ms = None;
        log::info!(
            "game over: episode {} score {} after {} tiles",
            self.episode_id,
            self.score,
            self.tile_id
        );
    }

    fn can_steer(&self) -> bool {
        self.phase.accepts_movement() && self.active.is_some()
    }

    /// Try to move the active tile sideways
    pub(crate) fn try_move(&mut self, dx: i8) -> bool {
        if !self.phase.accepts_movement() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.board.is_valid(active.x + dx, active.y) {
            self.active = Some(Tile {
                x: active.x + dx,
                ..active
            });
            return true;
        }
        false
    }

    /// Move the active tile down one row, locking it if the cell below is taken
    pub(crate) fn soft_drop_step(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        if self.board.is_valid(active.x, active.y + 1) {
            self.active = Some(Tile {
                y: active.y + 1,
                ..active
            });
        } else {
            self.lock_tile();
        }
        true
    }

    /// Drop the active tile as far as it goes and lock it
    pub(crate) fn hard_drop(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let y = self.board.drop_target(active.x, active.y);
        self.active = Some(Tile { y, ..active });
        self.lock_tile();
        true
    }

    /// Lock the active tile onto the board and resolve words
    pub(crate) fn lock_tile(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        let written = self.board.lock_letter(active.x, active.y, active.letter);
        debug_assert!(written, "tile {:?} locked onto an occupied cell", active);

        let resolution = words::resolve(&self.board, self.dictionary.as_ref(), self.combo);
        self.combo = resolution.combo;
        self.score = self.score.saturating_add(resolution.score_delta);

        self.last_event = Some(ResolveEvent {
            x: active.x,
            y: active.y,
            words: resolution.words.len() as u32,
            points: resolution.points,
            combo: resolution.combo,
            score_delta: resolution.score_delta,
        });

        if resolution.is_empty() {
            log::debug!("locked {} at ({}, {})", active.letter, active.x, active.y);
            self.cleared = CellMask::empty();
            self.spawn_tile();
            return;
        }

        log::info!(
            "cleared {} word(s) +{} (combo {})",
            resolution.words.len(),
            resolution.score_delta,
            resolution.combo
        );
        for word in resolution.words {
            self.found_words.push_front(word.word);
        }
        self.found_words.truncate(FOUND_WORDS_CAP);

        let removed = self.board.clear_cells(&resolution.cleared);
        debug_assert_eq!(removed as usize, resolution.cleared.len());
        self.cleared = resolution.cleared;

        if self.config.settle_ms == 0 {
            self.finish_settle();
        } else {
            self.settle_timer_ms = Some(self.config.settle_ms);
        }
    }

    /// Let the board fall into the gaps left by a clear, then spawn
    fn finish_settle(&mut self) {
        self.settle_timer_ms = None;
        let moved = gravity::apply(&mut self.board);
        log::debug!("settled: {} letters fell", moved);
        self.cleared = CellMask::empty();
        self.spawn_tile();
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<ResolveEvent> {
        self.last_event.take()
    }

    /// Row the active tile would land on
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(self.board.drop_target(active.x, active.y))
    }

    /// Advance logical time. Fires at most one due event (countdown step,
    /// settle completion or descent step) and reports whether one fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        match self.phase {
            GamePhase::CountdownToStart => self.tick_countdown(elapsed_ms),
            GamePhase::Running => {
                if let Some(remaining) = self.settle_timer_ms {
                    let remaining = remaining.saturating_sub(elapsed_ms);
                    if remaining == 0 {
                        self.finish_settle();
                        return true;
                    }
                    self.settle_timer_ms = Some(remaining);
                    return false;
                }

                if self.active.is_none() {
                    return false;
                }

                self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
                if self.drop_timer_ms >= self.config.tick_ms {
                    self.drop_timer_ms = 0;
                    return self.soft_drop_step();
                }
                false
            }
            GamePhase::NotStarted | GamePhase::Paused | GamePhase::GameOver => false,
        }
    }

    fn tick_countdown(&mut self, elapsed_ms: u32) -> bool {
        let Some(value) = self.countdown else {
            return false;
        };

        self.countdown_timer_ms = self.countdown_timer_ms.saturating_add(elapsed_ms);
        let hold_ms = if value == 0 {
            self.config.countdown_go_ms
        } else {
            self.config.countdown_step_ms
        };
        if self.countdown_timer_ms < hold_ms {
            return false;
        }

        self.countdown_timer_ms = 0;
        if value == 0 {
            self.begin_running();
        } else {
            self.countdown = Some(value - 1);
        }
        true
    }

    /// Pause or resume. Ignored outside `Running` and `Paused`.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Running,
            _ => return false,
        }
        true
    }

    /// Reset everything and count down into a fresh game.
    ///
    /// The letter sequence continues from where the previous game left it.
    pub fn restart(&mut self) {
        let config = self.config.with_seed(self.queue.seed());
        let dictionary = Arc::clone(&self.dictionary);
        let next_episode = self.episode_id.wrapping_add(1);

        *self = Self::new(config, dictionary);
        self.episode_id = next_episode;
        self.start();
    }

    /// Apply a player command; returns false when it was ignored
    pub fn apply_command(&mut self, command: Command) -> bool {
        if command.is_movement() && !self.can_steer() {
            return false;
        }
        match command {
            Command::MoveLeft => self.try_move(-1),
            Command::MoveRight => self.try_move(1),
            Command::SoftDrop => self.soft_drop_step(),
            Command::HardDrop => self.hard_drop(),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => {
                self.restart();
                true
            }
        }
    }

    /// The state after `command`, leaving `self` untouched
    pub fn commanded(&self, command: Command) -> Self {
        let mut next = self.clone();
        next.apply_command(command);
        next
    }

    /// The state after `elapsed_ms` of logical time, leaving `self` untouched
    pub fn stepped(&self, elapsed_ms: u32) -> Self {
        let mut next = self.clone();
        next.tick(elapsed_ms);
        next
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default(), Arc::new(WordList::empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letter(c: char) -> Letter {
        Letter::from_char(c).unwrap()
    }

    /// Running game with no countdown
    fn running(words: &[&str]) -> GameState {
        let config = GameConfig::default().with_seed(12345).with_countdown(0);
        let mut state = GameState::new(config, Arc::new(WordList::from_words(words)));
        assert!(state.start());
        state
    }

    fn place_active(state: &mut GameState, c: char, x: i8, y: i8) {
        state.active = Some(Tile {
            letter: letter(c),
            x,
            y,
        });
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::default();

        assert_eq!(state.phase, GamePhase::NotStarted);
        assert!(!state.started());
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.episode_id, 0);
        assert!(state.active.is_none());
        assert_eq!(state.upcoming().len(), 3);
        assert!(state.found_words.is_empty());
    }

    #[test]
    fn test_try_new_validates_config() {
        let config = GameConfig::default().with_queue_len(0);
        assert!(GameState::try_new(config, Arc::new(WordList::empty())).is_err());
    }

    #[test]
    fn test_start_enters_countdown() {
        let mut state = GameState::default();
        assert!(state.start());
        assert_eq!(state.phase, GamePhase::CountdownToStart);
        assert_eq!(state.countdown, Some(3));
        assert!(state.active.is_none());
        assert!(!state.start());
    }

    #[test]
    fn test_countdown_steps_then_runs() {
        let mut state = GameState::default();
        state.start();

        assert!(!state.tick(999));
        assert_eq!(state.countdown, Some(3));
        assert!(state.tick(1));
        assert_eq!(state.countdown, Some(2));
        assert!(state.tick(1000));
        assert_eq!(state.countdown, Some(1));
        assert!(state.tick(1000));
        assert_eq!(state.countdown, Some(0));
        assert_eq!(state.phase, GamePhase::CountdownToStart);

        assert!(!state.tick(299));
        assert!(state.tick(1));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.countdown, None);
        assert!(state.active.is_some());
    }

    #[test]
    fn test_commands_ignored_during_countdown() {
        let mut state = GameState::default();
        state.start();
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::HardDrop,
            Command::TogglePause,
        ] {
            assert!(!state.apply_command(cmd), "{:?}", cmd);
        }
        assert_eq!(state.phase, GamePhase::CountdownToStart);
    }

    #[test]
    fn test_spawn_draws_queue_head() {
        let config = GameConfig::default().with_seed(7).with_countdown(0);
        let mut state = GameState::new(config, Arc::new(WordList::empty()));
        let head = state.upcoming()[0];
        let second = state.upcoming()[1];

        state.start();
        let tile = state.active.unwrap();
        assert_eq!(tile.letter, head);
        assert_eq!((tile.x, tile.y), (4, 0));
        assert_eq!(state.upcoming()[0], second);
        assert_eq!(state.upcoming().len(), 3);
        assert_eq!(state.tile_id, 1);
    }

    #[test]
    fn test_move_left_at_wall_is_noop() {
        let mut state = running(&[]);
        place_active(&mut state, 'A', 0, 3);
        assert!(!state.apply_command(Command::MoveLeft));
        assert_eq!(state.active.unwrap().x, 0);
        assert!(state.apply_command(Command::MoveRight));
        assert_eq!(state.active.unwrap().x, 1);
    }

    #[test]
    fn test_move_blocked_by_letter() {
        let mut state = running(&[]);
        state.board_mut().set(3, 0, Some(letter('Z')));
        assert!(!state.apply_command(Command::MoveLeft));
        assert_eq!(state.active.unwrap().x, 4);
    }

    #[test]
    fn test_soft_drop_locks_on_floor() {
        let mut state = running(&[]);
        place_active(&mut state, 'Q', 2, 8);
        let before = state.tile_id;

        assert!(state.apply_command(Command::SoftDrop));
        assert_eq!(state.board.get(2, 8), Some(Some(letter('Q'))));
        assert_eq!(state.tile_id, before + 1);
        let ev = state.take_last_event().unwrap();
        assert_eq!((ev.x, ev.y), (2, 8));
        assert!(!ev.cleared_any());
    }

    #[test]
    fn test_hard_drop_rests_on_stack() {
        let mut state = running(&[]);
        state.board_mut().set(4, 8, Some(letter('A')));
        state.board_mut().set(4, 7, Some(letter('B')));
        assert_eq!(state.ghost_y(), Some(6));

        let tile = state.active.unwrap();
        assert!(state.apply_command(Command::HardDrop));
        assert_eq!(state.board.get(4, 6), Some(Some(tile.letter)));
    }

    #[test]
    fn test_tick_descends_once_per_interval() {
        let mut state = running(&[]);
        assert!(!state.tick(499));
        assert_eq!(state.active.unwrap().y, 0);
        assert!(state.tick(1));
        assert_eq!(state.active.unwrap().y, 1);
        assert_eq!(state.drop_timer_ms, 0);
    }

    #[test]
    fn test_word_clear_defers_spawn() {
        let mut state = running(&["stone"]);
        state.load_board(Board::from_rows(&["STON"]));
        place_active(&mut state, 'E', 4, 0);

        assert!(state.apply_command(Command::HardDrop));
        assert_eq!(state.score, 50);
        assert_eq!(state.combo, 1);
        assert!(state.active.is_none());
        assert!(state.is_settling());
        assert_eq!(state.cleared.len(), 5);
        assert_eq!(state.board.filled_count(), 0);
        assert_eq!(state.found_words().collect::<Vec<_>>(), vec!["STONE"]);

        // Movement has nothing to act on while settling.
        assert!(!state.apply_command(Command::MoveLeft));

        assert!(!state.tick(299));
        assert!(state.tick(1));
        assert!(!state.is_settling());
        assert!(state.cleared.is_empty());
        assert!(state.active.is_some());
    }

    #[test]
    fn test_gravity_after_clear() {
        let mut state = running(&["stone"]);
        state.load_board(Board::from_rows(&["Q....", "STON"]));
        place_active(&mut state, 'E', 4, 0);
        state.apply_command(Command::HardDrop);
        assert_eq!(state.board.get(0, 7), Some(Some(letter('Q'))));

        state.tick(300);
        assert_eq!(state.board.get(0, 7), Some(None));
        assert_eq!(state.board.get(0, 8), Some(Some(letter('Q'))));
    }

    #[test]
    fn test_load_board_over_active_tile_respawns() {
        let mut state = running(&[]);
        place_active(&mut state, 'A', 2, 3);
        let tiles = state.tile_id;

        let mut board = Board::new();
        board.set(2, 3, Some(letter('Q')));

        state.load_board(board);
        assert_eq!(state.board.get(2, 3), Some(Some(letter('Q'))));
        assert_eq!(state.phase, GamePhase::Running);
        let tile = state.active.unwrap();
        assert_eq!((tile.x, tile.y), (4, 0));
        assert_eq!(state.tile_id, tiles + 1);

        // Play keeps going on the next tick.
        assert!(state.tick(500));
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_load_board_over_spawn_cell_ends_game() {
        let mut state = running(&[]);
        let mut board = Board::new();
        board.set(4, 0, Some(letter('Q')));

        state.load_board(board);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.active.is_none());
        assert!(!state.tick(1_000));
    }

    #[test]
    fn test_load_board_keeps_tile_on_free_cell() {
        let mut state = running(&[]);
        let before = state.active;
        state.load_board(Board::from_rows(&["STON"]));
        assert_eq!(state.active, before);
        assert_eq!(state.tile_id, 1);
    }

    #[test]
    fn test_zero_settle_spawns_immediately() {
        let config = GameConfig::default()
            .with_seed(3)
            .with_countdown(0)
            .with_settle_ms(0);
        let mut state = GameState::new(config, Arc::new(WordList::from_words(["stone"])));
        state.start();
        state.load_board(Board::from_rows(&["STON"]));
        place_active(&mut state, 'E', 4, 0);

        state.apply_command(Command::HardDrop);
        assert!(!state.is_settling());
        assert!(state.active.is_some());
    }

    #[test]
    fn test_combo_resets_after_dry_turn() {
        let mut state = running(&["stone"]);
        state.load_board(Board::from_rows(&["STON"]));
        place_active(&mut state, 'E', 4, 0);
        state.apply_command(Command::HardDrop);
        assert_eq!(state.combo, 1);
        state.tick(300);

        place_active(&mut state, 'X', 0, 0);
        state.apply_command(Command::HardDrop);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_found_words_capped_most_recent_first() {
        let mut state = running(&["stone", "tiles"]);
        for _ in 0..FOUND_WORDS_CAP {
            state.load_board(Board::from_rows(&["STON"]));
            place_active(&mut state, 'E', 4, 0);
            state.apply_command(Command::HardDrop);
            state.tick(300);
        }
        state.load_board(Board::from_rows(&["TILE"]));
        place_active(&mut state, 'S', 4, 0);
        state.apply_command(Command::HardDrop);

        assert_eq!(state.found_words().count(), FOUND_WORDS_CAP);
        assert_eq!(state.found_words().next(), Some("TILES"));
        assert_eq!(state.combo, FOUND_WORDS_CAP as u32 + 1);
    }

    #[test]
    fn test_game_over_when_spawn_blocked() {
        let mut state = running(&[]);
        place_active(&mut state, 'A', 0, 0);
        state.board_mut().set(4, 0, Some(letter('Z')));

        state.apply_command(Command::HardDrop);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.active.is_none());

        let board = state.board.clone();
        assert!(!state.tick(10_000));
        assert!(!state.apply_command(Command::HardDrop));
        assert_eq!(state.board, board);
    }

    #[test]
    fn test_pause_freezes_timers() {
        let mut state = running(&[]);
        state.tick(200);
        assert!(state.apply_command(Command::TogglePause));
        assert!(state.paused());

        assert!(!state.tick(10_000));
        assert_eq!(state.drop_timer_ms, 200);
        assert!(!state.apply_command(Command::MoveLeft));

        assert!(state.apply_command(Command::TogglePause));
        assert!(state.tick(300));
        assert_eq!(state.active.unwrap().y, 1);
    }

    #[test]
    fn test_pause_freezes_pending_settle() {
        let mut state = running(&["stone"]);
        state.load_board(Board::from_rows(&["Q....", "STON"]));
        place_active(&mut state, 'E', 4, 0);
        state.apply_command(Command::HardDrop);
        state.tick(100);
        assert!(state.apply_command(Command::TogglePause));

        assert!(!state.tick(10_000));
        assert!(state.is_settling());
        assert_eq!(state.settle_timer_ms, Some(200));
        assert!(state.active.is_none());
        // Not compacted yet: Q still hangs above the cleared row.
        assert_eq!(state.board.get(0, 7), Some(Some(letter('Q'))));
        assert_eq!(state.board.get(0, 8), Some(None));

        assert!(state.apply_command(Command::TogglePause));
        assert!(!state.tick(199));
        assert!(state.tick(1));
        assert!(!state.is_settling());
        assert_eq!(state.board.get(0, 8), Some(Some(letter('Q'))));
        assert!(state.active.is_some());
    }

    #[test]
    fn test_restart_resets_and_counts_down() {
        let mut state = running(&["stone"]);
        state.load_board(Board::from_rows(&["STON"]));
        place_active(&mut state, 'E', 4, 0);
        state.apply_command(Command::HardDrop);
        assert!(state.score > 0);

        assert!(state.apply_command(Command::Restart));
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.board.filled_count(), 0);
        assert!(state.found_words.is_empty());
        assert!(!state.is_settling());
        // The test config skips the countdown, so play resumes at once.
        assert_eq!(state.phase, GamePhase::Running);
        assert!(state.dictionary().contains("stone"));
    }

    #[test]
    fn test_restart_from_game_over_counts_down() {
        let mut state = GameState::default();
        state.phase = GamePhase::GameOver;
        state.apply_command(Command::Restart);
        assert_eq!(state.phase, GamePhase::CountdownToStart);
        assert_eq!(state.countdown, Some(3));
    }

    #[test]
    fn test_pure_transitions_leave_input_untouched() {
        let state = running(&[]);
        let moved = state.commanded(Command::MoveRight);
        assert_eq!(state.active.unwrap().x, 4);
        assert_eq!(moved.active.unwrap().x, 5);

        let stepped = state.stepped(500);
        assert_eq!(state.active.unwrap().y, 0);
        assert_eq!(stepped.active.unwrap().y, 1);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = running(&["stone"]);
        state.load_board(Board::from_rows(&["STON"]));
        place_active(&mut state, 'E', 4, 0);

        let snap = state.snapshot();
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.active.map(|a| a.letter), Some(letter('E')));
        assert_eq!(snap.ghost_y, Some(8));
        assert_eq!(snap.cell(0, 8), Some(letter('S')));
        assert!(snap.playable());

        state.apply_command(Command::HardDrop);
        let snap = state.snapshot();
        assert_eq!(snap.found_words, vec!["STONE".to_string()]);
        assert_eq!(snap.timers.settle_ms, 300);
        assert_eq!(snap.cleared.len(), 5);
        assert!(!snap.playable());
    }
}
