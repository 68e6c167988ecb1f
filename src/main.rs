//! Terminal runner (default binary).
//!
//! Reads tunables from `FALLTER_*` environment variables, loads the word list
//! named by `FALLTER_DICTIONARY` and plays in the alternate screen. Set
//! `RUST_LOG` (and redirect stderr) to capture engine logs.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info, warn};

use fallter::core::{Dictionary, GameConfig, GameSnapshot, GameState, WordList};
use fallter::input::{handle_key_event, should_quit};
use fallter::term::{FrameBuffer, GameView, TerminalRenderer, TerminalSession, Viewport};

const DEFAULT_DICTIONARY: &str = "/usr/share/dict/words";

/// Frame interval, roughly 60 FPS
const FRAME_MS: u64 = 16;

fn main() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        env_logger::Builder::from_default_env().init();
    }

    let config = GameConfig::from_env();
    config.validate().context("invalid FALLTER_* configuration")?;
    let dictionary = load_dictionary();

    let mut game = GameState::new(config, dictionary);
    game.start();

    let session = TerminalSession::enter()?;
    let mut term = TerminalRenderer::new();

    let result = run(&mut term, &mut game);

    let restored = session.restore();
    info!("exiting with score {}", game.score());
    result?;
    restored
}

fn load_dictionary() -> Arc<dyn Dictionary> {
    let path = std::env::var_os("FALLTER_DICTIONARY")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DICTIONARY));

    match WordList::load(&path) {
        Ok(list) => Arc::new(list),
        Err(err) => {
            warn!("{}; playing without a dictionary", err);
            Arc::new(WordList::empty())
        }
    }
}

fn run(term: &mut TerminalRenderer, game: &mut GameState) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let frame = Duration::from_millis(FRAME_MS);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        let stats = term.draw_swap(&mut fb)?;
        if stats.full {
            debug!("full redraw at {}x{}, {} bytes", w, h, stats.bytes);
        }

        // Input with timeout until the next tick.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        game.apply_command(command);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time.
        let elapsed = last_tick.elapsed();
        if elapsed >= frame {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            game.tick(elapsed_ms);
        }

        if let Some(event) = game.take_last_event() {
            if event.cleared_any() {
                debug!(
                    "{} word(s) at ({}, {}): +{} combo {}",
                    event.words, event.x, event.y, event.score_delta, event.combo
                );
            }
        }
    }
}
