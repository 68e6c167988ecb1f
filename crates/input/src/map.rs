//! Key mapping from terminal events to game commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(Command::SoftDrop),

        // Actions
        KeyCode::Char(' ') => Some(Command::HardDrop),
        KeyCode::Char('p' | 'P') | KeyCode::Esc => Some(Command::TogglePause),
        KeyCode::Char('r' | 'R') => Some(Command::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
