//! Keyboard mapping (engine-facing).
//!
//! Maps `crossterm` key events into [`slide2048_core::Command`]. The mapping
//! is phase-unaware on purpose: the engine silently ignores commands that
//! make no sense in its current phase, so `y`/`n` only matter while a
//! restart confirmation is pending.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use slide2048_core::Command;

/// Translate one key event. Returns `None` for keys the game does not use
/// and for key-release events on terminals that report them.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some(Command::MoveUp),
        KeyCode::Down => Some(Command::MoveDown),
        KeyCode::Left => Some(Command::MoveLeft),
        KeyCode::Right => Some(Command::MoveRight),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' | 'k' => Some(Command::MoveUp),
            's' | 'j' => Some(Command::MoveDown),
            'a' | 'h' => Some(Command::MoveLeft),
            'd' | 'l' => Some(Command::MoveRight),
            'b' => Some(Command::Undo),
            'r' => Some(Command::RequestRestart),
            'y' => Some(Command::ConfirmRestart),
            'n' => Some(Command::CancelRestart),
            'q' => Some(Command::Quit),
            _ => None,
        },
        _ => None,
    }
}
