//! Terminal key bindings for the timer controls

use std::io;

use crossterm::{
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use tracing::warn;

use crate::tasks::TimerCommand;

/// Map a key press to a timer command
pub fn command_for_key(key: KeyEvent) -> Option<TimerCommand> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    // Raw mode swallows SIGINT, so ctrl-c closes like escape does
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(TimerCommand::Close),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Enter => Some(TimerCommand::Start),
        KeyCode::Esc => Some(TimerCommand::Close),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            's' => Some(TimerCommand::Start),
            ' ' | 'p' => Some(TimerCommand::TogglePause),
            'r' => Some(TimerCommand::Restart),
            'x' => Some(TimerCommand::Stop),
            'q' => Some(TimerCommand::Close),
            _ => None,
        },
        _ => None,
    }
}

/// Keeps the terminal in raw mode for single-key input until dropped
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn single_keys_map_to_commands() {
        assert_eq!(command_for_key(press(KeyCode::Enter)), Some(TimerCommand::Start));
        assert_eq!(command_for_key(press(KeyCode::Char(' '))), Some(TimerCommand::TogglePause));
        assert_eq!(command_for_key(press(KeyCode::Char('P'))), Some(TimerCommand::TogglePause));
        assert_eq!(command_for_key(press(KeyCode::Char('r'))), Some(TimerCommand::Restart));
        assert_eq!(command_for_key(press(KeyCode::Char('x'))), Some(TimerCommand::Stop));
        assert_eq!(command_for_key(press(KeyCode::Esc)), Some(TimerCommand::Close));
        assert_eq!(command_for_key(press(KeyCode::Char('j'))), None);
    }

    #[test]
    fn ctrl_c_closes_and_other_chords_are_ignored() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(ctrl_c), Some(TimerCommand::Close));
        let ctrl_p = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL);
        assert_eq!(command_for_key(ctrl_p), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('p'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(command_for_key(release), None);
    }
}
