//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tuinty_core::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Reset,
    Quit,
    ShowHelp,
}

/// Map a key press on the game screen to a command.
pub fn command_for(key: &KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Some(Command::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Some(Command::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Some(Command::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Some(Command::Move(Direction::Right)),
        KeyCode::Char('r' | 'R') => Some(Command::Reset),
        KeyCode::Char('q' | 'Q') => Some(Command::Quit),
        KeyCode::Char('?') | KeyCode::F(1) => Some(Command::ShowHelp),
        _ => None,
    }
}

/// Whether a key press closes the help screen.
pub fn closes_help(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && matches!(key.code, KeyCode::Esc | KeyCode::Char(' ' | 'q' | '?'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn command(code: KeyCode) -> Option<Command> {
        command_for(&press(code))
    }

    fn direction(code: KeyCode) -> Option<Direction> {
        match command(code) {
            Some(Command::Move(direction)) => Some(direction),
            _ => None,
        }
    }

    #[test]
    fn test_arrow_and_wasd_moves() {
        assert_eq!(direction(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction(KeyCode::Char('s')), Some(Direction::Down));
        assert_eq!(direction(KeyCode::Char('A')), Some(Direction::Left));
        assert_eq!(direction(KeyCode::Right), Some(Direction::Right));
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(command(KeyCode::Char('r')), Some(Command::Reset));
        assert_eq!(command(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(command(KeyCode::Char('?')), Some(Command::ShowHelp));
        assert_eq!(command(KeyCode::F(1)), Some(Command::ShowHelp));
        assert_eq!(
            command_for(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(command(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Up);
        key.kind = KeyEventKind::Release;
        assert_eq!(command_for(&key), None);
        assert!(!closes_help(&key));
    }

    #[test]
    fn test_help_close_keys() {
        assert!(closes_help(&press(KeyCode::Esc)));
        assert!(closes_help(&press(KeyCode::Char(' '))));
        assert!(closes_help(&press(KeyCode::Char('q'))));
        assert!(!closes_help(&press(KeyCode::Char('w'))));
    }
}
