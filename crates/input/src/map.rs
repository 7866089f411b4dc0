//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Letters match regardless of case. Keys held with Control never map, so
/// Ctrl-C stays a quit key instead of a stow.
pub fn map_key(key: KeyEvent) -> Option<GameAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Up => Some(GameAction::Rotate),
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),
        KeyCode::Down => Some(GameAction::SoftDrop),
        KeyCode::Tab => Some(GameAction::Stow),
        KeyCode::Char(c) => map_char(c),
        _ => None,
    }
}

/// Character keys, number pad digits included.
pub fn map_char(c: char) -> Option<GameAction> {
    match c.to_ascii_lowercase() {
        // Rotation
        '8' | 'i' | 'w' => Some(GameAction::Rotate),

        // Movement
        '4' | 'j' | 'a' => Some(GameAction::MoveLeft),
        '6' | 'l' | 'd' => Some(GameAction::MoveRight),
        '5' | 'k' | 's' => Some(GameAction::SoftDrop),

        // Actions
        ' ' => Some(GameAction::HardDrop),
        'c' | '0' => Some(GameAction::Stow),
        'p' => Some(GameAction::Pause),

        // Restart
        'r' => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn ch(c: char) -> Option<GameAction> {
        map_key(KeyEvent::from(KeyCode::Char(c)))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(GameAction::MoveLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(GameAction::MoveRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(GameAction::SoftDrop));

        for c in ['4', 'j', 'a', 'J', 'A'] {
            assert_eq!(ch(c), Some(GameAction::MoveLeft), "{c}");
        }
        for c in ['6', 'l', 'd', 'L', 'D'] {
            assert_eq!(ch(c), Some(GameAction::MoveRight), "{c}");
        }
        for c in ['5', 'k', 's', 'K', 'S'] {
            assert_eq!(ch(c), Some(GameAction::SoftDrop), "{c}");
        }
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(GameAction::Rotate));
        for c in ['8', 'i', 'w', 'I', 'W'] {
            assert_eq!(ch(c), Some(GameAction::Rotate), "{c}");
        }
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(ch(' '), Some(GameAction::HardDrop));
        assert_eq!(ch('c'), Some(GameAction::Stow));
        assert_eq!(ch('0'), Some(GameAction::Stow));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), Some(GameAction::Stow));
        assert_eq!(ch('P'), Some(GameAction::Pause));
        assert_eq!(ch('r'), Some(GameAction::Restart));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(ch('x'), None);
        assert_eq!(ch('9'), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
