//! Key to action mapping

use crossterm::event::{KeyCode, KeyModifiers};

/// Actions that can be taken in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Next,
    Previous,
    PageUp,
    PageDown,

    /// Pick option N (zero-based) directly
    Choose(usize),

    // Selection
    Select,
    Back,

    // Session
    Open,
    Restart,
    Home,
    Exit,
    Confirm,
    Deny,

    // Modes
    Command,
    Help,
    Quit,
}

/// Vim-style key mapping (basic, without modifiers)
pub fn vim_key_to_action(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Up),
        KeyCode::Char('h') | KeyCode::Left => Some(Action::Previous),
        KeyCode::Char('l') | KeyCode::Right => Some(Action::Next),
        KeyCode::Char('d') | KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Char('u') | KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Choose(c as usize - '1' as usize)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::Select),
        KeyCode::Esc => Some(Action::Back),
        KeyCode::Char('o') => Some(Action::Open),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('H') => Some(Action::Home),
        KeyCode::Char('x') => Some(Action::Exit),
        KeyCode::Char('y') => Some(Action::Confirm),
        KeyCode::Char('n') => Some(Action::Deny),
        KeyCode::Char(':') => Some(Action::Command),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('q') => Some(Action::Quit),
        _ => None,
    }
}

/// Key mapping with modifiers (for Ctrl combinations)
pub fn key_with_modifier_to_action(key: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match key {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') | KeyCode::Char('f') => Some(Action::PageDown),
            KeyCode::Char('u') | KeyCode::Char('b') => Some(Action::PageUp),
            _ => None,
        }
    } else {
        vim_key_to_action(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vim_j_maps_to_down() {
        assert_eq!(vim_key_to_action(KeyCode::Char('j')), Some(Action::Down));
    }

    #[test]
    fn arrows_navigate_lessons() {
        assert_eq!(vim_key_to_action(KeyCode::Right), Some(Action::Next));
        assert_eq!(vim_key_to_action(KeyCode::Left), Some(Action::Previous));
    }

    #[test]
    fn digits_choose_options() {
        assert_eq!(vim_key_to_action(KeyCode::Char('1')), Some(Action::Choose(0)));
        assert_eq!(vim_key_to_action(KeyCode::Char('4')), Some(Action::Choose(3)));
        assert_eq!(vim_key_to_action(KeyCode::Char('0')), None);
    }

    #[test]
    fn unknown_key_returns_none() {
        assert_eq!(vim_key_to_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn ctrl_c_quits() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn no_modifier_uses_vim_keys() {
        assert_eq!(
            key_with_modifier_to_action(KeyCode::Char('x'), KeyModifiers::NONE),
            Some(Action::Exit)
        );
    }
}
