use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// A press of one of the handheld's buttons
    Button(Key),
    Quit,
    None,
}

/// Maps host keyboard events onto the handheld's keypad
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Button(Key::Up),
            KeyCode::Down => KeyAction::Button(Key::Down),
            KeyCode::Left => KeyAction::Button(Key::Left),
            KeyCode::Right => KeyAction::Button(Key::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Button(Key::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Button(Key::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Button(Key::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Button(Key::Right),

            // Primary buttons
            KeyCode::Char('z') | KeyCode::Char('Z') | KeyCode::Enter | KeyCode::Char(' ') => {
                KeyAction::Button(Key::A)
            }
            KeyCode::Char('x') | KeyCode::Char('X') => KeyAction::Button(Key::B),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
