//! Button input to game intent
//!
//! One key sample per frame is turned into a phase change or a queued
//! direction. Movement itself only happens in [`GameEngine::update`].

use log::info;
use rand::Rng;

use super::action::Direction;
use super::engine::GameEngine;
use super::sound::Sound;
use super::state::{GamePhase, GameState};

/// A key sample from the device keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Key {
    #[default]
    None,
    A,
    B,
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// One of the two primary buttons
    pub fn is_primary(&self) -> bool {
        matches!(self, Key::A | Key::B)
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            _ => None,
        }
    }
}

impl<R: Rng> GameEngine<R> {
    /// Apply one key sample to the state.
    ///
    /// Returns the acknowledgment cue when the key changed the phase.
    pub fn handle_input(&mut self, state: &mut GameState, key: Key) -> Option<Sound> {
        match state.phase {
            GamePhase::Menu if key.is_primary() => {
                self.init_game(state);
                info!("game started");
                Some(Sound::Confirm)
            }
            GamePhase::Playing => {
                // Reversal is judged against the committed direction, not the queued one
                if let Some(dir) = key.direction() {
                    if !dir.is_opposite(state.direction) {
                        state.next_direction = dir;
                    }
                }
                None
            }
            GamePhase::GameOver if key.is_primary() => {
                state.phase = GamePhase::Menu;
                Some(Sound::Confirm)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::GameConfig;

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::default(), 8).unwrap()
    }

    #[test]
    fn test_primary_starts_game_from_menu() {
        for key in [Key::A, Key::B] {
            let mut engine = engine();
            let mut state = engine.new_state();
            state.score = 70;

            let sound = engine.handle_input(&mut state, key);

            assert_eq!(sound, Some(Sound::Confirm));
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.score, 0);
        }
    }

    #[test]
    fn test_menu_ignores_directions() {
        let mut engine = engine();
        let mut state = engine.new_state();
        let before = state.clone();

        for key in [Key::None, Key::Up, Key::Down, Key::Left, Key::Right] {
            assert_eq!(engine.handle_input(&mut state, key), None);
        }
        assert_eq!(state, before);
    }

    #[test]
    fn test_direction_is_queued_not_committed() {
        let mut engine = engine();
        let mut state = engine.new_state();
        engine.handle_input(&mut state, Key::A);

        assert_eq!(engine.handle_input(&mut state, Key::Down), None);
        assert_eq!(state.next_direction, Direction::Down);
        assert_eq!(state.direction, Direction::Right);
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut engine = engine();
        let mut state = engine.new_state();
        engine.handle_input(&mut state, Key::A);

        for (current, reverse) in [
            (Direction::Right, Key::Left),
            (Direction::Left, Key::Right),
            (Direction::Up, Key::Down),
            (Direction::Down, Key::Up),
        ] {
            state.direction = current;
            state.next_direction = current;
            engine.handle_input(&mut state, reverse);
            assert_eq!(state.next_direction, current);
        }
    }

    #[test]
    fn test_reversal_checked_against_committed_direction() {
        let mut engine = engine();
        let mut state = engine.new_state();
        engine.handle_input(&mut state, Key::A);

        // Up is queued, but Left is still the reverse of the committed Right
        engine.handle_input(&mut state, Key::Up);
        engine.handle_input(&mut state, Key::Left);
        assert_eq!(state.next_direction, Direction::Up);
    }

    #[test]
    fn test_primary_ignored_while_playing() {
        let mut engine = engine();
        let mut state = engine.new_state();
        engine.handle_input(&mut state, Key::A);
        state.score = 30;
        let before = state.clone();

        assert_eq!(engine.handle_input(&mut state, Key::A), None);
        assert_eq!(engine.handle_input(&mut state, Key::B), None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_game_over_returns_to_menu() {
        let mut engine = engine();
        let mut state = engine.new_state();
        engine.handle_input(&mut state, Key::A);
        state.phase = GamePhase::GameOver;
        state.score = 120;

        assert_eq!(engine.handle_input(&mut state, Key::Up), None);
        assert_eq!(state.phase, GamePhase::GameOver);

        assert_eq!(engine.handle_input(&mut state, Key::B), Some(Sound::Confirm));
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.score, 120);
    }
}
