//! Food placement policy
//!
//! Food is drawn at random from the playfield's food region. Rejection
//! sampling is bounded: on a nearly full board the policy gives up instead
//! of scanning for free cells, and the caller decides what to do.

use log::warn;
use rand::Rng;

use super::config::GameConfig;
use super::state::{GameState, Position};

/// Whether food may ever be placed on `pos`, ignoring the snake
pub fn is_food_cell(config: &GameConfig, state: &GameState, pos: Position) -> bool {
    state.playfield.food_region().contains(pos) && !config.score_band.contains(pos)
}

/// Whether `pos` is a food cell not covered by the snake
pub fn is_free_food_cell(config: &GameConfig, state: &GameState, pos: Position) -> bool {
    is_food_cell(config, state, pos) && !state.is_occupied_by_snake(pos)
}

/// Try to move the food to a random free cell.
///
/// Every draw counts against `config.spawn_attempts`. Returns false once the
/// attempts are used up, with `state.food` left as it was.
pub fn spawn_food<R: Rng>(state: &mut GameState, config: &GameConfig, rng: &mut R) -> bool {
    let region = state.playfield.food_region();

    for _ in 0..config.spawn_attempts {
        let candidate = Position::new(
            rng.gen_range(region.min_x..=region.max_x),
            rng.gen_range(region.min_y..=region.max_y),
        );

        if is_free_food_cell(config, state, candidate) {
            state.food = candidate;
            return true;
        }
    }

    warn!(
        "no free food cell after {} attempts (snake length {})",
        config.spawn_attempts,
        state.snake.len()
    );
    false
}
