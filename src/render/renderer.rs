use anyhow::Result;

use crate::device::{Color, DISPLAY_HEIGHT, DISPLAY_WIDTH, Display};
use crate::game::{GamePhase, GameState, Position};

/// Pixel size of one grid cell
pub const CELL_SIZE: i32 = 4;
/// Pixel offset of cell (0, 0) from the display corner
pub const CELL_ORIGIN: i32 = 2;

/// Zero-padded last three decimal digits of `score`
pub fn score_digits(score: u32) -> [char; 3] {
    let digit = |n: u32| char::from(b'0' + (n % 10) as u8);
    [digit(score / 100), digit(score / 10), digit(score)]
}

fn score_text(score: u32) -> String {
    score_digits(score).iter().collect()
}

/// Top-left pixel of a cell
fn cell_origin(pos: Position) -> (i32, i32) {
    (
        pos.x * CELL_SIZE + CELL_ORIGIN,
        pos.y * CELL_SIZE + CELL_ORIGIN,
    )
}

/// Projects a [`GameState`] onto a [`Display`], one full frame per call
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<D: Display + ?Sized>(&self, display: &mut D, state: &GameState) -> Result<()> {
        display.clear();

        match state.phase {
            GamePhase::Menu => self.render_menu(display),
            GamePhase::Playing => self.render_playing(display, state),
            GamePhase::GameOver => self.render_game_over(display, state),
        }

        display.commit()
    }

    fn render_menu<D: Display + ?Sized>(&self, display: &mut D) {
        display.draw_text("SNAKE", 44, 8, Color::White);
        display.draw_text("Press A to", 24, 28, Color::White);
        display.draw_text("Start", 44, 38, Color::White);

        // A little snake: four body dots and a head
        for i in 0..4 {
            display.fill_rect(30 + i * 6, 51, 2, 2, Color::White);
        }
        display.fill_rect(30 + 4 * 6, 50, 4, 4, Color::White);
    }

    fn render_playing<D: Display + ?Sized>(&self, display: &mut D, state: &GameState) {
        display.draw_frame(0, 0, DISPLAY_WIDTH, DISPLAY_HEIGHT, Color::White);

        for (i, segment) in state.snake.body().iter().enumerate() {
            let (x, y) = cell_origin(*segment);
            if i == 0 {
                display.fill_rect(x, y, CELL_SIZE - 1, CELL_SIZE - 1, Color::White);
            } else {
                display.fill_rect(x + 1, y + 1, CELL_SIZE - 3, CELL_SIZE - 3, Color::White);
            }
        }

        // Food blinks with the tick counter
        if (state.tick_counter / 2) % 2 == 0 {
            let (fx, fy) = cell_origin(state.food);
            display.fill_rect(fx, fy, CELL_SIZE - 1, CELL_SIZE - 1, Color::White);
            display.draw_point(fx + 1, fy + 1, Color::Black);
        }

        display.draw_text(&score_text(state.score), 2, 1, Color::White);
    }

    fn render_game_over<D: Display + ?Sized>(&self, display: &mut D, state: &GameState) {
        display.draw_text("GAME OVER", 28, 12, Color::White);
        display.draw_text("Score:", 40, 28, Color::White);
        display.draw_text(&score_text(state.score), 52, 38, Color::White);
        display.draw_text("Press A", 36, 52, Color::White);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
