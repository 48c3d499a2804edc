use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    food::spawn_food,
    sound::Sound,
    state::{CollisionType, GamePhase, GameState, Position, Snake},
};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// How the food was replaced after being eaten
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodRespawn {
    /// Random placement found a free cell
    Random,
    /// Random placement gave up; food went to the tail cell recorded
    /// before the move
    TailFallback,
    /// Neither worked; food keeps its old position
    Stale,
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Set whenever food was eaten
    pub respawn: Option<FoodRespawn>,
}

/// Result of a call to [`GameEngine::update`]
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether a simulated step ran and the snake moved
    pub moved: bool,
    /// Whether the game is over
    pub terminated: bool,
    /// Cue for the frame loop to play
    pub sound: Option<Sound>,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn idle(state: &GameState) -> Self {
        Self {
            moved: false,
            terminated: state.phase == GamePhase::GameOver,
            sound: None,
            info: StepInfo {
                ate_food: false,
                collision_type: None,
                respawn: None,
            },
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    /// Rejects configurations the engine cannot play on, such as a
    /// playfield without food cells
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The state the device boots into: a fresh game parked on the menu
    pub fn new_state(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.playfield.center(),
            Direction::Right,
            self.config.initial_snake_length,
            self.config.max_snake_length,
        );
        let mut state = GameState::new(
            snake,
            Position::default(),
            self.config.playfield,
            self.config.initial_move_delay,
        );
        self.init_game(&mut state);
        state.phase = GamePhase::Menu;
        state
    }

    /// Reset the game to its starting configuration and start playing.
    /// The snake arena is reused.
    pub fn init_game(&mut self, state: &mut GameState) {
        state.snake.reset(
            self.config.playfield.center(),
            Direction::Right,
            self.config.initial_snake_length,
        );
        state.direction = Direction::Right;
        state.next_direction = Direction::Right;
        state.score = 0;
        state.tick_counter = 0;
        state.move_delay = self.config.initial_move_delay;
        state.phase = GamePhase::Playing;
        state.playfield = self.config.playfield;

        if !spawn_food(state, &self.config, &mut self.rng) {
            warn!("no room for the first food, keeping {:?}", state.food);
        }
    }

    /// Advance the simulation by one frame.
    ///
    /// Does nothing outside [`GamePhase::Playing`]. While playing, the snake
    /// only moves once every `move_delay` frames.
    pub fn update(&mut self, state: &mut GameState) -> StepResult {
        if state.phase != GamePhase::Playing {
            return StepResult::idle(state);
        }

        state.tick_counter += 1;
        if state.tick_counter < state.move_delay {
            return StepResult::idle(state);
        }
        state.tick_counter = 0;

        state.direction = state.next_direction;
        let new_head = state.snake.head().moved_in_direction(state.direction);

        if let Some(collision_type) = state.check_collision(new_head) {
            state.phase = GamePhase::GameOver;
            info!(
                "game over: {:?} at ({}, {}), score {}, length {}",
                collision_type,
                new_head.x,
                new_head.y,
                state.score,
                state.snake.len()
            );

            return StepResult {
                moved: false,
                terminated: true,
                sound: Some(Sound::Crash),
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                    respawn: None,
                },
            };
        }

        let ate_food = new_head == state.food;
        let old_tail = state.snake.tail();

        if ate_food {
            state.score = state.score.saturating_add(self.config.food_score);
            state.snake.grow();
            if state.move_delay > self.config.min_move_delay {
                state.move_delay -= 1;
            }
            debug!(
                "ate food: score {}, length {}, move delay {}",
                state.score,
                state.snake.len(),
                state.move_delay
            );
        }

        state.snake.advance(new_head);

        let respawn = ate_food.then(|| self.respawn_food(state, old_tail));

        StepResult {
            moved: true,
            terminated: false,
            sound: ate_food.then_some(Sound::Eat),
            info: StepInfo {
                ate_food,
                collision_type: None,
                respawn,
            },
        }
    }

    /// Place new food after the old one was eaten. When random placement
    /// gives up, the tail recorded before the move is used if it lies in
    /// the food region, whether or not the grown snake still covers it.
    fn respawn_food(&mut self, state: &mut GameState, old_tail: Position) -> FoodRespawn {
        if spawn_food(state, &self.config, &mut self.rng) {
            return FoodRespawn::Random;
        }

        if state.playfield.food_region().contains(old_tail) {
            warn!(
            "falling back to the old tail cell ({}, {}) for food",
            old_tail.x, old_tail.y
        );
            state.food = old_tail;
            return FoodRespawn::TailFallback;
        }

        warn!("food left stale at ({}, {})", state.food.x, state.food.y);
        FoodRespawn::Stale
    }
}
