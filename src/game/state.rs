use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// Inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn new(min_x: i32, max_x: i32, min_y: i32, max_y: i32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        (self.min_x..=self.max_x).contains(&pos.x) && (self.min_y..=self.max_y).contains(&pos.y)
    }

    /// Number of cells covered (zero for an inverted rectangle)
    #[cfg(test)]
    pub fn area(&self) -> usize {
        let w = (self.max_x - self.min_x + 1).max(0) as usize;
        let h = (self.max_y - self.min_y + 1).max(0) as usize;
        w * h
    }

    #[cfg(test)]
    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (self.min_y..=self.max_y)
            .flat_map(move |y| (self.min_x..=self.max_x).map(move |x| Position::new(x, y)))
    }
}

/// The grid the game is played on. The last column and row sit under the
/// display border and are never playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: i32,
    pub height: i32,
}

impl Playfield {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Cells the head may occupy
    pub fn interior(&self) -> Bounds {
        Bounds::new(0, self.width - 2, 0, self.height - 2)
    }

    /// Cells food may be placed on: the interior minus a one-cell margin
    pub fn food_region(&self) -> Bounds {
        Bounds::new(1, self.width - 2, 1, self.height - 2)
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }
}

/// The snake, stored in a fixed-capacity arena. Index 0 is the head.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Box<[Position]>,
    len: usize,
}

impl Snake {
    /// Create a snake of `length` segments trailing behind `head`, in an
    /// arena that can hold `capacity` segments.
    pub fn new(head: Position, direction: Direction, length: usize, capacity: usize) -> Self {
        let mut snake = Self {
            segments: vec![Position::default(); capacity.max(1)].into_boxed_slice(),
            len: 0,
        };
        snake.reset(head, direction, length);
        snake
    }

    /// Rebuild the snake in place without touching the arena size
    pub fn reset(&mut self, head: Position, direction: Direction, length: usize) {
        let (dx, dy) = direction.delta();
        self.len = length.clamp(1, self.capacity());

        let mut segment = head;
        for slot in &mut self.segments[..self.len] {
            *slot = segment;
            segment = segment.moved_by(-dx, -dy);
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.len - 1]
    }

    /// All occupied segments, head first
    pub fn body(&self) -> &[Position] {
        &self.segments[..self.len]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.segments[1..self.len]
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body().contains(&pos)
    }

    /// Extend by one segment. At capacity this does nothing and returns false.
    ///
    /// The new slot is filled by the next [`Snake::advance`], which copies
    /// the old tail into it.
    pub fn grow(&mut self) -> bool {
        if self.len >= self.capacity() {
            return false;
        }
        self.len += 1;
        true
    }

    /// Shift every segment one step towards the tail and put the head at
    /// `new_head`. Runs tail first so no predecessor is overwritten before
    /// it has been copied.
    pub fn advance(&mut self, new_head: Position) {
        for i in (1..self.len).rev() {
            self.segments[i] = self.segments[i - 1];
        }
        self.segments[0] = new_head;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false: a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.segments.len()
    }

    /// Replace the body wholesale. Extra segments beyond capacity are
    /// dropped; an empty body is ignored.
    #[cfg(test)]
    pub fn set_body(&mut self, body: &[Position]) {
        let n = body.len().min(self.capacity());
        if n == 0 {
            return;
        }
        self.segments[..n].copy_from_slice(&body[..n]);
        self.len = n;
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit the border
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Coarse phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen
    #[default]
    Menu,
    /// Game in progress
    Playing,
    /// Game over screen, final state kept for display
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Direction committed on the last simulated step
    pub direction: Direction,
    /// Direction queued by input, committed on the next simulated step
    pub next_direction: Direction,
    pub food: Position,
    pub score: u32,
    /// Frames since the last simulated step
    pub tick_counter: u32,
    /// Frames between simulated steps; lower is faster
    pub move_delay: u32,
    pub phase: GamePhase,
    pub playfield: Playfield,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, playfield: Playfield, move_delay: u32) -> Self {
        Self {
            snake,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            score: 0,
            tick_counter: 0,
            move_delay,
            phase: GamePhase::Menu,
            playfield,
        }
    }

    /// Check if a position is inside the playable interior
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        self.playfield.interior().contains(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Whether moving the head to `pos` is fatal. The current head is not
    /// considered, since `pos` is where the head is about to be.
    pub fn check_collision(&self, pos: Position) -> Option<CollisionType> {
        if !self.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }

        if self.snake.collides_with_body(pos) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    pub fn is_collision(&self, pos: Position) -> bool {
        self.check_collision(pos).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(snake: Snake) -> GameState {
        GameState::new(snake, Position::new(20, 5), Playfield::new(32, 16), 10)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_playfield_regions() {
        let field = Playfield::new(32, 16);
        assert_eq!(field.interior(), Bounds::new(0, 30, 0, 14));
        assert_eq!(field.food_region(), Bounds::new(1, 30, 1, 14));
        assert_eq!(field.center(), Position::new(16, 8));
        assert_eq!(field.food_region().area(), 30 * 14);
    }

    #[test]
    fn test_bounds_cells() {
        let bounds = Bounds::new(1, 3, 1, 2);
        let cells: Vec<_> = bounds.cells().collect();
        assert_eq!(cells.len(), bounds.area());
        assert_eq!(cells[0], Position::new(1, 1));
        assert_eq!(cells[5], Position::new(3, 2));
        assert!(cells.iter().all(|c| bounds.contains(*c)));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(16, 8), Direction::Right, 3, 128);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.capacity(), 128);
        assert_eq!(
            snake.body(),
            &[
                Position::new(16, 8),
                Position::new(15, 8),
                Position::new(14, 8)
            ]
        );
        assert_eq!(snake.tail(), Position::new(14, 8));
    }

    #[test]
    fn test_snake_advance_keeps_segments_adjacent() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 4, 16);
        snake.advance(Position::new(5, 6));

        assert_eq!(
            snake.body(),
            &[
                Position::new(5, 6),
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5)
            ]
        );
    }

    #[test]
    fn test_grow_then_advance_keeps_old_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, 16);
        let old_tail = snake.tail();

        assert!(snake.grow());
        snake.advance(Position::new(6, 5));

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), old_tail);
    }

    #[test]
    fn test_grow_is_capped() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, 3);
        assert!(!snake.grow());
        assert_eq!(snake.len(), 3);

        snake.advance(Position::new(6, 5));
        assert_eq!(snake.len(), 3);
        assert!(!snake.occupies(Position::new(3, 5)));
    }

    #[test]
    fn test_reset_reuses_arena() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, 8);
        for _ in 0..5 {
            snake.grow();
        }
        snake.reset(Position::new(2, 2), Direction::Down, 2);

        assert_eq!(snake.capacity(), 8);
        assert_eq!(snake.body(), &[Position::new(2, 2), Position::new(2, 1)]);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3, 16);
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
    }

    #[test]
    fn test_check_collision_classifies() {
        let state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 3, 16));

        assert_eq!(
            state.check_collision(Position::new(31, 5)),
            Some(CollisionType::Wall)
        );
        assert_eq!(
            state.check_collision(Position::new(4, 5)),
            Some(CollisionType::SelfCollision)
        );
        assert_eq!(state.check_collision(Position::new(5, 5)), None);
        assert_eq!(state.check_collision(Position::new(6, 5)), None);
    }

    #[test]
    fn test_collision_over_whole_grid() {
        let state = state_with(Snake::new(Position::new(10, 3), Direction::Right, 6, 16));
        let interior = state.playfield.interior();

        for y in -2..=17 {
            for x in -2..=33 {
                let pos = Position::new(x, y);
                let expected = !interior.contains(pos) || state.snake.body_segments().contains(&pos);
                assert_eq!(state.is_collision(pos), expected, "at {:?}", pos);
            }
        }
    }
}
