use std::collections::VecDeque;

use super::direction::Direction;
use super::state::Position;

/// Number of segments the snake starts every run with
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// The snake: an ordered run of cells, head at the front.
///
/// The body never holds the same cell twice. `advance` refuses any move whose
/// new head lands on an occupied cell, including the tail cell that the move
/// would have vacated.
#[derive(Debug, Clone, PartialEq)]
pub struct SnakeBody {
    body: VecDeque<Position>,
    direction: Direction,
    /// Segments still owed from `grow`, paid out one per `advance`
    pending_growth: usize,
}

impl SnakeBody {
    /// Create a snake with its head at `head`, laid out to the left, facing right
    pub fn new(head: Position) -> Self {
        let mut snake = Self {
            body: VecDeque::with_capacity(INITIAL_SNAKE_LENGTH),
            direction: Direction::Right,
            pending_growth: 0,
        };
        snake.initialize(head.x, head.y);
        snake
    }

    /// Reset to the start-of-run layout: `(x, y), (x-1, y), (x-2, y)` facing right
    pub fn initialize(&mut self, head_x: i32, head_y: i32) {
        self.body.clear();
        for i in 0..INITIAL_SNAKE_LENGTH as i32 {
            self.body.push_back(Position::new(head_x - i, head_y));
        }
        self.direction = Direction::Right;
        self.pending_growth = 0;
    }

    /// Commit a new heading. Same-direction and 180-degree requests are rejected.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if requested == self.direction || self.direction.is_opposite(requested) {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Move one cell forward. Returns `false`, leaving the body untouched, if the
    /// new head would overlap the body.
    pub fn advance(&mut self) -> bool {
        let candidate = self.head().moved_in_direction(self.direction);

        if self.occupies(candidate) {
            return false;
        }

        if self.pending_growth > 0 {
            self.pending_growth -= 1;
        } else {
            self.body.pop_back();
        }
        self.body.push_front(candidate);

        true
    }

    /// Lengthen the snake by one; the extra segment appears on the next `advance`
    pub fn grow(&mut self) {
        self.pending_growth += 1;
    }

    pub fn head(&self) -> Position {
        // The body is never shorter than INITIAL_SNAKE_LENGTH.
        self.body[0]
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Check if any segment sits on `point`
    pub fn occupies(&self, point: Position) -> bool {
        self.body.contains(&point)
    }

    /// Body cells from head to tail
    pub fn positions(&self) -> impl ExactSizeIterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Number of visible segments
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn pending_growth(&self) -> usize {
        self.pending_growth
    }

    #[cfg(test)]
    pub(crate) fn from_segments(segments: &[Position], direction: Direction) -> Self {
        Self {
            body: segments.iter().copied().collect(),
            direction,
            pending_growth: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_duplicates(snake: &SnakeBody) -> bool {
        let cells: Vec<_> = snake.positions().collect();
        cells
            .iter()
            .enumerate()
            .any(|(i, a)| cells[i + 1..].contains(a))
    }

    #[test]
    fn test_snake_creation() {
        let snake = SnakeBody::new(Position::new(5, 5));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(
            snake.positions().collect::<Vec<_>>(),
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
    }

    #[test]
    fn test_initialize_resets_everything() {
        let mut snake = SnakeBody::new(Position::new(5, 5));
        snake.change_direction(Direction::Down);
        snake.grow();
        snake.advance();
        snake.advance();

        snake.initialize(10, 10);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(10, 10));
        assert_eq!(snake.tail(), Position::new(8, 10));
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.pending_growth(), 0);
    }

    #[test]
    fn test_change_direction_rules() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut snake = SnakeBody::from_segments(
                    &[Position::new(5, 5), Position::new(5, 6), Position::new(5, 7)],
                    current,
                );
                let expected = requested != current && !current.is_opposite(requested);

                assert_eq!(snake.change_direction(requested), expected);
                let now = if expected { requested } else { current };
                assert_eq!(snake.direction(), now);
            }
        }
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = SnakeBody::new(Position::new(5, 5));

        assert!(snake.advance());
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.change_direction(Direction::Down);
        assert!(snake.advance());
        assert_eq!(snake.head(), Position::new(6, 6));
        assert!(!has_duplicates(&snake));
    }

    #[test]
    fn test_growth_applies_on_next_advance() {
        let mut snake = SnakeBody::new(Position::new(5, 5));

        snake.grow();
        assert_eq!(snake.len(), 3);
        assert!(!snake.occupies(Position::new(-1, -1)));

        assert!(snake.advance());
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(3, 5));

        assert!(snake.advance());
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_self_collision_leaves_body_unchanged() {
        // Head at (5,5) moving down into (5,6), which the body already holds.
        let mut snake = SnakeBody::from_segments(
            &[
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
                Position::new(4, 6),
            ],
            Direction::Down,
        );
        let before: Vec<_> = snake.positions().collect();

        assert!(!snake.advance());
        assert_eq!(snake.positions().collect::<Vec<_>>(), before);
    }

    #[test]
    fn test_moving_into_current_tail_is_a_collision() {
        // Square loop: the next head is the tail cell that would be vacated.
        let mut snake = SnakeBody::from_segments(
            &[
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Down,
        );

        assert!(!snake.advance());
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_occupies() {
        let snake = SnakeBody::new(Position::new(5, 5));
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(4, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(2, 5)));
        assert!(!snake.occupies(Position::new(10, 10)));
    }

    #[test]
    fn test_positions_is_a_snapshot() {
        let mut snake = SnakeBody::new(Position::new(5, 5));
        let before: Vec<_> = snake.positions().collect();
        snake.advance();
        let after: Vec<_> = snake.positions().collect();

        assert_eq!(before[0], Position::new(5, 5));
        assert_eq!(after[0], Position::new(6, 5));
    }
}
