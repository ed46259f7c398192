use std::fmt;

use super::direction::Direction;

/// A cell on the game board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
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

    /// True if the position lies on a `size` x `size` board
    pub fn is_within(&self, size: usize) -> bool {
        let size = size as i64;
        let (x, y) = (self.x as i64, self.y as i64);
        x >= 0 && y >= 0 && x < size && y < size
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where the simulation is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    NotStarted,
    Running,
    Paused,
    Over,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOverReason {
    /// The head moved onto a cell the body already occupied
    SelfCollision,
    /// The head left the board
    OutOfBounds,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::SelfCollision => f.write_str("the snake bit itself"),
            GameOverReason::OutOfBounds => f.write_str("the snake hit the wall"),
        }
    }
}

/// Result of a single tick, used by the front end as its redraw notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running (paused, over or never started); nothing changed
    Skipped,
    Moved,
    AteApple { score: u32 },
    GameOver(GameOverReason),
}

impl TickOutcome {
    pub fn changed_state(&self) -> bool {
        !matches!(self, TickOutcome::Skipped)
    }
}

/// Read-only snapshot of everything a renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct GameView {
    /// Body positions, head first
    pub snake: Vec<Position>,
    pub apple: Position,
    pub score: u32,
    pub phase: Phase,
    pub over_reason: Option<GameOverReason>,
    pub board_size: usize,
}

impl GameView {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}
