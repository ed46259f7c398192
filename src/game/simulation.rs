use tracing::{debug, info};

use super::{
    apple::Apple,
    config::{ConfigError, GameConfig},
    direction::Direction,
    scheduler::TickScheduler,
    snake::SnakeBody,
    state::{GameOverReason, GameView, Phase, Position, TickOutcome},
};

/// The tick-driven game state machine.
///
/// Owns the snake, the apple and the tick scheduler. Every mutating call
/// (`init`, `tick`, `request_direction_change`, `pause_or_resume`) takes
/// `&mut self`, so a driver holding the simulation on one task serializes
/// them for free.
pub struct GameSimulation<S: TickScheduler> {
    config: GameConfig,
    snake: SnakeBody,
    apple: Apple,
    score: u32,
    phase: Phase,
    direction_changed_this_tick: bool,
    over_reason: Option<GameOverReason>,
    scheduler: S,
}

impl<S: TickScheduler> GameSimulation<S> {
    /// Create a simulation that has not started yet. Call `init` to begin a run.
    pub fn new(config: GameConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let apple = match config.seed {
            Some(seed) => Apple::seeded(seed),
            None => Apple::from_entropy(),
        };
        let snake = SnakeBody::new(config.start_position());

        let mut simulation = Self {
            config,
            snake,
            apple,
            score: 0,
            phase: Phase::NotStarted,
            direction_changed_this_tick: false,
            over_reason: None,
            scheduler,
        };
        simulation.relocate_apple();

        Ok(simulation)
    }

    /// Start a new run. Ignored (returns `false`) while a run is in progress.
    pub fn init(&mut self) -> bool {
        if self.phase == Phase::Running {
            debug!("init ignored, a run is already in progress");
            return false;
        }

        let start = self.config.start_position();
        self.score = 0;
        self.snake.initialize(start.x, start.y);
        self.relocate_apple();
        self.phase = Phase::Running;
        self.direction_changed_this_tick = false;
        self.over_reason = None;

        self.scheduler.cancel();
        self.scheduler.schedule(self.config.tick_interval());

        info!(
            board_size = self.config.board_size,
            tick_ms = self.config.tick_interval_ms,
            apple = %self.apple.position(),
            "run started"
        );
        true
    }

    /// Advance the game by one step
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Skipped;
        }

        self.direction_changed_this_tick = false;

        if !self.snake.advance() {
            return self.end_game(GameOverReason::SelfCollision);
        }

        if !self.snake.head().is_within(self.config.board_size) {
            return self.end_game(GameOverReason::OutOfBounds);
        }

        if self.snake.head() == self.apple.position() {
            self.score += 1;
            self.snake.grow();
            self.relocate_apple();
            debug!(score = self.score, apple = %self.apple.position(), "apple eaten");
            return TickOutcome::AteApple { score: self.score };
        }

        TickOutcome::Moved
    }

    /// Ask the snake to turn. At most one turn is committed between two ticks.
    pub fn request_direction_change(&mut self, direction: Direction) -> bool {
        if self.direction_changed_this_tick {
            return false;
        }

        let changed = self.snake.change_direction(direction);
        if changed {
            self.direction_changed_this_tick = true;
        }
        changed
    }

    /// Toggle between running and paused; returns the resulting phase
    pub fn pause_or_resume(&mut self) -> Phase {
        match self.phase {
            Phase::Running => {
                self.scheduler.cancel();
                self.phase = Phase::Paused;
                info!(score = self.score, "paused");
            }
            Phase::Paused => {
                self.scheduler.schedule(self.config.tick_interval());
                self.phase = Phase::Running;
                info!(score = self.score, "resumed");
            }
            Phase::NotStarted | Phase::Over => {}
        }
        self.phase
    }

    fn end_game(&mut self, reason: GameOverReason) -> TickOutcome {
        self.phase = Phase::Over;
        self.over_reason = Some(reason);
        self.scheduler.cancel();

        info!(score = self.score, length = self.snake.len(), ?reason, "game over");
        TickOutcome::GameOver(reason)
    }

    fn relocate_apple(&mut self) {
        let snake = &self.snake;
        self.apple.relocate(self.config.board_size, |p| snake.occupies(p));
    }

    pub fn apple(&self) -> Position {
        self.apple.position()
    }

    /// Copy of the body cells, head first
    pub fn snake_positions(&self) -> Vec<Position> {
        self.snake.positions().collect()
    }

    pub fn snake(&self) -> &SnakeBody {
        &self.snake
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a run is in progress, paused or not
    pub fn is_in_game(&self) -> bool {
        matches!(self.phase, Phase::Running | Phase::Paused)
    }

    pub fn over_reason(&self) -> Option<GameOverReason> {
        self.over_reason
    }

    pub fn board_size(&self) -> usize {
        self.config.board_size
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn view(&self) -> GameView {
        GameView {
            snake: self.snake_positions(),
            apple: self.apple(),
            score: self.score,
            phase: self.phase,
            over_reason: self.over_reason,
            board_size: self.config.board_size,
        }
    }

    /// Move the apple to a known cell, for scripted scenarios
    pub fn place_apple(&mut self, position: Position) {
        self.apple.place_at(position);
    }

    #[cfg(test)]
    pub(crate) fn replace_snake(&mut self, snake: SnakeBody) {
        self.snake = snake;
    }
}
