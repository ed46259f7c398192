//! Core game logic module for Snake
//!
//! Everything here is free of terminal I/O. The simulation is driven by
//! whatever owns it: the interactive front end, or a test calling `tick()`.

pub mod apple;
pub mod config;
pub mod direction;
pub mod scheduler;
pub mod simulation;
pub mod snake;
pub mod state;

// Re-export commonly used types
pub use apple::Apple;
pub use config::{ConfigError, GameConfig};
pub use direction::Direction;
pub use scheduler::{IntervalTicker, ManualScheduler, TickScheduler};
pub use simulation::GameSimulation;
pub use snake::{SnakeBody, INITIAL_SNAKE_LENGTH};
pub use state::{GameOverReason, GameView, Phase, Position, TickOutcome};
