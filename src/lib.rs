//! snake2d - classic Snake in the terminal
//!
//! This library provides:
//! - Core game simulation (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive event loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
