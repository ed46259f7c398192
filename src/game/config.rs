use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Position;

/// Smallest board that fits the starting snake with its head on the center cell
pub const MIN_BOARD_SIZE: usize = 4;
pub const MAX_BOARD_SIZE: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("board size {0} is outside {min}..={max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
    InvalidBoardSize(usize),

    #[error("tick interval must be at least 1ms")]
    InvalidTickInterval,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square board, in cells
    pub board_size: usize,
    /// Time between simulation ticks
    pub tick_interval_ms: u64,
    /// Seed for apple placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: 20,
            tick_interval_ms: 100,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn with_tick_interval_ms(mut self, tick_interval_ms: u64) -> Self {
        self.tick_interval_ms = tick_interval_ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a JSON config file. Missing fields fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::InvalidBoardSize(self.board_size));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidTickInterval);
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Head cell at the start of every run: the board center
    pub fn start_position(&self) -> Position {
        let center = (self.board_size / 2) as i32;
        Position::new(center, center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.board_size, 20);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15).with_tick_interval_ms(140).with_seed(3);
        assert_eq!(config.board_size, 15);
        assert_eq!(config.tick_interval_ms, 140);
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_start_position_is_center() {
        assert_eq!(GameConfig::default().start_position(), Position::new(10, 10));
        assert_eq!(GameConfig::new(MIN_BOARD_SIZE).start_position(), Position::new(2, 2));
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            GameConfig::new(3).validate(),
            Err(ConfigError::InvalidBoardSize(3))
        ));
        assert!(matches!(
            GameConfig::new(MAX_BOARD_SIZE + 1).validate(),
            Err(ConfigError::InvalidBoardSize(_))
        ));
        assert!(matches!(
            GameConfig::default().with_tick_interval_ms(0).validate(),
            Err(ConfigError::InvalidTickInterval)
        ));
        assert!(GameConfig::new(MIN_BOARD_SIZE).validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tick_interval_ms": 140 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.tick_interval_ms, 140);
        assert_eq!(config.board_size, 20);
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board_size": 2 }}"#).unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBoardSize(2)));
    }

    #[test]
    fn test_from_file_errors() {
        let missing = GameConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let bad = GameConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(bad, ConfigError::Parse { .. }));
    }
}
