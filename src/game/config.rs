use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::state::{Bounds, Playfield};

/// Reasons a configuration cannot drive a game
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("playfield {width}x{height} is smaller than the 4x4 minimum")]
    PlayfieldTooSmall { width: i32, height: i32 },
    #[error("initial snake length must be at least 1")]
    EmptySnake,
    #[error("initial snake length {length} exceeds the maximum of {max}")]
    SnakeTooLong { length: usize, max: usize },
    #[error("initial snake of length {length} does not fit left of the playfield center")]
    SnakeDoesNotFit { length: usize },
    #[error("minimum move delay must be at least 1 frame")]
    ZeroMoveDelay,
    #[error("initial move delay {initial} is below the minimum of {min}")]
    MoveDelayBelowMinimum { initial: u32, min: u32 },
    #[error("food spawning needs at least one attempt")]
    NoSpawnAttempts,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid the snake moves on, border cells included
    pub playfield: Playfield,
    /// Capacity of the snake arena; growth beyond it is dropped
    pub max_snake_length: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Frames between simulated steps at the start of a game
    pub initial_move_delay: u32,
    /// Fastest speed the game ramps up to
    pub min_move_delay: u32,
    /// Score added per food eaten
    pub food_score: u32,
    /// Random draws before food placement gives up
    pub spawn_attempts: u32,
    /// Cells kept free of food because the score is drawn over them
    pub score_band: Bounds,
    /// Length of one frame
    pub frame_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield: Playfield::new(32, 16),
            max_snake_length: 128,
            initial_snake_length: 3,
            initial_move_delay: 10,
            min_move_delay: 3,
            food_score: 10,
            spawn_attempts: 100,
            score_band: Bounds::new(1, 3, 1, 1),
            frame_delay_ms: 16,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            playfield: Playfield::new(width, height),
            ..Default::default()
        }
    }

    /// Load a JSON configuration; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse config file")?;
        config.validate().context("Invalid configuration")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Playfield { width, height } = self.playfield;
        if width < 4 || height < 4 {
            return Err(ConfigError::PlayfieldTooSmall { width, height });
        }

        let length = self.initial_snake_length;
        if length == 0 {
            return Err(ConfigError::EmptySnake);
        }
        if length > self.max_snake_length {
            return Err(ConfigError::SnakeTooLong {
                length,
                max: self.max_snake_length,
            });
        }
        // The tail trails left of the center and must stay inside the interior
        if length as i32 > self.playfield.center().x + 1 {
            return Err(ConfigError::SnakeDoesNotFit { length });
        }

        if self.min_move_delay == 0 {
            return Err(ConfigError::ZeroMoveDelay);
        }
        if self.initial_move_delay < self.min_move_delay {
            return Err(ConfigError::MoveDelayBelowMinimum {
                initial: self.initial_move_delay,
                min: self.min_move_delay,
            });
        }

        if self.spawn_attempts == 0 {
            return Err(ConfigError::NoSpawnAttempts);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.playfield, Playfield::new(32, 16));
        assert_eq!(config.max_snake_length, 128);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.initial_move_delay, 10);
        assert_eq!(config.min_move_delay, 3);
        assert_eq!(config.food_score, 10);
        assert_eq!(config.spawn_attempts, 100);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(20, 12);
        assert_eq!(config.playfield.width, 20);
        assert_eq!(config.playfield.height, 12);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validation_errors() {
        assert_eq!(
            GameConfig::new(3, 16).validate(),
            Err(ConfigError::PlayfieldTooSmall {
                width: 3,
                height: 16
            })
        );

        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySnake));

        let config = GameConfig {
            max_snake_length: 2,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeTooLong { length: 3, max: 2 })
        );

        let config = GameConfig {
            initial_snake_length: 18,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeDoesNotFit { length: 18 })
        );

        let config = GameConfig {
            min_move_delay: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMoveDelay));

        let config = GameConfig {
            initial_move_delay: 2,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MoveDelayBelowMinimum { initial: 2, min: 3 })
        );

        let config = GameConfig {
            spawn_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSpawnAttempts));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "initial_move_delay": 6, "food_score": 5 }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.initial_move_delay, 6);
        assert_eq!(config.food_score, 5);
        assert_eq!(config.playfield, Playfield::new(32, 16));
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "min_move_delay": 0 }}"#).unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());

        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(GameConfig::from_file(file.path()).is_err());
    }
}
