use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{AppError, ConfigError};
use crate::input::Direction;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 160;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Scores at which the snake speeds up.
pub const DEFAULT_SPEED_THRESHOLDS: [u32; 8] = [10, 20, 30, 40, 50, 70, 100, 150];

/// Number of food items kept on the board.
pub const DEFAULT_FOOD_POOL_SIZE: usize = 10;

/// Random draws before the hardened spawner falls back to scanning free cells.
pub const DEFAULT_SPAWN_RETRY_LIMIT: u32 = 64;

/// Terminal columns per grid cell; cells are drawn two glyphs wide so they look square.
pub const CELL_WIDTH: u16 = 2;

/// Terminal rows per grid cell.
pub const CELL_HEIGHT: u16 = 1;

/// Rows reserved below the play area for the HUD.
pub const HUD_HEIGHT: u16 = 2;

/// Filled cell glyph for body segments.
pub const GLYPH_SNAKE_BODY: &str = "██";

/// Tail segment glyph.
pub const GLYPH_SNAKE_TAIL: &str = "▓▓";

/// Head glyphs by facing direction.
pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀█";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "█▶";

/// Food glyph.
pub const GLYPH_FOOD: &str = "()";

/// How replacement food picks its cell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpawnPolicy {
    /// Uniform over the grid with no overlap checks.
    Legacy,
    /// Never lands on the snake or on existing food.
    #[default]
    Hardened,
}

/// Tunable session parameters.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub base_tick_interval_ms: u64,
    pub min_tick_interval_ms: u64,
    pub speed_thresholds: Vec<u32>,
    pub food_pool_size: usize,
    pub spawn_policy: SpawnPolicy,
    pub spawn_retry_limit: u32,
    pub initial_heading: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            min_tick_interval_ms: MIN_TICK_INTERVAL_MS,
            speed_thresholds: DEFAULT_SPEED_THRESHOLDS.to_vec(),
            food_pool_size: DEFAULT_FOOD_POOL_SIZE,
            spawn_policy: SpawnPolicy::default(),
            spawn_retry_limit: DEFAULT_SPAWN_RETRY_LIMIT,
            initial_heading: Direction::Right,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(raw: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&raw)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_tick_interval_ms == 0 {
            return Err(ConfigError::ZeroBaseInterval);
        }

        if self.min_tick_interval_ms == 0 || self.min_tick_interval_ms > self.base_tick_interval_ms
        {
            return Err(ConfigError::InvalidMinInterval {
                min_ms: self.min_tick_interval_ms,
                base_ms: self.base_tick_interval_ms,
            });
        }

        let mut previous = 0;
        for &threshold in &self.speed_thresholds {
            if threshold <= previous {
                return Err(ConfigError::UnorderedThresholds(threshold));
            }
            previous = threshold;
        }

        if self.food_pool_size == 0 {
            return Err(ConfigError::EmptyFoodPool);
        }

        if self.spawn_retry_limit == 0 {
            return Err(ConfigError::ZeroRetryLimit);
        }

        Ok(())
    }

    #[must_use]
    pub fn base_tick_interval(&self) -> Duration {
        Duration::from_millis(self.base_tick_interval_ms)
    }

    #[must_use]
    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::error::{AppError, ConfigError};
    use crate::input::Direction;

    use super::{DEFAULT_FOOD_POOL_SIZE, DEFAULT_TICK_INTERVAL_MS, GameConfig, SpawnPolicy};

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();

        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.base_tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
        assert_eq!(config.food_pool_size, DEFAULT_FOOD_POOL_SIZE);
        assert_eq!(config.spawn_policy, SpawnPolicy::Hardened);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = GameConfig::from_json_str(
            r#"{ "food_pool_size": 3, "spawn_policy": "legacy", "initial_heading": "down" }"#,
        )
        .expect("partial config should parse");

        assert_eq!(config.food_pool_size, 3);
        assert_eq!(config.spawn_policy, SpawnPolicy::Legacy);
        assert_eq!(config.initial_heading, Direction::Down);
        assert_eq!(config.base_tick_interval_ms, DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = GameConfig::from_json_str("not-json");
        assert!(matches!(result, Err(AppError::ConfigParse(_))));
    }

    #[test]
    fn missing_file_is_a_read_error_naming_the_path() {
        let path = Path::new("/nonexistent/grid-snake-config.json");

        let result = GameConfig::load(path);

        match result {
            Err(AppError::ConfigRead { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a config read error, got {other:?}"),
        }
    }

    #[test]
    fn unordered_thresholds_are_rejected() {
        let config = GameConfig {
            speed_thresholds: vec![10, 30, 20],
            ..GameConfig::default()
        };

        assert_eq!(config.validate(), Err(ConfigError::UnorderedThresholds(20)));
    }

    #[test]
    fn min_interval_above_base_is_rejected() {
        let config = GameConfig {
            base_tick_interval_ms: 50,
            min_tick_interval_ms: 80,
            ..GameConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidMinInterval {
                min_ms: 80,
                base_ms: 50
            })
        );
    }

    #[test]
    fn invalid_values_surface_through_json_loading() {
        let result = GameConfig::from_json_str(r#"{ "food_pool_size": 0 }"#);
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::EmptyFoodPool))
        ));
    }
}
