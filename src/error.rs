use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected configuration values.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: u16, cols: u16 },
    #[error("cell size must be non-zero")]
    ZeroCellSize,
    #[error("base tick interval must be positive")]
    ZeroBaseInterval,
    #[error("minimum tick interval {min_ms}ms must be within 1ms..={base_ms}ms")]
    InvalidMinInterval { min_ms: u64, base_ms: u64 },
    #[error("speed thresholds must be strictly ascending and non-zero (offending value {0})")]
    UnorderedThresholds(u32),
    #[error("food pool size must be at least 1")]
    EmptyFoodPool,
    #[error("spawn retry limit must be at least 1")]
    ZeroRetryLimit,
}

/// Failures surfaced by the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not read config file {}: {source}", path.display())]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("config file is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not install log subscriber: {0}")]
    Logging(String),
}
