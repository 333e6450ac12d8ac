use std::path::PathBuf;

use crate::game::Move;

/// Errors reported by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(
        "invalid board: {rows} rows x {cols} columns with win length {win_length} \
         (rows and columns must be 4..=10, win length 2..=max(rows, columns))"
    )]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        win_length: usize,
    },

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("malformed grid: {0}")]
    MalformedGrid(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

impl From<EngineError> for ConfigError {
    fn from(err: EngineError) -> Self {
        ConfigError::Validation(err.to_string())
    }
}
