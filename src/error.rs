use std::path::PathBuf;

use crate::{board::Marker, scanner::Variant, WIDTH};

/// Event name logged when the computer's chosen column is rejected and a random
/// open column is played instead.
pub const SEARCH_FALLBACK: &str = "SearchFallbackTriggered";

/// Reasons a piece cannot be dropped into a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} out of range, columns must be between 0 and {}", WIDTH - 1)]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Errors raised by the search engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no open column to play")]
    NoOpenColumn,
}

/// Errors raised while driving a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("invalid move: {0}")]
    Move(#[from] MoveError),

    #[error("the game is over, reset it to play again")]
    GameOver,

    #[error("{marker:?} cannot be played in {variant}")]
    WrongMarker { marker: Marker, variant: Variant },

    #[error("search failed: {0}")]
    Search(#[from] SearchError),
}

/// Errors raised while storing finished games.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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
