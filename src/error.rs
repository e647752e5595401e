//! Error types for puzzle ingestion and configuration.
//!
//! Searches themselves never fail: an unsolved search is reported through
//! [`crate::search::Outcome`]. Everything here is raised before a search
//! begins.

use thiserror::Error;

/// A puzzle definition that cannot be searched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("a {height}x{width} board cannot hold {cells} cells")]
    DimensionMismatch {
        height: usize,
        width: usize,
        cells: usize,
    },

    #[error("a {height}x{width} board has no interior; both sides must be at least 3")]
    TooSmall { height: usize, width: usize },

    #[error("border cell ({row}, {col}) holds {value}; the border may only hold walls and goals")]
    OpenBorder { row: usize, col: usize, value: i32 },

    #[error("board has no master brick (2)")]
    MissingMaster,

    #[error("board has no goal cell (-1)")]
    MissingGoal,

    #[error("invalid cell value {value} at ({row}, {col})")]
    InvalidCell { row: usize, col: usize, value: i32 },

    #[error("line {line}: cannot parse {token:?} as a cell value")]
    Parse { line: usize, token: String },

    #[error("expected {expected} values, found {found}")]
    Truncated { expected: usize, found: usize },
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
