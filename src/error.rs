use std::path::PathBuf;

/// Errors from placing a piece.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (board has {cols} columns)")]
    InvalidColumn { column: usize, cols: usize },
}

/// Errors raised when external board input breaks the board contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBoardError {
    #[error("invalid board dimensions {rows}x{cols}")]
    Dimensions { rows: usize, cols: usize },

    #[error("cell ({row}, {col}) has value {value}; expected -1, 0, 1 or null")]
    InvalidCellValue { row: usize, col: usize, value: i64 },

    #[error("column {column} has {found} cells, expected {expected}")]
    ColumnLength {
        column: usize,
        expected: usize,
        found: usize,
    },

    #[error("coordinate ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds {
        row: i64,
        col: i64,
        rows: usize,
        cols: usize,
    },

    #[error("piece at ({row}, {col}) has no support beneath it")]
    Unsupported { row: usize, col: usize },
}

/// Errors that can occur during a statistics search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("move failed during search: {0}")]
    Move(#[from] MoveError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
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
