use thiserror::Error;

/// Setup-time rejection of a game configuration that could never be played out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board needs at least one row and one column")]
    EmptyBoard,
    #[error("{mines} mines do not fit a {rows}x{cols} board (at most {max})")]
    TooManyMines {
        rows: usize,
        cols: usize,
        mines: usize,
        max: usize,
    },
    #[error("Cell ({row}, {col}) is outside the board")]
    InvalidCoords { row: usize, col: usize },
    #[error("Mine at ({row}, {col}) listed twice")]
    DuplicateMine { row: usize, col: usize },
    #[error("Invalid snake layout: {0}")]
    InvalidSnake(&'static str),
}

pub type Result<T> = core::result::Result<T, ConfigError>;

/// Failure to read a settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}
