use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("board dimensions {rows}x{cols} exceed the {max}x{max} limit")]
    BoardTooLarge { rows: usize, cols: usize, max: Coord },
    #[error("{mines} mines do not fit in {cells} cells, at least one cell must stay safe")]
    TooManyMines { mines: usize, cells: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Game already over, no new moves are accepted")]
    GameAlreadyOver,
}

pub type Result<T> = core::result::Result<T, GameError>;
