//! Minesweeper board engine: seeded mine placement, dig/flag rules with cascading reveal, and the
//! integer cell encoding that renderers and agents read the board through.

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod render;
mod tile;
mod types;

/// Standard difficulty tiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    /// 16x30 with 99 mines. Logs recorded against the older 24x24 expert board do not replay here.
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 3] = [Self::Beginner, Self::Intermediate, Self::Expert];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::new_unchecked((8, 8), 10),
            Self::Intermediate => GameConfig::new_unchecked((16, 16), 40),
            Self::Expert => GameConfig::new_unchecked((16, 30), 99),
        }
    }
}

/// Board shape and mine count. Only [`GameConfig::new`] and the presets build one, so every
/// config in circulation has a non-empty board and at least one safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size.0.into(), raw.size.1.into(), raw.mines.into())
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(rows: usize, cols: usize, mines: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyBoard { rows, cols }.into());
        }
        let (Ok(size_rows), Ok(size_cols)) = (Coord::try_from(rows), Coord::try_from(cols)) else {
            return Err(ConfigError::BoardTooLarge {
                rows,
                cols,
                max: Coord::MAX,
            }
            .into());
        };
        let cells = mult(size_rows, size_cols);
        if mines >= usize::from(cells) {
            return Err(ConfigError::TooManyMines { mines, cells }.into());
        }
        // strictly below `cells`, which is itself a `CellCount`
        let mines = mines as CellCount;
        Ok(Self::new_unchecked((size_rows, size_cols), mines))
    }

    pub const fn preset(difficulty: Difficulty) -> Self {
        difficulty.config()
    }

    pub const fn beginner() -> Self {
        Difficulty::Beginner.config()
    }

    pub const fn intermediate() -> Self {
        Difficulty::Intermediate.config()
    }

    pub const fn expert() -> Self {
        Difficulty::Expert.config()
    }

    /// `(rows, cols)`
    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Fixed set of mined cells, stored as a boolean mask over the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Mask dimensions must come from a valid [`GameConfig`].
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        // a mask never holds more than `Coord::MAX * Coord::MAX` cells
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    /// Builds a layout with mines at exactly `mine_coords`; duplicates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let config = GameConfig::new(size.0.into(), size.1.into(), 0)?;
        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());

        for &(row, col) in mine_coords {
            if row >= size.0 || col >= size.1 {
                return Err(GameError::OutOfBounds { row, col });
            }
            mine_mask[(row, col).to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        if layout.mine_count >= config.total_cells() {
            return Err(ConfigError::TooManyMines {
                mines: layout.mine_count.into(),
                cells: config.total_cells(),
            }
            .into());
        }
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                col: coords.1,
            })
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.mine_mask.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mined cells in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors
        self.iter_neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkOutcome {
    Flagged,
    Unflagged,
    /// Target was already revealed, nothing changed.
    Rejected,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::Flagged | Self::Unflagged => true,
            Self::Rejected => false,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Survival {
    Survived,
    Died,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigOutcome {
    pub survival: Survival,
    pub status: GameStatus,
    /// Safe cells uncovered by this dig, cascade included.
    pub revealed: CellCount,
}

impl DigOutcome {
    pub const fn survived(&self) -> bool {
        matches!(self.survival, Survival::Survived)
    }
}
