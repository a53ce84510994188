use ndarray::Array2;
use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// A single game: the mine layout plus what the player has uncovered so far.
///
/// Status is never stored; it is recomputed from the cells on every query.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    mine_layout: MineLayout,
    board: Array2<EngineCell>,
    seed: Option<u64>,
}

impl Board {
    /// Starts a game with mines drawn from `seed`, or from a fresh entropy seed when `None`.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(SeededMineSource::entropy_seed);
        let mut source = SeededMineSource::new(seed);
        let mut board = Self::from_layout(generate(config, &mut source));
        board.seed = Some(seed);
        log::debug!(
            "New {}x{} board with {} mines, seed {}",
            config.size().0,
            config.size().1,
            config.mines(),
            seed
        );
        board
    }

    pub fn with_dimensions(
        rows: usize,
        cols: usize,
        mines: usize,
        seed: Option<u64>,
    ) -> Result<Self> {
        Ok(Self::new(GameConfig::new(rows, cols, mines)?, seed))
    }

    pub fn preset(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self::new(difficulty.config(), seed)
    }

    /// Starts a game whose mines come from a caller supplied source.
    pub fn from_source(config: GameConfig, source: &mut impl MineSource) -> Self {
        Self::from_layout(generate(config, source))
    }

    pub fn from_layout(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            seed: None,
        }
    }

    /// Seed the mines were drawn from, if they were drawn from a seed at all.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn config(&self) -> GameConfig {
        self.mine_layout.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(|cell| cell == EngineCell::Flagged)
    }

    /// Mines minus flags; negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        (self.total_mines() as isize) - (self.flag_count() as isize)
    }

    /// Safe cells uncovered so far.
    pub fn revealed_count(&self) -> CellCount {
        self.count_cells(|cell| matches!(cell, EngineCell::Revealed(_) | EngineCell::Scorched))
    }

    /// Stored state at `coords`, or `None` off the board.
    pub fn get(&self, coords: Coord2) -> Option<EngineCell> {
        self.board.get(coords.to_nd_index()).copied()
    }

    /// Stored state at `coords`. Panics off the board; see [`Board::get`].
    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board[coords.to_nd_index()]
    }

    pub fn status(&self) -> GameStatus {
        if self.board.iter().any(|cell| cell.is_fatal()) {
            GameStatus::Lost
        } else if self.revealed_count() == self.mine_layout.safe_cell_count() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status().is_finished()
    }

    pub fn is_dead(&self) -> bool {
        self.status() == GameStatus::Lost
    }

    pub fn is_won(&self) -> bool {
        self.status() == GameStatus::Won
    }

    /// The cell that ended the game, for a lost game.
    pub fn fatal_cell(&self) -> Option<Coord2> {
        self.board
            .indexed_iter()
            .find(|(_, cell)| cell.is_fatal())
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    /// Display value at `coords`, mapping anything off the board to [`CellView::OutOfBounds`].
    pub fn view_at(&self, coords: SignedCoord2) -> CellView {
        match to_board_coords(coords, self.size()) {
            Some(pos) => self.cell_at(pos).view(),
            None => CellView::OutOfBounds,
        }
    }

    /// Views of the `(2 * radius + 1)^2` square around `center`, row by row.
    ///
    /// The window may extend past the `i32` range; those positions are out of bounds like any other.
    pub fn neighborhood_views(&self, center: SignedCoord2, radius: u8) -> Vec<CellView> {
        let (row, col) = (i64::from(center.0), i64::from(center.1));
        let side = 2 * usize::from(radius) + 1;
        let radius = i64::from(radius);

        let mut views = Vec::with_capacity(side * side);
        for r in (row - radius)..=(row + radius) {
            for c in (col - radius)..=(col + radius) {
                let view = match (i32::try_from(r), i32::try_from(c)) {
                    (Ok(r), Ok(c)) => self.view_at((r, c)),
                    _ => CellView::OutOfBounds,
                };
                views.push(view);
            }
        }
        views
    }

    /// Integer encoding of [`Board::neighborhood_views`].
    pub fn neighborhood(&self, center: SignedCoord2, radius: u8) -> Vec<i8> {
        self.neighborhood_views(center, radius)
            .into_iter()
            .map(CellView::code)
            .collect()
    }

    /// Integer encoding of every cell on the board.
    pub fn display(&self) -> Array2<i8> {
        self.board.map(|cell| cell.view().code())
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use EngineCell::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_in_progress()?;

        let cell = &mut self.board[coords.to_nd_index()];
        let outcome = match *cell {
            Hidden => {
                *cell = Flagged;
                MarkOutcome::Flagged
            }
            Flagged => {
                *cell = Hidden;
                MarkOutcome::Unflagged
            }
            Revealed(_) | Exploded | Scorched => {
                log::warn!("Ignoring flag on revealed cell at {:?}", coords);
                MarkOutcome::Rejected
            }
        };
        log::debug!("Flag at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Same as [`Board::toggle_flag`].
    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        self.toggle_flag(coords)
    }

    /// Digs at `coords`. Digging a mine or a cell that is already revealed loses the game.
    pub fn dig(&mut self, coords: Coord2) -> Result<DigOutcome> {
        use EngineCell::*;

        let coords = self.mine_layout.validate_coords(coords)?;
        self.check_in_progress()?;

        let (survival, revealed) = match self.cell_at(coords) {
            Revealed(_) | Exploded | Scorched => {
                self.board[coords.to_nd_index()] = Scorched;
                (Survival::Died, 0)
            }
            Hidden | Flagged if self.mine_layout[coords] => {
                self.board[coords.to_nd_index()] = Exploded;
                (Survival::Died, 0)
            }
            Hidden | Flagged => (Survival::Survived, self.reveal_from(coords)),
        };

        let outcome = DigOutcome {
            survival,
            status: self.status(),
            revealed,
        };
        log::debug!("Dig at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    /// Reveals a safe cell and, if it has no adjacent mines, floods outward through zero cells.
    ///
    /// Flagged cells reached by the flood are revealed too. Returns how many cells were revealed.
    fn reveal_from(&mut self, coords: Coord2) -> CellCount {
        let adjacent_mines = self.mine_layout.adjacent_mine_count(coords);
        self.board[coords.to_nd_index()] = EngineCell::Revealed(adjacent_mines);
        let mut revealed: CellCount = 1;

        if adjacent_mines != 0 {
            return revealed;
        }

        let mut visited = BTreeSet::from([coords]);
        let mut to_visit: VecDeque<_> = self.unrevealed_neighbors(coords).collect();
        log::trace!("Starting flood-fill from {:?}, initial neighbors: {:?}", coords, to_visit);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = self.cell_at(visit_coords);
            if !cell.is_unrevealed() {
                continue;
            }

            let visit_adjacent_mines = self.mine_layout.adjacent_mine_count(visit_coords);
            self.board[visit_coords.to_nd_index()] = EngineCell::Revealed(visit_adjacent_mines);
            revealed += 1;
            log::trace!(
                "Flood revealed {:?} (was {:?}), mine count: {}",
                visit_coords,
                cell,
                visit_adjacent_mines
            );

            if visit_adjacent_mines == 0 {
                let next: Vec<_> = self
                    .unrevealed_neighbors(visit_coords)
                    .filter(|pos| !visited.contains(pos))
                    .collect();
                to_visit.extend(next);
            }
        }

        revealed
    }

    fn unrevealed_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_layout
            .iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos).is_unrevealed())
    }

    fn count_cells(&self, pred: impl Fn(EngineCell) -> bool) -> CellCount {
        self.board.iter().filter(|&&cell| pred(cell)).count() as CellCount
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}
