//! Move logs: the ordered `{move_id, command, row, col}` history of one game, and its replay against a
//! board rebuilt from the same seed and difficulty.

use deepmine_core::{Board, Coord, Coord2, Difficulty, DigOutcome, GameError, MarkOutcome};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    /// Opens a game. Only valid as move 0.
    New,
    Dig,
    Flag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub move_id: u32,
    pub command: Command,
    pub row: Coord,
    pub col: Coord,
}

impl MoveRecord {
    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveLog {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub moves: Vec<MoveRecord>,
}

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error("Move log has no moves")]
    Empty,
    #[error("Expected move id {expected}, found {found}")]
    NonConsecutive { expected: u32, found: u32 },
    #[error("Move 0 must be `new`, found {0:?}")]
    MissingNew(Command),
    #[error("`new` is only allowed as move 0, found at move {0}")]
    UnexpectedNew(u32),
    #[error("Move {move_id} was rejected: {source}")]
    Rejected {
        move_id: u32,
        #[source]
        source: GameError,
    },
    #[error("Move ids are exhausted after move {0}")]
    MoveIdOverflow(u32),
    #[error("Malformed move log: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, ReplayError>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Dug(DigOutcome),
    Marked(MarkOutcome),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub record: MoveRecord,
    pub outcome: MoveOutcome,
}

/// Result of replaying a log: the final board and what each move did.
#[derive(Clone, Debug)]
pub struct Replay {
    pub board: Board,
    pub applied: Vec<AppliedMove>,
}

impl MoveLog {
    /// Starts a log whose only move is the opening `new`.
    pub fn new(seed: u64, difficulty: Difficulty) -> Self {
        Self {
            seed,
            difficulty,
            moves: vec![MoveRecord {
                move_id: 0,
                command: Command::New,
                row: 0,
                col: 0,
            }],
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let log: Self = serde_json::from_str(json)?;
        log.validate()?;
        Ok(log)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn next_move_id(&self) -> Result<u32> {
        match self.moves.last() {
            None => Ok(0),
            Some(last) => last
                .move_id
                .checked_add(1)
                .ok_or(ReplayError::MoveIdOverflow(last.move_id)),
        }
    }

    pub fn push_dig(&mut self, coords: Coord2) -> Result<&MoveRecord> {
        self.push(Command::Dig, coords)
    }

    pub fn push_flag(&mut self, coords: Coord2) -> Result<&MoveRecord> {
        self.push(Command::Flag, coords)
    }

    fn push(&mut self, command: Command, (row, col): Coord2) -> Result<&MoveRecord> {
        let move_id = self.next_move_id()?;
        self.moves.push(MoveRecord {
            move_id,
            command,
            row,
            col,
        });
        Ok(&self.moves[self.moves.len() - 1])
    }

    /// Checks that ids run `0, 1, 2, ...` and that `new` opens the log and appears nowhere else.
    pub fn validate(&self) -> Result<()> {
        let first = self.moves.first().ok_or(ReplayError::Empty)?;
        if first.command != Command::New {
            return Err(ReplayError::MissingNew(first.command));
        }

        for (expected, record) in (0u32..).zip(&self.moves) {
            if record.move_id != expected {
                return Err(ReplayError::NonConsecutive {
                    expected,
                    found: record.move_id,
                });
            }
            if expected > 0 && record.command == Command::New {
                return Err(ReplayError::UnexpectedNew(record.move_id));
            }
        }
        Ok(())
    }

    /// Fresh board for this log's game, before any move is applied.
    pub fn initial_board(&self) -> Board {
        Board::preset(self.difficulty, Some(self.seed))
    }

    /// Rebuilds the game and reissues every move in order.
    pub fn replay(&self) -> Result<Replay> {
        self.validate()?;

        let mut board = self.initial_board();
        let mut applied = Vec::with_capacity(self.moves.len().saturating_sub(1));
        for &record in &self.moves[1..] {
            let outcome = apply_move(&mut board, record)?;
            applied.push(AppliedMove { record, outcome });
        }

        log::debug!(
            "Replayed {} moves for seed {}, status {:?}",
            applied.len(),
            self.seed,
            board.status()
        );
        Ok(Replay { board, applied })
    }
}

/// Applies one dig or flag record to `board`.
pub fn apply_move(board: &mut Board, record: MoveRecord) -> Result<MoveOutcome> {
    let rejected = |source| ReplayError::Rejected {
        move_id: record.move_id,
        source,
    };
    match record.command {
        Command::Dig => board.dig(record.coords()).map(MoveOutcome::Dug).map_err(rejected),
        Command::Flag => board
            .toggle_flag(record.coords())
            .map(MoveOutcome::Marked)
            .map_err(rejected),
        Command::New => Err(ReplayError::UnexpectedNew(record.move_id)),
    }
}
