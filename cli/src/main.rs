use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use deepmine_core::{Board, Difficulty, GameStatus, SeededMineSource, SignedCoord2};
use deepmine_protocol::{Command, MoveLog, MoveOutcome, apply_move};

/// Starts, extends and replays deterministic Minesweeper move logs.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[command(subcommand)]
    command: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Write a move log for a fresh game
    New {
        #[arg(short, long, value_enum, default_value_t = Level::Beginner)]
        difficulty: Level,
        /// Seed for mine placement, random when omitted
        #[arg(short, long)]
        seed: Option<u64>,
        /// Where to write the log, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Apply one dig or flag to a stored log and save it
    Play {
        log: PathBuf,
        #[arg(value_enum)]
        command: PlayCommand,
        row: u8,
        col: u8,
        #[arg(long)]
        emoji: bool,
    },
    /// Replay a stored log and print the resulting board
    Replay {
        log: PathBuf,
        #[arg(long)]
        emoji: bool,
        /// Also print the neighborhood encoding around `ROW,COL`
        #[arg(long, value_parser = parse_center, allow_hyphen_values = true)]
        at: Option<SignedCoord2>,
        #[arg(long, default_value_t = 2)]
        radius: u8,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Level {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Beginner => Difficulty::Beginner,
            Level::Intermediate => Difficulty::Intermediate,
            Level::Expert => Difficulty::Expert,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum PlayCommand {
    Dig,
    Flag,
}

fn parse_center(arg: &str) -> Result<SignedCoord2> {
    let Some((row, col)) = arg.split_once(',') else {
        bail!("expected ROW,COL, got {arg:?}");
    };
    Ok((row.trim().parse()?, col.trim().parse()?))
}

fn read_log(path: &Path) -> Result<MoveLog> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    MoveLog::from_json(&json).with_context(|| format!("parsing {}", path.display()))
}

fn write_log(log: &MoveLog, path: Option<&Path>) -> Result<()> {
    let json = log.to_json()?;
    match path {
        Some(path) => {
            fs::write(path, json + "\n").with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn print_board(board: &Board, emoji: bool) {
    match board.status() {
        GameStatus::Lost => println!("💥 KABOOM! 💥"),
        GameStatus::Won => println!("🎉 WE WIN! 🎉"),
        GameStatus::InProgress => {
            println!("Mines: {}", board.total_mines());
            println!("Flags: {}", board.flag_count());
        }
    }
    println!();
    if emoji {
        print!("{}", board.to_emoji());
    } else {
        print!("{board}");
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Action::New {
            difficulty,
            seed,
            output,
        } => {
            let seed = seed.unwrap_or_else(SeededMineSource::entropy_seed);
            let move_log = MoveLog::new(seed, difficulty.into());
            log::info!("Starting {:?} game with seed {}", move_log.difficulty, seed);
            write_log(&move_log, output.as_deref())
        }
        Action::Play {
            log: path,
            command,
            row,
            col,
            emoji,
        } => {
            let mut move_log = read_log(&path)?;
            let mut board = move_log.replay()?.board;
            let record = match command {
                PlayCommand::Dig => *move_log.push_dig((row, col))?,
                PlayCommand::Flag => *move_log.push_flag((row, col))?,
            };
            let outcome = apply_move(&mut board, record)
                .with_context(|| format!("applying {:?} at ({row}, {col})", record.command))?;
            match outcome {
                MoveOutcome::Dug(dug) if !dug.survived() => {
                    log::warn!("Move {} died", record.move_id)
                }
                MoveOutcome::Marked(mark) if !mark.has_update() => {
                    log::warn!("Move {} could not flag a revealed cell", record.move_id)
                }
                _ => log::info!("Move {}: {:?}", record.move_id, outcome),
            }
            write_log(&move_log, Some(&path))?;
            print_board(&board, emoji);
            Ok(())
        }
        Action::Replay {
            log: path,
            emoji,
            at,
            radius,
        } => {
            let replay = read_log(&path)?.replay()?;
            for applied in &replay.applied {
                let verb = match applied.record.command {
                    Command::Dig => "dig",
                    Command::Flag => "flag",
                    Command::New => "new",
                };
                log::info!(
                    "Move {}: {} at ({}, {}) -> {:?}",
                    applied.record.move_id,
                    verb,
                    applied.record.row,
                    applied.record.col,
                    applied.outcome
                );
            }
            print_board(&replay.board, emoji);
            if let Some(center) = at {
                let codes: Vec<String> = replay
                    .board
                    .neighborhood(center, radius)
                    .iter()
                    .map(i8::to_string)
                    .collect();
                println!();
                println!("{}", codes.join(","));
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    run(cli)
}
