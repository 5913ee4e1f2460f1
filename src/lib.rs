//! A computer opponent for the connection games 'Connect 4' and 'TOOT-OTTO'
//!
//! Both games are played on the same gravity board. The computer player uses a
//! fixed-depth minimax search with alpha-beta pruning over a cubed "chain
//! strength" evaluation of every 4-cell line on the board.
//!
//! # Basic Usage
//!
//! ```
//! use connect_toot_ai::{Board, Player, SearchConfig, SearchEngine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // player one has three discs along the bottom row and is to move
//! let board = Board::from_moves("112233")?;
//!
//! let mut engine = SearchEngine::seeded(SearchConfig::default(), 7);
//! let choice = engine.choose_move(&board, Player::One)?;
//!
//! assert_eq!(choice.column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod scanner;

pub mod evaluator;

pub mod search;

pub mod game;

pub mod record;

pub mod config;


pub use board::{Board, Cell, Letter, Marker, Player};
pub use config::{AppConfig, Overrides};
pub use error::{ConfigError, GameError, MoveError, RecordError, SearchError};
pub use evaluator::{evaluate, Evaluation};
pub use game::{ComputerPlayer, Game, MoveReport, Placement};
pub use record::{GameRecord, MemoryRecordStore, NdjsonRecordStore, RecordSink};
pub use scanner::{scan_from, scan_lines, Direction, Outcome, Variant, Window};
pub use search::{Difficulty, MoveChoice, SearchConfig, SearchEngine};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles on the board, and so the maximum number of moves in a game
pub const CELLS: usize = WIDTH * HEIGHT;

/// The length of a winning line
pub const WINDOW: usize = 4;

// a winning line has to fit on the board in every scan direction
const_assert!(WINDOW <= WIDTH);
const_assert!(WINDOW <= HEIGHT);
