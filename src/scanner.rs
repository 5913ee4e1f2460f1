//! Detection of completed lines on a board
//!
//! Every cell is the origin of up to four windows of `WINDOW` cells, one in each
//! scan direction. Windows that would run off the board are skipped rather than
//! padded.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::{
    board::{Board, Cell, Letter, Player},
    CELLS, HEIGHT, WIDTH, WINDOW,
};

/// A scan direction from a window's origin cell
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Right,
    Down,
    DownRight,
    UpRight,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::DownRight,
        Direction::UpRight,
    ];

    /// (row, column) step between consecutive cells, rows grow downwards
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::DownRight => (1, 1),
            Direction::UpRight => (-1, 1),
        }
    }
}

/// `WINDOW` consecutive cells in one direction
#[derive(Copy, Clone, Debug)]
pub struct Window {
    pub row: usize,
    pub column: usize,
    pub direction: Direction,
    pub cells: [Cell; WINDOW],
}

impl Window {
    /// Collects the window starting at `(row, column)`, or `None` if it leaves the board
    pub fn at(board: &Board, row: usize, column: usize, direction: Direction) -> Option<Self> {
        let (dr, dc) = direction.delta();
        let last_row = row as isize + dr * (WINDOW as isize - 1);
        let last_column = column as isize + dc * (WINDOW as isize - 1);
        if last_row < 0 || last_row >= HEIGHT as isize || last_column >= WIDTH as isize {
            return None;
        }

        let mut cells = [Cell::Empty; WINDOW];
        for (k, cell) in cells.iter_mut().enumerate() {
            let r = (row as isize + dr * k as isize) as usize;
            let c = (column as isize + dc * k as isize) as usize;
            *cell = board.get(r, c);
        }
        Some(Self {
            row,
            column,
            direction,
            cells,
        })
    }

    /// Sum of the cells' +1/-1 encoding
    pub fn sum(&self) -> i32 {
        self.cells.iter().map(Cell::sign).sum()
    }

    fn letters(&self) -> Option<[Letter; WINDOW]> {
        let mut letters = [Letter::T; WINDOW];
        for (letter, cell) in letters.iter_mut().zip(self.cells.iter()) {
            *letter = cell.letter()?;
        }
        Some(letters)
    }
}

/// Every in-bounds window on the board
pub fn windows(board: &Board) -> impl Iterator<Item = Window> + '_ {
    (0..HEIGHT).flat_map(move |row| {
        (0..WIDTH).flat_map(move |column| {
            Direction::ALL
                .iter()
                .filter_map(move |&direction| Window::at(board, row, column, direction))
        })
    })
}

/// Which game is being played, selecting the win predicate
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Connect4,
    TootOtto,
}

impl Variant {
    /// The side a completed window belongs to, if any
    pub fn winner(self, window: &Window) -> Option<Player> {
        match self {
            Variant::Connect4 => match window.sum() {
                4 => Some(Player::One),
                -4 => Some(Player::Two),
                _ => None,
            },
            // the spelled word decides the winner, not who placed the letters
            Variant::TootOtto => match window.letters()? {
                [Letter::T, Letter::O, Letter::O, Letter::T] => Some(Player::One),
                [Letter::O, Letter::T, Letter::T, Letter::O] => Some(Player::Two),
                _ => None,
            },
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Connect4 => write!(f, "Connect-4"),
            Variant::TootOtto => write!(f, "TOOT-OTTO"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "connect4" | "connect-4" | "c4" => Ok(Variant::Connect4),
            "toot-otto" | "toototto" | "toot" => Ok(Variant::TootOtto),
            other => Err(format!(
                "unknown game '{}' (expected connect4 or toot-otto)",
                other
            )),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    PlayerOneWins,
    PlayerTwoWins,
    Draw,
}

impl Outcome {
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::PlayerOneWins => Some(Player::One),
            Outcome::PlayerTwoWins => Some(Player::Two),
            _ => None,
        }
    }

    fn from_wins(board: &Board, one: bool, two: bool) -> Self {
        match (one, two) {
            // both words completed by the same letter
            (true, true) => Outcome::Draw,
            (true, false) => Outcome::PlayerOneWins,
            (false, true) => Outcome::PlayerTwoWins,
            (false, false) if board.num_moves() == CELLS => Outcome::Draw,
            (false, false) => Outcome::InProgress,
        }
    }
}

fn collect_outcome<I: Iterator<Item = Window>>(
    board: &Board,
    variant: Variant,
    windows: I,
) -> Outcome {
    let (mut one, mut two) = (false, false);
    for window in windows {
        match variant.winner(&window) {
            Some(Player::One) => one = true,
            Some(Player::Two) => two = true,
            None => {}
        }
    }
    Outcome::from_wins(board, one, two)
}

/// Scans every window on the board for a completed line
pub fn scan_lines(board: &Board, variant: Variant) -> Outcome {
    collect_outcome(board, variant, windows(board))
}

/// Scans only the windows passing through `(row, column)`
///
/// A line can only become complete through the cell that was just filled, so
/// after a placement on a board without a winner this agrees with
/// [`scan_lines`].
pub fn scan_from(board: &Board, row: usize, column: usize, variant: Variant) -> Outcome {
    let origins = Direction::ALL.iter().flat_map(move |&direction| {
        let (dr, dc) = direction.delta();
        (0..WINDOW as isize).filter_map(move |k| {
            let r = row as isize - dr * k;
            let c = column as isize - dc * k;
            if r < 0 || c < 0 || r >= HEIGHT as isize || c >= WIDTH as isize {
                return None;
            }
            Window::at(board, r as usize, c as usize, direction)
        })
    });
    collect_outcome(board, variant, origins)
}
