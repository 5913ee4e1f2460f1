use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use std::fmt;

use crate::{error::MoveError, CELLS, HEIGHT, WIDTH};

/// One of the two sides of a game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The numeric encoding of the player's pieces, +1 for player one and -1 for player two
    pub fn sign(self) -> i32 {
        match self {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The side to move after `num_moves` placements
    pub fn from_move_count(num_moves: usize) -> Self {
        if num_moves % 2 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

/// A TOOT-OTTO letter tile, either player may place either letter
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum Letter {
    T,
    O,
}

impl Letter {
    pub fn as_char(self) -> char {
        match self {
            Letter::T => 'T',
            Letter::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'T' => Some(Letter::T),
            'O' => Some(Letter::O),
            _ => None,
        }
    }
}

/// The identity of a placed piece beyond its owner
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Marker {
    /// A plain Connect 4 disc
    Disc,
    Letter(Letter),
}

impl Default for Marker {
    fn default() -> Self {
        Marker::Disc
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    PlayerOne(Marker),
    PlayerTwo(Marker),
}

impl Cell {
    pub fn new(player: Player, marker: Marker) -> Self {
        match player {
            Player::One => Cell::PlayerOne(marker),
            Player::Two => Cell::PlayerTwo(marker),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// +1, -1 or 0 for an empty cell
    pub fn sign(&self) -> i32 {
        self.player().map_or(0, Player::sign)
    }

    pub fn player(&self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne(_) => Some(Player::One),
            Cell::PlayerTwo(_) => Some(Player::Two),
        }
    }

    pub fn marker(&self) -> Option<Marker> {
        match *self {
            Cell::Empty => None,
            Cell::PlayerOne(marker) | Cell::PlayerTwo(marker) => Some(marker),
        }
    }

    pub fn letter(&self) -> Option<Letter> {
        match self.marker() {
            Some(Marker::Letter(letter)) => Some(letter),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne(Marker::Disc) => 'X',
            Cell::PlayerTwo(Marker::Disc) => 'Y',
            Cell::PlayerOne(Marker::Letter(letter)) => letter.as_char(),
            Cell::PlayerTwo(Marker::Letter(letter)) => letter.as_char().to_ascii_lowercase(),
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            'X' => Some(Cell::PlayerOne(Marker::Disc)),
            'Y' => Some(Cell::PlayerTwo(Marker::Disc)),
            'T' | 'O' => Letter::from_char(c).map(|l| Cell::PlayerOne(Marker::Letter(l))),
            't' | 'o' => Letter::from_char(c).map(|l| Cell::PlayerTwo(Marker::Letter(l))),
            _ => None,
        }
    }
}

/// A 7x6 gravity board
///
/// Row 0 is the top of the board and row `HEIGHT - 1` the bottom, so pieces
/// fall towards higher row indices. A board is a plain value: playing a move
/// returns a new board and leaves the original untouched, so search branches
/// never see each other's trial moves.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
    num_moves: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            num_moves: 0,
        }
    }

    /// Builds a Connect 4 board from a string of one-indexed columns, alternating
    /// player one and player two discs, e.g. "4453"
    ///
    /// Fails if a column is invalid or full, or if the position is already won
    /// before the last move is played.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if crate::scanner::scan_lines(&board, crate::Variant::Connect4).is_terminal() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    let (next, _) = board.apply_move(column - 1, board.turn(), Marker::Disc)?;
                    board = next;
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a board from text rows listed top to bottom
    ///
    /// `.` is empty, `X`/`Y` are player one/two discs, `T`/`O` are player one
    /// letters and `t`/`o` player two letters. The move counter is set to the
    /// number of pieces; boards with pieces floating above an empty cell are
    /// rejected.
    pub fn from_rows(rows: [&str; HEIGHT]) -> Result<Self> {
        let mut board = Self::new();

        for (row, text) in rows.iter().enumerate() {
            let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != WIDTH {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    row,
                    chars.len(),
                    WIDTH
                ));
            }
            for (column, &c) in chars.iter().enumerate() {
                let cell = Cell::from_char(c)
                    .ok_or_else(|| anyhow!("could not parse '{}' as a cell", c))?;
                if !cell.is_empty() {
                    board.num_moves += 1;
                }
                board.cells[row][column] = cell;
            }
        }

        for column in 0..WIDTH {
            if (1..HEIGHT).any(|row| {
                !board.cells[row - 1][column].is_empty() && board.cells[row][column].is_empty()
            }) {
                return Err(anyhow!("column {} has a floating piece", column));
            }
        }
        Ok(board)
    }

    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn rows(&self) -> &[[Cell; WIDTH]; HEIGHT] {
        &self.cells
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// The side whose turn it is, by move parity
    pub fn turn(&self) -> Player {
        Player::from_move_count(self.num_moves)
    }

    pub fn is_full(&self) -> bool {
        self.num_moves == CELLS
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    pub fn open_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.playable(column))
    }

    /// The row a piece dropped into `column` would land in
    pub fn drop_row(&self, column: usize) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::ColumnOutOfRange { column });
        }
        if !self.cells[0][column].is_empty() {
            return Err(MoveError::ColumnFull { column });
        }
        // the piece rests on top of the first occupied cell below the top row
        Ok((1..HEIGHT)
            .find(|&row| !self.cells[row][column].is_empty())
            .map_or(HEIGHT - 1, |row| row - 1))
    }

    /// Drops a piece into `column`, returning the new board and the row it landed in
    pub fn apply_move(
        &self,
        column: usize,
        player: Player,
        marker: Marker,
    ) -> Result<(Board, usize), MoveError> {
        let row = self.drop_row(column)?;
        let mut next = *self;
        next.cells[row][column] = Cell::new(player, marker);
        next.num_moves += 1;
        Ok((next, row))
    }

    // sets a cell without gravity, so scans can be tested on any pattern
    #[cfg(test)]
    pub(crate) fn place(&mut self, row: usize, column: usize, cell: Cell) {
        if self.cells[row][column].is_empty() && !cell.is_empty() {
            self.num_moves += 1;
        }
        self.cells[row][column] = cell;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
