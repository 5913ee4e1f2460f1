//! Static evaluation of a position for the search

use crate::{
    board::{Board, Player},
    scanner::windows,
    WINDOW,
};

/// The value of a position from one player's point of view
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Evaluation {
    /// `WINDOW` if the player has a completed line, `-WINDOW` if the opponent has, else 0
    pub terminal: i32,
    /// Sum of the cubes of every window's sum
    pub heuristic: i64,
}

impl Evaluation {
    pub fn is_win(&self) -> bool {
        self.terminal == WINDOW as i32
    }

    pub fn is_loss(&self) -> bool {
        self.terminal == -(WINDOW as i32)
    }
}

/// Scores `board` for `perspective` using only the +1/-1 placement signs
///
/// Cubing a window's sum keeps its sign and grows quickly as a window fills
/// with one side's pieces, while mixed windows cancel towards zero. Letters are
/// ignored, so TOOT-OTTO positions are valued by who placed the pieces rather
/// than by the words they spell.
pub fn evaluate(board: &Board, perspective: Player) -> Evaluation {
    let sign = perspective.sign();
    let mut terminal = 0;
    let mut heuristic = 0i64;

    for window in windows(board) {
        let sum = window.sum();
        heuristic += i64::from(sum).pow(3);
        if sum.abs() == WINDOW as i32 {
            terminal = sum;
        }
    }

    Evaluation {
        terminal: terminal * sign,
        heuristic: heuristic * i64::from(sign),
    }
}
