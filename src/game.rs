//! Turn sequencing for one game session
//!
//! A [`Game`] owns the real board. Moves are validated and applied here, the
//! board is rescanned after every placement, and the computer's turn is
//! delegated to a [`ComputerPlayer`]. Rendering, input and storage stay outside:
//! callers receive each placement as a [`MoveReport`] and hand finished games to
//! a [`RecordSink`].

use rand::Rng;
use tracing::{debug, info, warn};

use crate::{
    board::{Board, Letter, Marker, Player},
    error::{GameError, SearchError, SEARCH_FALLBACK},
    record::{GameRecord, RecordSink},
    scanner::{scan_from, Outcome, Variant},
    search::{MoveChoice, SearchEngine},
};

/// A source of computer moves
pub trait ComputerPlayer {
    /// Picks the letter for a TOOT-OTTO move
    fn choose_letter(&mut self) -> Letter;

    fn choose_move(&mut self, board: &Board, player: Player) -> Result<MoveChoice, SearchError>;

    /// Picks any open column, used when a chosen column cannot be played
    fn random_open_column(&mut self, board: &Board) -> Option<usize>;
}

impl<R: Rng> ComputerPlayer for SearchEngine<R> {
    fn choose_letter(&mut self) -> Letter {
        SearchEngine::choose_letter(self)
    }

    fn choose_move(&mut self, board: &Board, player: Player) -> Result<MoveChoice, SearchError> {
        SearchEngine::choose_move(self, board, player)
    }

    fn random_open_column(&mut self, board: &Board) -> Option<usize> {
        SearchEngine::random_open_column(self, board)
    }
}

/// Where a piece landed
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Placement {
    pub column: usize,
    pub row: usize,
    pub player: Player,
    pub marker: Marker,
}

/// Everything a renderer needs to show one move
#[derive(Copy, Clone, Debug)]
pub struct MoveReport {
    pub board: Board,
    pub placement: Placement,
    pub outcome: Outcome,
    /// Set when the computer's chosen column was rejected and a random one played instead
    pub fallback: bool,
}

#[derive(Clone, Debug)]
pub struct Game {
    variant: Variant,
    board: Board,
    outcome: Outcome,
    player_names: (String, String),
    last_placement: Option<Placement>,
}

impl Game {
    pub fn new<S: Into<String>, T: Into<String>>(
        variant: Variant,
        player_one: S,
        player_two: T,
    ) -> Self {
        Self {
            variant,
            board: Board::new(),
            outcome: Outcome::InProgress,
            player_names: (player_one.into(), player_two.into()),
            last_placement: None,
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }

    /// The side to move next
    pub fn turn(&self) -> Player {
        self.board.turn()
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player_names.0,
            Player::Two => &self.player_names.1,
        }
    }

    /// Clears the board for a new game between the same players
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.outcome = Outcome::InProgress;
        self.last_placement = None;
    }

    /// Drops a piece for the side to move
    pub fn play(&mut self, column: usize, marker: Marker) -> Result<MoveReport, GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameOver);
        }
        let marker_fits = match (self.variant, marker) {
            (Variant::Connect4, Marker::Disc) => true,
            (Variant::TootOtto, Marker::Letter(_)) => true,
            _ => false,
        };
        if !marker_fits {
            return Err(GameError::WrongMarker {
                marker,
                variant: self.variant,
            });
        }

        let player = self.turn();
        let (board, row) = self.board.apply_move(column, player, marker)?;
        self.board = board;
        self.outcome = scan_from(&self.board, row, column, self.variant);

        let placement = Placement {
            column,
            row,
            player,
            marker,
        };
        self.last_placement = Some(placement);
        debug!(?player, column, row, outcome = ?self.outcome, "piece placed");
        if self.outcome.is_terminal() {
            info!(
                variant = %self.variant,
                outcome = ?self.outcome,
                moves = self.board.num_moves(),
                "game over"
            );
        }

        Ok(MoveReport {
            board: self.board,
            placement,
            outcome: self.outcome,
            fallback: false,
        })
    }

    /// Lets `computer` make the move for the side to play
    pub fn play_computer<C: ComputerPlayer>(
        &mut self,
        computer: &mut C,
    ) -> Result<MoveReport, GameError> {
        if self.outcome.is_terminal() {
            return Err(GameError::GameOver);
        }
        let marker = match self.variant {
            Variant::Connect4 => Marker::Disc,
            // the letter is decided before, and independently of, the column
            Variant::TootOtto => Marker::Letter(computer.choose_letter()),
        };

        let choice = computer.choose_move(&self.board, self.turn())?;
        match self.play(choice.column, marker) {
            Err(GameError::Move(err)) => {
                warn!(
                    event = SEARCH_FALLBACK,
                    column = choice.column,
                    error = %err,
                    "chosen column rejected, falling back to a random open column"
                );
                let column = computer
                    .random_open_column(&self.board)
                    .ok_or(SearchError::NoOpenColumn)?;
                let mut report = self.play(column, marker)?;
                report.fallback = true;
                Ok(report)
            }
            result => result,
        }
    }

    /// The record of a finished game, `None` while it is still in progress
    pub fn record(&self, game_date: i64) -> Option<GameRecord> {
        let winner_name = match self.outcome {
            Outcome::InProgress => return None,
            Outcome::Draw => "Draw".to_string(),
            Outcome::PlayerOneWins => self.player_names.0.clone(),
            Outcome::PlayerTwoWins => self.player_names.1.clone(),
        };
        Some(GameRecord {
            game_number: String::new(),
            game_type: self.variant.to_string(),
            player1_name: self.player_names.0.clone(),
            player2_name: self.player_names.1.clone(),
            winner_name,
            game_date,
        })
    }

    /// Hands the finished game to `sink`
    ///
    /// Storage failures are logged and otherwise ignored, they never affect the game.
    pub fn finish<S: RecordSink + ?Sized>(&self, sink: &mut S) -> Option<GameRecord> {
        let record = self.record(crate::record::now_ms())?;
        if let Err(err) = sink.save(&record) {
            warn!(error = %err, "failed to save game record");
        }
        Some(record)
    }
}
