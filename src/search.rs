//! Fixed-depth minimax search for the computer player

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use std::str::FromStr;

use crate::{
    board::{Board, Letter, Marker, Player},
    error::SearchError,
    evaluator::evaluate,
    WIDTH,
};

/// Score of a position containing a completed line for the computer
pub const WIN_SCORE: i64 = 999_999;

/// Search parameters
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// The layer at which positions stop being expanded and are scored statically
    pub depth: usize,
    /// Cut off branches that cannot change the result
    pub pruning: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            pruning: true,
        }
    }
}

/// Named search depths offered to players
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn depth(self) -> usize {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 4,
        }
    }

    pub fn config(self) -> SearchConfig {
        SearchConfig {
            depth: self.depth(),
            ..SearchConfig::default()
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!(
                "unknown difficulty '{}' (expected easy, medium or hard)",
                other
            )),
        }
    }
}

/// The column picked by a search and its minimax value
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MoveChoice {
    pub column: usize,
    pub score: i64,
    /// Positions evaluated to reach the decision
    pub nodes: usize,
}

/// A minimax agent with alpha-beta pruning
///
/// # Position Scoring
/// Layers alternate between the computer (maximising) and its opponent
/// (minimising), starting with the computer's move at layer 0. A position
/// reached at layer `d` is scored as
/// - `WIN_SCORE - d²` if the computer has a completed line,
/// - `-WIN_SCORE - d²` if the opponent has one,
/// - the evaluator's heuristic minus `d²` once `d` reaches the configured depth
///   or the board is full,
///
/// so that nearer wins are preferred over later ones. Equally scored columns at
/// the root are chosen between uniformly at random using the engine's RNG.
pub struct SearchEngine<R = StdRng> {
    config: SearchConfig,
    rng: R,

    /// The number of nodes searched by this engine so far (for diagnostics only)
    pub node_count: usize,
}

impl SearchEngine<StdRng> {
    /// Creates an engine seeded from the operating system
    pub fn new(config: SearchConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an engine whose tie-breaks are reproducible
    pub fn seeded(config: SearchConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SearchEngine<R> {
    pub fn with_rng(config: SearchConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            node_count: 0,
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Picks the letter for the next TOOT-OTTO move
    pub fn choose_letter(&mut self) -> Letter {
        if self.rng.random_bool(0.5) {
            Letter::T
        } else {
            Letter::O
        }
    }

    /// Picks any open column uniformly at random
    pub fn random_open_column(&mut self, board: &Board) -> Option<usize> {
        let open: Vec<usize> = board.open_columns().collect();
        self.pick(&open)
    }

    fn pick(&mut self, columns: &[usize]) -> Option<usize> {
        match columns.len() {
            0 => None,
            len => Some(columns[self.rng.random_range(0..len)]),
        }
    }

    /// Searches for the best column for `ai` to drop a piece into
    #[instrument(level = "debug", skip(self, board), fields(moves = board.num_moves()))]
    pub fn choose_move(&mut self, board: &Board, ai: Player) -> Result<MoveChoice, SearchError> {
        let start_nodes = self.node_count;
        let mut alpha = i64::MIN;
        let beta = i64::MAX;

        let mut best = i64::MIN;
        let mut ties = Vec::with_capacity(WIDTH);
        for column in 0..WIDTH {
            let child = match board.apply_move(column, ai, Marker::Disc) {
                Ok((child, _)) => child,
                // full columns are not candidates
                Err(_) => continue,
            };
            let score = self.value(&child, ai, 0, alpha, beta);
            if score > best {
                best = score;
                ties.clear();
                ties.push(column);
            } else if score == best {
                ties.push(column);
            }
            // one below the best so equal columns still get exact values
            alpha = alpha.max(best.saturating_sub(1));
        }

        let column = self.pick(&ties).ok_or(SearchError::NoOpenColumn)?;
        let choice = MoveChoice {
            column,
            score: best,
            nodes: self.node_count - start_nodes,
        };
        debug!(
            column = choice.column,
            score = choice.score,
            nodes = choice.nodes,
            ties = ties.len(),
            "search finished"
        );
        Ok(choice)
    }

    /// The minimax value of `board`, reached at layer `depth`
    fn value(&mut self, board: &Board, ai: Player, depth: usize, alpha: i64, beta: i64) -> i64 {
        self.node_count += 1;

        let evaluation = evaluate(board, ai);
        let penalty = (depth * depth) as i64;

        if evaluation.is_win() {
            return WIN_SCORE - penalty;
        }
        if evaluation.is_loss() {
            return -WIN_SCORE - penalty;
        }
        if depth >= self.config.depth || board.is_full() {
            return evaluation.heuristic - penalty;
        }

        // the computer moved into layer 0, so even layers hand over to the opponent
        if depth % 2 == 0 {
            self.min_layer(board, ai, depth + 1, alpha, beta)
        } else {
            self.max_layer(board, ai, depth + 1, alpha, beta)
        }
    }

    fn max_layer(
        &mut self,
        board: &Board,
        ai: Player,
        depth: usize,
        mut alpha: i64,
        beta: i64,
    ) -> i64 {
        let mut v = i64::MIN;
        for column in 0..WIDTH {
            if let Ok((child, _)) = board.apply_move(column, ai, Marker::Disc) {
                v = v.max(self.value(&child, ai, depth, alpha, beta));
                // the opponent already has a better option elsewhere
                if self.config.pruning && v > beta {
                    return v;
                }
                alpha = alpha.max(v);
            }
        }
        v
    }

    fn min_layer(
        &mut self,
        board: &Board,
        ai: Player,
        depth: usize,
        alpha: i64,
        mut beta: i64,
    ) -> i64 {
        let mut v = i64::MAX;
        for column in 0..WIDTH {
            if let Ok((child, _)) = board.apply_move(column, ai.other(), Marker::Disc) {
                v = v.min(self.value(&child, ai, depth, alpha, beta));
                // the computer already has a better option elsewhere
                if self.config.pruning && v < alpha {
                    return v;
                }
                beta = beta.min(v);
            }
        }
        v
    }
}
