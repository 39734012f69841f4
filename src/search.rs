//! Minimax search: position evaluation and computer move selection.
//!
//! Scores are always from the human's perspective: +1 means the
//! human-assigned piece wins with optimal play, -1 means the
//! computer's piece wins, 0 means a draw. The computer therefore
//! minimizes and the human maximizes.

use crate::board::{Board, PieceAssignment, Square};
use crate::position::Position;
use crate::rules;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score for a position the human wins with optimal play.
pub const SCORE_HUMAN_WIN: i8 = 1;
/// Score for a drawn position.
pub const SCORE_DRAW: i8 = 0;
/// Score for a position the computer wins with optimal play.
pub const SCORE_COMPUTER_WIN: i8 = -1;

/// Neutral starting value for the maximizer's pruning bound.
///
/// The bound orientation is inherited from the engine this search
/// reproduces and is swapped relative to classical alpha-beta:
/// `alpha` acts as the maximizer's hard ceiling and starts above
/// every reachable score.
pub const ALPHA_START: i8 = 2;
/// Neutral starting value for the minimizer's pruning bound
/// (the minimizer's hard floor, below every reachable score).
pub const BETA_START: i8 = -2;

/// Evaluation strategy for the search.
///
/// Both strategies return identical scores for every reachable
/// position; forward checking only visits fewer nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// Full-width scan of every vacant square at every node.
    Exhaustive,
    /// Resolve immediate wins and forced blocks before scanning.
    ForwardChecking,
}

/// Error selecting a computer move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SearchError {
    /// Move selection was invoked with no vacant square left.
    ///
    /// The game loop ends finished games before asking for a move,
    /// so this indicates a caller bug.
    #[display("No vacant square to play")]
    NoVacantSquare,
}

impl std::error::Error for SearchError {}

/// Adversarial searcher over a tic-tac-toe board.
///
/// Carries the strategy flag and the `nodes_expanded` diagnostic
/// counter; the counter is incremented once per [`evaluate`]
/// invocation and reset per game by creating a fresh searcher.
///
/// [`evaluate`]: Searcher::evaluate
#[derive(Debug, Clone)]
pub struct Searcher {
    strategy: Strategy,
    nodes_expanded: u64,
}

impl Searcher {
    /// Creates a searcher with a zeroed node counter.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            nodes_expanded: 0,
        }
    }

    /// Returns the strategy this searcher evaluates with.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of evaluator invocations since construction.
    pub fn nodes_expanded(&self) -> u64 {
        self.nodes_expanded
    }

    /// Scores the position from the human's perspective.
    ///
    /// `human_to_move` says whose piece is placed at this node and
    /// strictly alternates down the recursion. Callers start with
    /// the neutral bounds [`ALPHA_START`] and [`BETA_START`].
    ///
    /// The board is mutated speculatively during the search and
    /// restored on every exit path; on return it is exactly as
    /// passed in.
    pub fn evaluate(
        &mut self,
        board: &mut Board,
        seats: PieceAssignment,
        human_to_move: bool,
        mut alpha: i8,
        mut beta: i8,
    ) -> i8 {
        self.nodes_expanded += 1;

        let (mover, win_score) = if human_to_move {
            (seats.human(), SCORE_HUMAN_WIN)
        } else {
            (seats.computer(), SCORE_COMPUTER_WIN)
        };

        if self.strategy == Strategy::ForwardChecking {
            // A completable line for the mover is an immediate win;
            // otherwise an opponent threat forces the block as the
            // single continuation.
            if rules::completing_square(board, mover).is_some() {
                return win_score;
            }
            if let Some(block) = rules::completing_square(board, mover.opponent()) {
                board.set(block, Square::Occupied(mover));
                let val = self.evaluate(board, seats, !human_to_move, alpha, beta);
                board.set(block, Square::Empty);
                return val;
            }
        }

        match rules::check_winner(board) {
            Some(piece) if piece == seats.human() => return SCORE_HUMAN_WIN,
            Some(_) => return SCORE_COMPUTER_WIN,
            None => {}
        }
        if rules::is_full(board) {
            return SCORE_DRAW;
        }

        let mut max = BETA_START;
        let mut min = ALPHA_START;

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }

            board.set(pos, Square::Occupied(mover));
            let val = self.evaluate(board, seats, !human_to_move, alpha, beta);
            board.set(pos, Square::Empty);

            if human_to_move {
                if val > max {
                    max = val;
                    beta = max;
                }
                // +1 is the best the maximizer can do; a running best
                // at the ceiling cannot improve the parent either.
                if val == SCORE_HUMAN_WIN || max >= alpha {
                    break;
                }
            } else {
                if val < min {
                    min = val;
                    alpha = min;
                }
                if val == SCORE_COMPUTER_WIN || min <= beta {
                    break;
                }
            }
        }

        if human_to_move { max } else { min }
    }

    /// Chooses and commits the computer's move.
    ///
    /// Scans vacant squares in increasing index order, keeping the
    /// minimum evaluator score (best for the computer); the first
    /// square achieving a score wins ties, and a score of -1 ends
    /// the scan early since no better outcome exists. The chosen
    /// square is the only board change on return.
    #[instrument(skip(self, board), fields(strategy = ?self.strategy))]
    pub fn choose_move(
        &mut self,
        board: &mut Board,
        seats: PieceAssignment,
    ) -> Result<Position, SearchError> {
        if self.strategy == Strategy::ForwardChecking {
            // An unconditional immediate win takes precedence over
            // everything else, including blocking.
            let shortcut = rules::completing_square(board, seats.computer())
                .or_else(|| rules::completing_square(board, seats.human()));
            if let Some(pos) = shortcut {
                board.set(pos, Square::Occupied(seats.computer()));
                debug!(position = %pos, "Forward-checking shortcut move");
                return Ok(pos);
            }
        }

        let mut best: Option<(Position, i8)> = None;

        for pos in Position::ALL {
            if !board.is_empty(pos) {
                continue;
            }

            board.set(pos, Square::Occupied(seats.computer()));
            let val = self.evaluate(board, seats, true, ALPHA_START, BETA_START);
            board.set(pos, Square::Empty);

            if best.is_none_or(|(_, score)| val < score) {
                best = Some((pos, val));
            }
            if val == SCORE_COMPUTER_WIN {
                break;
            }
        }

        let (pos, score) = best.ok_or(SearchError::NoVacantSquare)?;
        board.set(pos, Square::Occupied(seats.computer()));
        debug!(position = %pos, score, nodes = self.nodes_expanded, "Computer move chosen");
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn seats_for_computer(piece: Piece) -> PieceAssignment {
        PieceAssignment::human_plays(piece.opponent())
    }

    #[test]
    fn test_won_position_scores_for_winner() {
        let mut board: Board = "xxxo---o-".parse().unwrap();
        let seats = PieceAssignment::human_plays(Piece::X);
        for strategy in [Strategy::Exhaustive, Strategy::ForwardChecking] {
            let mut searcher = Searcher::new(strategy);
            let val = searcher.evaluate(&mut board, seats, false, ALPHA_START, BETA_START);
            assert_eq!(val, SCORE_HUMAN_WIN);
        }
    }

    #[test]
    fn test_full_board_scores_draw() {
        let mut board: Board = "xoxoxxoxo".parse().unwrap();
        let seats = PieceAssignment::human_plays(Piece::X);
        let mut searcher = Searcher::new(Strategy::Exhaustive);
        let val = searcher.evaluate(&mut board, seats, true, ALPHA_START, BETA_START);
        assert_eq!(val, SCORE_DRAW);
    }

    #[test]
    fn test_chooses_immediate_win() {
        for strategy in [Strategy::Exhaustive, Strategy::ForwardChecking] {
            let mut board: Board = "oo-xx----".parse().unwrap();
            let mut searcher = Searcher::new(strategy);
            let pos = searcher
                .choose_move(&mut board, seats_for_computer(Piece::O))
                .unwrap();
            assert_eq!(pos, Position::TopRight);
            assert_eq!(rules::check_winner(&board), Some(Piece::O));
        }
    }

    #[test]
    fn test_blocks_immediate_threat() {
        for strategy in [Strategy::Exhaustive, Strategy::ForwardChecking] {
            let mut board: Board = "xx--o----".parse().unwrap();
            let mut searcher = Searcher::new(strategy);
            let pos = searcher
                .choose_move(&mut board, seats_for_computer(Piece::O))
                .unwrap();
            assert_eq!(pos, Position::TopRight);
        }
    }

    #[test]
    fn test_full_board_is_a_caller_error() {
        let mut board: Board = "xoxoxxoxo".parse().unwrap();
        let mut searcher = Searcher::new(Strategy::Exhaustive);
        assert_eq!(
            searcher.choose_move(&mut board, seats_for_computer(Piece::O)),
            Err(SearchError::NoVacantSquare)
        );
    }

    #[test]
    fn test_counter_counts_evaluator_invocations() {
        let mut board = Board::new();
        let seats = PieceAssignment::human_plays(Piece::X);
        let mut searcher = Searcher::new(Strategy::ForwardChecking);
        assert_eq!(searcher.nodes_expanded(), 0);
        searcher.evaluate(&mut board, seats, true, ALPHA_START, BETA_START);
        assert!(searcher.nodes_expanded() > 0);
    }
}
