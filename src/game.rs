//! Typestate turn loop: setup, in-progress and finished phases.
//!
//! Each phase is its own type, so a finished game cannot accept
//! moves and an in-progress game has no outcome. Human moves are
//! precondition-checked; computer moves are chosen by the search
//! engine.

use crate::board::{Board, Piece, PieceAssignment, Square};
use crate::invariants;
use crate::position::Position;
use crate::rules;
use crate::search::{SearchError, Searcher, Strategy};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Which side a move belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// The human player.
    Human,
    /// The computer player.
    Computer,
}

impl Seat {
    /// Returns the opposing seat.
    pub fn other(self) -> Self {
        match self {
            Seat::Human => Seat::Computer,
            Seat::Computer => Seat::Human,
        }
    }
}

/// A committed move: a piece placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// The piece that was placed.
    pub piece: Piece,
    /// The square it was placed on.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.piece, self.position.label())
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The given piece completed a line.
    Winner(Piece),
    /// The board filled with no complete line.
    Draw,
}

impl Outcome {
    /// Returns the winning piece if there is one.
    pub fn winner(&self) -> Option<Piece> {
        match self {
            Outcome::Winner(piece) => Some(*piece),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(piece) => write!(f, "{} wins", piece),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Error that can occur when committing a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(Position),

    /// The seat tried to move out of turn.
    #[display("It is not the {_0:?} side's turn")]
    OutOfTurn(Seat),

    /// The engine could not select a move.
    #[display("Move selection failed: {_0}")]
    Search(SearchError),
}

impl std::error::Error for MoveError {}

impl From<SearchError> for MoveError {
    fn from(err: SearchError) -> Self {
        MoveError::Search(err)
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase: pieces assigned, nobody has moved.
#[derive(Debug, Clone)]
pub struct GameSetup {
    seats: PieceAssignment,
    strategy: Strategy,
}

impl GameSetup {
    /// Creates a new game with `human_piece` assigned to the human
    /// and its opponent to the computer.
    #[instrument]
    pub fn new(human_piece: Piece, strategy: Strategy) -> Self {
        Self {
            seats: PieceAssignment::human_plays(human_piece),
            strategy,
        }
    }

    /// Returns the piece assignment.
    pub fn seats(&self) -> PieceAssignment {
        self.seats
    }

    /// Starts the game with the given seat to move first.
    ///
    /// The node counter starts at zero; it is scoped to this game.
    #[instrument(skip(self))]
    pub fn start(self, first: Seat) -> GameInProgress {
        GameInProgress {
            board: Board::new(),
            seats: self.seats,
            to_move: first,
            history: Vec::new(),
            searcher: Searcher::new(self.strategy),
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress: can accept moves.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) seats: PieceAssignment,
    pub(crate) to_move: Seat,
    pub(crate) history: Vec<Move>,
    pub(crate) searcher: Searcher,
}

impl GameInProgress {
    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the piece assignment.
    pub fn seats(&self) -> PieceAssignment {
        self.seats
    }

    /// Returns the seat to move.
    pub fn to_move(&self) -> Seat {
        self.to_move
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Evaluator invocations so far this game.
    pub fn nodes_expanded(&self) -> u64 {
        self.searcher.nodes_expanded()
    }

    /// Returns the vacant positions.
    pub fn valid_moves(&self) -> Vec<Position> {
        Position::valid_moves(&self.board)
    }

    /// Commits a human move, consuming the game and returning the
    /// next phase.
    ///
    /// # Errors
    ///
    /// Fails fast with [`MoveError::OutOfTurn`] if it is the
    /// computer's turn, or [`MoveError::SquareOccupied`] if the
    /// square is taken; the board is untouched on error.
    #[instrument(skip(self), fields(position = %pos))]
    pub fn human_move(mut self, pos: Position) -> Result<GameTurn, MoveError> {
        if self.to_move != Seat::Human {
            return Err(MoveError::OutOfTurn(Seat::Human));
        }
        if !self.board.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }

        let piece = self.seats.human();
        self.board.set(pos, Square::Occupied(piece));
        self.history.push(Move {
            piece,
            position: pos,
        });

        Ok(self.settle())
    }

    /// Asks the engine for the computer's move and commits it.
    #[instrument(skip(self))]
    pub fn computer_move(mut self) -> Result<GameTurn, MoveError> {
        if self.to_move != Seat::Computer {
            return Err(MoveError::OutOfTurn(Seat::Computer));
        }

        let pos = self.searcher.choose_move(&mut self.board, self.seats)?;
        self.history.push(Move {
            piece: self.seats.computer(),
            position: pos,
        });

        Ok(self.settle())
    }

    /// Transitions after a committed move: win, draw, or hand the
    /// turn to the other seat.
    fn settle(mut self) -> GameTurn {
        invariants::assert_all(&self);

        if let Some(winner) = rules::check_winner(&self.board) {
            return GameTurn::Finished(GameFinished {
                board: self.board,
                seats: self.seats,
                outcome: Outcome::Winner(winner),
                history: self.history,
                nodes_expanded: self.searcher.nodes_expanded(),
            });
        }

        if rules::is_full(&self.board) {
            return GameTurn::Finished(GameFinished {
                board: self.board,
                seats: self.seats,
                outcome: Outcome::Draw,
                history: self.history,
                nodes_expanded: self.searcher.nodes_expanded(),
            });
        }

        self.to_move = self.to_move.other();
        GameTurn::InProgress(self)
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished: outcome determined, no further moves.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    seats: PieceAssignment,
    outcome: Outcome,
    history: Vec<Move>,
    nodes_expanded: u64,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the piece assignment.
    pub fn seats(&self) -> PieceAssignment {
        self.seats
    }

    /// Returns the final board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Total evaluator invocations over the whole game.
    pub fn nodes_expanded(&self) -> u64 {
        self.nodes_expanded
    }
}

/// Result of committing a move.
#[derive(Debug)]
pub enum GameTurn {
    /// Game continues with the other seat to move.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
