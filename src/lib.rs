//! Perfect-play tic-tac-toe engine.
//!
//! The computer chooses its moves with a minimax search over the
//! 3x3 board and never loses. Two interchangeable strategies share
//! one evaluator: an exhaustive full-width scan and a
//! forward-checking variant that resolves immediate wins and
//! forced blocks before scanning, reaching the same outcomes while
//! expanding fewer nodes.
//!
//! # Example
//!
//! ```
//! use tictactoe_minimax::{GameSetup, GameTurn, Piece, Seat, Strategy};
//!
//! let game = GameSetup::new(Piece::X, Strategy::ForwardChecking).start(Seat::Computer);
//! match game.computer_move().expect("computer to move") {
//!     GameTurn::InProgress(game) => assert_eq!(game.to_move(), Seat::Human),
//!     GameTurn::Finished(_) => unreachable!("one move cannot finish a game"),
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod game;
mod invariants;
mod position;
pub mod rules;
mod search;

// Crate-level exports - domain types
pub use board::{Board, BoardParseError, Piece, PieceAssignment, Square};

// Crate-level exports - positions
pub use position::Position;

// Crate-level exports - search engine
pub use search::{
    ALPHA_START, BETA_START, SCORE_COMPUTER_WIN, SCORE_DRAW, SCORE_HUMAN_WIN, SearchError,
    Searcher, Strategy,
};

// Crate-level exports - turn loop
pub use game::{GameFinished, GameInProgress, GameSetup, GameTurn, Move, MoveError, Outcome, Seat};

// Crate-level exports - invariants
pub use invariants::{
    BalancedBoardInvariant, HistoryConsistentInvariant, Invariant, InvariantViolation,
};
