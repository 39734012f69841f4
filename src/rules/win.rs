//! Win detection logic for tic-tac-toe.

use super::LINES;
use crate::board::{Board, Piece, Square};

/// Checks if there is a winner on the board.
///
/// Returns `Some(piece)` for the owner of the first fully-matched
/// line in the fixed scan order, `None` if no line is complete.
pub fn check_winner(board: &Board) -> Option<Piece> {
    for [a, b, c] in LINES {
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            return match sq {
                Square::Occupied(piece) => Some(piece),
                Square::Empty => None,
            };
        }
    }

    None
}
