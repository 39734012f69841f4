//! Single-ply threat detection: the square that completes a line.

use super::LINES;
use crate::board::{Board, Piece, Square};
use crate::position::Position;

/// Finds an empty square that would complete a line for `piece`.
///
/// Scans the 8 lines in the fixed order and returns the empty
/// square of the first line holding exactly two of `piece`; no
/// tie-break search happens across multiple simultaneous threats.
/// Returns `None` if no line has the 2-of-3 pattern.
///
/// This is a local shortcut only: it spots an immediately
/// completable line, never forks or multi-move combinations.
pub fn completing_square(board: &Board, piece: Piece) -> Option<Position> {
    for line in LINES {
        let mut held = 0;
        let mut vacant = None;
        for pos in line {
            match board.get(pos) {
                Square::Occupied(p) if p == piece => held += 1,
                Square::Empty => vacant = Some(pos),
                Square::Occupied(_) => {}
            }
        }
        if held == 2 && let Some(pos) = vacant {
            return Some(pos);
        }
    }

    None
}
