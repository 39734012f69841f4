//! First-class invariants for the turn loop.
//!
//! Invariants are logical properties that must hold after every
//! committed move. They are asserted in debug builds and testable
//! independently.

use crate::board::{Board, Piece, Square};
use crate::game::GameInProgress;
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariant: the two piece counts differ by at most one.
///
/// Turns alternate, so after any number of committed moves the
/// counts can never drift further apart.
pub struct BalancedBoardInvariant;

impl Invariant<GameInProgress> for BalancedBoardInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let count = |piece: Piece| {
            game.board()
                .squares()
                .iter()
                .filter(|s| **s == Square::Occupied(piece))
                .count()
        };
        let x_count = count(Piece::X);
        let o_count = count(Piece::O);

        let valid = x_count.abs_diff(o_count) <= 1;
        if !valid {
            warn!(x_count, o_count, "Board balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "Piece counts differ by at most one"
    }
}

/// Invariant: replaying the history reproduces the board.
///
/// Each square transitions Empty to Occupied exactly once; a
/// square that changes hands, or a board square with no matching
/// history entry, fails the check. Speculative search placements
/// never appear here because they are restored before returning.
pub struct HistoryConsistentInvariant;

impl Invariant<GameInProgress> for HistoryConsistentInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = Board::new();

        for mov in game.history() {
            if reconstructed.get(mov.position) != Square::Empty {
                warn!(position = %mov.position, "History replays onto an occupied square");
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.piece));
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Replaying the history reproduces the board"
    }
}

/// Checks every game invariant.
///
/// Returns `Ok(())` if all invariants hold, or the list of
/// violations otherwise.
pub fn check_all(game: &GameInProgress) -> Result<(), Vec<InvariantViolation>> {
    let mut violations = Vec::new();

    if !BalancedBoardInvariant::holds(game) {
        violations.push(InvariantViolation::new(BalancedBoardInvariant::description()));
    }
    if !HistoryConsistentInvariant::holds(game) {
        violations.push(InvariantViolation::new(
            HistoryConsistentInvariant::description(),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Asserts that all game invariants hold (debug builds only).
pub(crate) fn assert_all(game: &GameInProgress) {
    debug_assert!(
        BalancedBoardInvariant::holds(game),
        "Board balance violated"
    );
    debug_assert!(
        HistoryConsistentInvariant::holds(game),
        "History consistency violated"
    );
}
