//! Game rules: win/draw detection and the single-ply threat finder.

use crate::position::Position;

mod draw;
mod threat;
mod win;

pub use draw::is_full;
pub use threat::completing_square;
pub use win::check_winner;

/// The 8 winning lines in fixed scan order: rows, columns,
/// principal diagonal, anti-diagonal.
///
/// Every rule scans this table in this order, which makes the
/// first-match tie-break deterministic across the whole engine.
pub(crate) const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];
