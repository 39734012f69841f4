//! Core domain types for tic-tac-toe.

use crate::position::Position;
use serde::{Deserialize, Serialize};

/// One of the two marks on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Piece {
    /// The X mark.
    X,
    /// The O mark.
    O,
}

impl Piece {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Piece::X => Piece::O,
            Piece::O => Piece::X,
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Piece::X => write!(f, "x"),
            Piece::O => write!(f, "o"),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a piece.
    Occupied(Piece),
}

/// The fixed human/computer piece pair for one game.
///
/// Exactly one of the two pieces belongs to the human and the
/// other to the computer, assigned at game start and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceAssignment {
    human: Piece,
    computer: Piece,
}

impl PieceAssignment {
    /// Assigns `piece` to the human and its opponent to the computer.
    pub fn human_plays(piece: Piece) -> Self {
        Self {
            human: piece,
            computer: piece.opponent(),
        }
    }

    /// The human's piece.
    pub fn human(&self) -> Piece {
        self.human
    }

    /// The computer's piece.
    pub fn computer(&self) -> Piece {
        self.computer
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    ///
    /// The search uses this for its speculative place/restore pair;
    /// the game layer checks vacancy before committing real moves.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as a human-readable string.
    ///
    /// Vacant squares show their 1-based key so the player knows
    /// which key places a mark there.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(piece) => piece.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Error parsing a board from its 9-character string form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The string did not have exactly 9 characters.
    #[display("Expected 9 squares, got {_0}")]
    WrongLength(usize),
    /// A character was not one of 'x', 'o' or '-'.
    #[display("Invalid square character '{_0}'")]
    InvalidSquare(char),
}

impl std::error::Error for BoardParseError {}

impl std::str::FromStr for Board {
    type Err = BoardParseError;

    /// Parses a row-major board like `"xx--o----"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(BoardParseError::WrongLength(chars.len()));
        }
        let mut board = Board::new();
        for (pos, c) in Position::ALL.iter().zip(chars.iter()) {
            let square = match c {
                '-' => Square::Empty,
                'x' => Square::Occupied(Piece::X),
                'o' => Square::Occupied(Piece::O),
                other => return Err(BoardParseError::InvalidSquare(*other)),
            };
            board.set(*pos, square);
        }
        Ok(board)
    }
}
