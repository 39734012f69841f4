//! Command-line interface for the terminal front end.

use clap::{Parser, ValueEnum};
use tictactoe_minimax::{Piece, Seat, Strategy};

/// Play perfect tic-tac-toe against a minimax engine.
#[derive(Parser, Debug)]
#[command(name = "tictactoe_minimax")]
#[command(about = "Play perfect tic-tac-toe against a minimax engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Piece the human plays (prompted when omitted)
    #[arg(short, long, value_enum)]
    pub piece: Option<PieceArg>,

    /// Which side moves first (prompted when omitted)
    #[arg(short, long, value_enum)]
    pub first: Option<FirstArg>,

    /// Search strategy for the engine
    #[arg(short, long, value_enum, default_value_t = StrategyArg::ForwardChecking)]
    pub strategy: StrategyArg,

    /// Play a single game and print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Piece choice for the human player.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PieceArg {
    /// Play as x.
    X,
    /// Play as o.
    O,
}

impl From<PieceArg> for Piece {
    fn from(arg: PieceArg) -> Self {
        match arg {
            PieceArg::X => Piece::X,
            PieceArg::O => Piece::O,
        }
    }
}

/// Which side opens the game.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FirstArg {
    /// The human moves first.
    Human,
    /// The computer moves first.
    Computer,
}

impl From<FirstArg> for Seat {
    fn from(arg: FirstArg) -> Self {
        match arg {
            FirstArg::Human => Seat::Human,
            FirstArg::Computer => Seat::Computer,
        }
    }
}

/// Engine strategy selection.
#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StrategyArg {
    /// Full-width minimax scan at every node.
    Exhaustive,
    /// Resolve immediate wins and forced blocks before scanning.
    ForwardChecking,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Exhaustive => Strategy::Exhaustive,
            StrategyArg::ForwardChecking => Strategy::ForwardChecking,
        }
    }
}
