//! Terminal front end for the perfect-play tic-tac-toe engine.

mod cli;
mod input;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tictactoe_minimax::{
    GameFinished, GameInProgress, GameSetup, GameTurn, Move, Outcome, Piece, Position, Seat,
    Strategy,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = cli::Cli::parse();

    loop {
        let finished = play_game(&cli)?;
        report(&cli, &finished)?;

        if cli.json {
            break;
        }
        let again = input::prompt_choice("\nDo you want to play again? (y or n): ", &['y', 'n'])?;
        if again != 'y' {
            break;
        }
    }

    Ok(())
}

/// Runs one game from setup to its outcome.
fn play_game(cli: &cli::Cli) -> Result<GameFinished> {
    let human_piece = match cli.piece {
        Some(arg) => arg.into(),
        None => prompt_piece()?,
    };
    let first = match cli.first {
        Some(arg) => arg.into(),
        None => prompt_first()?,
    };
    let strategy: Strategy = cli.strategy.into();
    info!(?human_piece, ?first, ?strategy, "Starting game");

    let mut game = GameSetup::new(human_piece, strategy).start(first);

    loop {
        let turn = match game.to_move() {
            Seat::Human => {
                println!("\n{}\n", game.board().display());
                let pos = prompt_position(&game)?;
                game.human_move(pos)?
            }
            Seat::Computer => game.computer_move()?,
        };

        match turn {
            GameTurn::InProgress(next) => game = next,
            GameTurn::Finished(finished) => return Ok(finished),
        }
    }
}

fn prompt_piece() -> Result<Piece> {
    let key = input::prompt_choice("\nPlease choose your piece (x or o): ", &['x', 'o'])?;
    Ok(match key {
        'x' => Piece::X,
        _ => Piece::O,
    })
}

fn prompt_first() -> Result<Seat> {
    let key = input::prompt_choice("\nDo you want to play first? (y or n): ", &['y', 'n'])?;
    Ok(match key {
        'y' => Seat::Human,
        _ => Seat::Computer,
    })
}

fn prompt_position(game: &GameInProgress) -> Result<Position> {
    const KEYS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];
    loop {
        let key = input::prompt_choice("Enter your move (1 to 9): ", &KEYS)?;
        let index = key as usize - '1' as usize;
        if let Some(pos) = Position::from_index(index)
            && game.board().is_empty(pos)
        {
            return Ok(pos);
        }
        println!("That square is taken.");
    }
}

/// End-of-game summary for `--json` output.
#[derive(Debug, Serialize)]
struct GameSummary<'a> {
    outcome: Outcome,
    winner: Option<Piece>,
    human_piece: Piece,
    strategy: Strategy,
    moves: &'a [Move],
    nodes_expanded: u64,
}

fn report(cli: &cli::Cli, finished: &GameFinished) -> Result<()> {
    println!("\n{}\n", finished.board().display());

    if cli.json {
        let summary = GameSummary {
            outcome: finished.outcome(),
            winner: finished.outcome().winner(),
            human_piece: finished.seats().human(),
            strategy: cli.strategy.into(),
            moves: finished.history(),
            nodes_expanded: finished.nodes_expanded(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    match finished.outcome().winner() {
        Some(piece) if piece == finished.seats().human() => {
            println!("Congratulations! You have won.");
        }
        Some(_) => println!("You lose!"),
        None => println!("The game is a draw."),
    }
    println!("Number of nodes expanded: {}", finished.nodes_expanded());

    Ok(())
}
