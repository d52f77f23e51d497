mod interactive;
mod play;

use anyhow::{Context, Result};
use checkers_agents::{search_with_config, Evaluatable, SearchConfig, DEFAULT_DEPTH};
use checkers_core::{perft_detailed, perft_divide, positions, GameState, Player};
use clap::{Parser, Subcommand};
use interactive::InteractiveGame;
use play::{ask_players, seats_for, Game};
use std::io::{self, Write};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Checkers with a minimax opponent", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play on the command line, typing turns such as "A2 B3"
    Play {
        /// Number of human players: 0, 1 or 2
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=2))]
        players: Option<u8>,
        /// Search depth of the engine
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,
        /// With no humans, let Player 1 pick random turns
        #[arg(long)]
        random: bool,
        /// End the game without a winner after this many turns
        #[arg(long)]
        max_turns: Option<u32>,
    },
    /// Play against the engine with a cursor-driven board
    Tui {
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,
    },
    /// Print a position as seen by both players
    Show {
        /// Position string, side to move optional (defaults to the start)
        position: Option<String>,
    },
    /// Print the static evaluation of a position
    Eval { position: Option<String> },
    /// Search a position for the side to move
    Search {
        position: Option<String>,
        #[arg(long, default_value_t = DEFAULT_DEPTH)]
        depth: u8,
    },
    /// Count complete turn sequences to a depth
    Perft {
        depth: u8,
        position: Option<String>,
    },
}

fn main() {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(args.command) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

fn run(command: Option<Command>) -> Result<()> {
    match command {
        None => run_play(None, DEFAULT_DEPTH, false, None),
        Some(Command::Play {
            players,
            depth,
            random,
            max_turns,
        }) => run_play(players, depth, random, max_turns),
        Some(Command::Tui { depth }) => {
            InteractiveGame::new(SearchConfig::depth(depth))
                .run()
                .context("terminal UI failed")?;
            Ok(())
        }
        Some(Command::Show { position }) => run_show(position.as_deref()),
        Some(Command::Eval { position }) => run_eval(position.as_deref()),
        Some(Command::Search { position, depth }) => run_search(position.as_deref(), depth),
        Some(Command::Perft { depth, position }) => run_perft(depth, position.as_deref()),
    }
}

fn load_position(position: Option<&str>) -> Result<GameState> {
    match position {
        Some(text) => {
            GameState::from_position(text).with_context(|| format!("bad position '{text}'"))
        }
        None => Ok(GameState::new()),
    }
}

fn run_play(players: Option<u8>, depth: u8, random: bool, max_turns: Option<u32>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let players = match players {
        Some(n) => n,
        None => ask_players(&mut input, &mut out)?,
    };
    log::debug!("starting a game with {players} human player(s), engine depth {depth}");

    let seats = seats_for(players, depth, random)?;
    let mut game = Game::new(GameState::new(), seats).with_max_turns(max_turns);
    if game.run(&mut input, &mut out)?.is_none() {
        log::info!("stopped after {} turns", game.state().ply);
    }
    Ok(())
}

fn run_show(position: Option<&str>) -> Result<()> {
    let state = load_position(position)?;
    println!("As seen by {}:\n{}\n", Player::A, state.board.render(Player::A));
    println!("As seen by {}:\n{}\n", Player::B, state.board.render(Player::B));
    println!("Position: {}", state.to_position());
    println!("{} to move", state.turn);
    Ok(())
}

fn run_eval(position: Option<&str>) -> Result<()> {
    let state = load_position(position)?;
    println!("{}\n", state.board);
    println!("Evaluation: {}", state.evaluate());
    println!("(+ favors {}, - favors {})", Player::B, Player::A);
    Ok(())
}

fn run_search(position: Option<&str>, depth: u8) -> Result<()> {
    let state = load_position(position)?;
    println!("Position: {}", state.to_position());
    println!("Searching {} to depth {depth}...", state.turn);

    let start = Instant::now();
    let result = search_with_config(&state.board, state.turn, &SearchConfig::depth(depth));
    let elapsed = start.elapsed();

    match &result.best_move {
        Some(best_move) => {
            println!("\nBest move: {best_move}");
            println!("Score: {}", result.score);
            let line: Vec<String> = result
                .principal_variation
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("Line: {}", line.join(" / "));
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            println!("\nExpected position:\n{}", result.leaf);
        }
        None => println!("No legal moves available"),
    }
    Ok(())
}

fn run_perft(depth: u8, position: Option<&str>) -> Result<()> {
    let state = load_position(position)?;
    println!("Running perft({depth})...");
    println!("Position: {}", state.to_position());

    if depth <= 3 {
        let results = perft_divide(&state.board, state.turn, depth);
        let mut total = 0;

        for (mv, count) in &results {
            println!("{mv}: {count}");
            total += count;
        }

        println!("\nTotal: {total}");
    } else {
        let start = Instant::now();
        let results = perft_detailed(&state.board, state.turn, depth);
        let elapsed = start.elapsed();

        println!("Nodes: {}", results.nodes);
        println!("Captures: {}", results.captures);
        println!("Pieces taken: {}", results.pieces_taken);
        println!("Promotions: {}", results.promotions);
        println!("Wins: {}", results.wins);
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", results.nodes as f64 / elapsed.as_secs_f64());
    }

    if position.is_none() {
        println!("(starting position: {})", positions::STARTING);
    }
    Ok(())
}
