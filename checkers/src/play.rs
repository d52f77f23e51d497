//! Line-based games on the terminal: humans type turns, engines answer.

use anyhow::{bail, Context, Result};
use checkers_agents::{Agent, MinimaxAgent, RandomAgent};
use checkers_core::{parse_move, GameState, Player};
use std::io::{BufRead, Write};

/// Who sits on one side of the board.
pub enum Seat {
    Human,
    Engine(Box<dyn Agent>),
}

/// Seats for a game with `players` humans: none, A only, or both.
///
/// Empty seats get a minimax engine searching `depth` plies, except that
/// with `random` set Player 1's engine picks its turns at random.
pub fn seats_for(players: u8, depth: u8, random: bool) -> Result<[Seat; 2]> {
    let engine = || Seat::Engine(Box::new(MinimaxAgent::new(depth)));
    let seats = match players {
        0 if random => [Seat::Engine(Box::new(RandomAgent::new())), engine()],
        0 => [engine(), engine()],
        1 => [Seat::Human, engine()],
        2 => [Seat::Human, Seat::Human],
        n => bail!("number of players must be 0, 1 or 2, got {n}"),
    };
    Ok(seats)
}

/// Asks on `input` how many humans will play until a valid answer arrives.
pub fn ask_players<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<u8> {
    write!(out, "Enter number of players (0, 1, 2): ")?;
    loop {
        out.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed before the number of players was given");
        }
        match line.trim() {
            "0" => return Ok(0),
            "1" => return Ok(1),
            "2" => return Ok(2),
            _ => write!(out, "Invalid number of players. Try again: ")?,
        }
    }
}

pub struct Game {
    state: GameState,
    seats: [Seat; 2],
    /// Show the board from the mover's side instead of always from A's
    flip_board: bool,
    max_turns: Option<u32>,
}

impl Game {
    pub fn new(state: GameState, seats: [Seat; 2]) -> Self {
        let flip_board = seats.iter().all(|s| matches!(s, Seat::Human));
        Self {
            state,
            seats,
            flip_board,
            max_turns: None,
        }
    }

    /// Stops the game without a winner after this many turns.
    pub fn with_max_turns(mut self, max_turns: Option<u32>) -> Self {
        self.max_turns = max_turns;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Plays until one side wins or the turn limit is hit.
    ///
    /// Returns the winner, or None if the limit stopped the game. Fails only
    /// on I/O errors or when `input` runs dry while a human is to move.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> Result<Option<Player>> {
        loop {
            let perspective = if self.flip_board {
                self.state.turn
            } else {
                Player::A
            };
            writeln!(out, "{}", self.state.board.render(perspective))?;

            if let Some(winner) = self.state.outcome() {
                log::info!("{winner} wins after {} turns", self.state.ply);
                writeln!(out, "{winner} wins")?;
                return Ok(Some(winner));
            }
            if self.max_turns.is_some_and(|max| self.state.ply >= max) {
                writeln!(out, "No winner after {} turns", self.state.ply)?;
                return Ok(None);
            }

            let side = self.state.turn;
            self.state = match &mut self.seats[side_index(side)] {
                Seat::Human => human_turn(&self.state, input, out)?,
                Seat::Engine(agent) => {
                    let mv = agent
                        .best_move(&self.state)
                        .with_context(|| format!("{} found no move", agent.name()))?;
                    writeln!(out, "{side} plays {mv}")?;
                    self.state.play(&mv)?
                }
            };
        }
    }
}

fn side_index(side: Player) -> usize {
    match side {
        Player::A => 0,
        Player::B => 1,
    }
}

/// Prompts until the human to move enters a turn the rules accept.
fn human_turn<R: BufRead, W: Write>(state: &GameState, input: &mut R, out: &mut W) -> Result<GameState> {
    loop {
        write!(
            out,
            "{}, enter move (ex. A2 B3 to move piece at A2 to B3): ",
            state.turn
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("input closed while {} was to move", state.turn);
        }

        let mv = match parse_move(&line) {
            Ok(mv) => mv,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match state.play(&mv) {
            Ok(next) => return Ok(next),
            Err(e) => {
                log::debug!("rejected {mv} for {}: {e}", state.turn);
                writeln!(out, "{e}")?;
            }
        }
    }
}
