use checkers_agents::{search_with_config, SearchConfig};
use checkers_core::{full_turns, Coord, GameState, Move, Player};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
    ExecutableCommand,
};
use std::io::{self, Write};

/// Cursor-driven game against the engine. The human plays Player 1 (`o`).
pub struct InteractiveGame {
    state: GameState,
    config: SearchConfig,
    cursor_pos: (u8, u8), // (file, rank) in 0-7 range
    /// Cells picked so far for the turn being entered
    path: Vec<Coord>,
    message: String,
    /// Positions before each of the human's turns
    undo_stack: Vec<GameState>,
}

impl InteractiveGame {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            state: GameState::new(),
            config,
            cursor_pos: (0, 2), // A2
            path: Vec::new(),
            message: String::from("Use hjkl to move, Enter to pick cells, q to quit"),
            undo_stack: Vec::new(),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(Hide)?;
        stdout.execute(Clear(ClearType::All))?;

        let result = self.game_loop();

        stdout.execute(Show)?;
        terminal::disable_raw_mode()?;
        stdout.execute(Clear(ClearType::All))?;
        stdout.execute(MoveTo(0, 0))?;

        result
    }

    fn game_loop(&mut self) -> io::Result<()> {
        loop {
            self.draw_board()?;

            if let Some(winner) = self.state.outcome() {
                self.message = format!("{winner} wins! Press any key.");
                self.draw_board()?;
                event::read()?;
                break;
            }

            if let Event::Key(KeyEvent { code, kind, .. }) = event::read()? {
                if kind != KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1, 0),
                    KeyCode::Char('j') | KeyCode::Down => self.move_cursor(0, -1),
                    KeyCode::Char('k') | KeyCode::Up => self.move_cursor(0, 1),
                    KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1, 0),
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        if self.handle_selection() && self.state.outcome().is_none() {
                            self.engine_move()?;
                        }
                    }
                    KeyCode::Backspace => {
                        self.path.clear();
                        self.message = String::from("Selection cleared");
                    }
                    KeyCode::Char('u') => self.undo_move(),
                    KeyCode::Char('n') => self.new_game(),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn move_cursor(&mut self, dx: i8, dy: i8) {
        let new_file = self.cursor_pos.0 as i8 + dx;
        let new_rank = self.cursor_pos.1 as i8 + dy;

        if (0..8).contains(&new_file) && (0..8).contains(&new_rank) {
            self.cursor_pos = (new_file as u8, new_rank as u8);
        }
    }

    fn cursor_coord(&self) -> Option<Coord> {
        Coord::from_indices(self.cursor_pos.0, self.cursor_pos.1)
    }

    /// Complete turns that start with the cells picked so far.
    fn matching_turns(&self) -> Vec<Move> {
        full_turns(&self.state.board, self.state.turn)
            .into_iter()
            .filter(|turn| turn.path().starts_with(&self.path))
            .collect()
    }

    /// Cells that would extend the current selection toward a legal turn.
    fn next_cells(&self) -> Vec<Coord> {
        if self.path.is_empty() {
            return Vec::new();
        }
        self.matching_turns()
            .iter()
            .filter_map(|turn| turn.path().get(self.path.len()).copied())
            .collect()
    }

    /// Handles Enter on the cursor cell. Returns true once the human's turn
    /// has been played.
    fn handle_selection(&mut self) -> bool {
        let Some(cell) = self.cursor_coord() else {
            return false;
        };

        if self.path.is_empty() {
            if self.state.board.is_owned_by(cell, self.state.turn) {
                self.path.push(cell);
                self.message = format!("Selected {cell}");
            } else {
                self.message = format!("No piece of yours on {cell}");
            }
            return false;
        }

        // Picking the last cell again ends a capture chain early.
        if self.path.last() == Some(&cell) {
            if self.path.len() < 2 {
                self.path.clear();
                self.message = String::from("Selection cleared");
                return false;
            }
            return self.submit();
        }

        self.path.push(cell);
        let matching = self.matching_turns();
        if matching.is_empty() {
            return self.submit();
        }
        if matching.iter().any(|turn| turn.path() == self.path.as_slice()) {
            return self.submit();
        }
        self.message = format!("Keep jumping from {cell}");
        false
    }

    fn submit(&mut self) -> bool {
        let path = std::mem::take(&mut self.path);
        let Some(mv) = Move::from_path(path) else {
            return false;
        };

        match self.state.play(&mv) {
            Ok(next) => {
                self.undo_stack.push(self.state.clone());
                self.state = next;
                self.message = format!("Moved: {mv}");
                true
            }
            Err(e) => {
                self.message = e.to_string();
                false
            }
        }
    }

    fn engine_move(&mut self) -> io::Result<()> {
        self.message = String::from("Engine thinking...");
        self.draw_board()?;

        let result = search_with_config(&self.state.board, self.state.turn, &self.config);

        match result.best_move {
            Some(mv) => match self.state.play(&mv) {
                Ok(next) => {
                    self.state = next;
                    self.message = format!("Engine played: {mv} (score {})", result.score);
                }
                Err(e) => {
                    log::error!("engine produced an illegal turn {mv}: {e}");
                    self.message = format!("Engine failed: {e}");
                }
            },
            None => self.message = String::from("Engine has no move"),
        }

        Ok(())
    }

    fn undo_move(&mut self) {
        match self.undo_stack.pop() {
            Some(previous) => {
                self.state = previous;
                self.path.clear();
                self.message = String::from("Undid last move");
            }
            None => self.message = String::from("Nothing to undo"),
        }
    }

    fn new_game(&mut self) {
        self.state = GameState::new();
        self.undo_stack.clear();
        self.path.clear();
        self.cursor_pos = (0, 2);
        self.message = String::from("New game started!");
    }

    fn draw_board(&self) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.execute(MoveTo(0, 0))?;
        stdout.execute(Clear(ClearType::FromCursorDown))?;

        stdout.execute(Print("Checkers - Interactive Mode (vim keys: hjkl)\r\n"))?;
        stdout.execute(Print(
            "Enter=pick cell (again on the last cell to stop a chain), Backspace=clear, u=undo, n=new, q=quit\r\n\r\n",
        ))?;

        let targets = self.next_cells();
        stdout.execute(Print("   A B C D E F G H\r\n"))?;

        for rank_idx in (0..8u8).rev() {
            stdout.execute(Print(format!("{rank_idx} ")))?;

            for file_idx in 0..8u8 {
                let Some(cell) = Coord::from_indices(file_idx, rank_idx) else {
                    continue;
                };

                let background = if self.cursor_pos == (file_idx, rank_idx) {
                    TermColor::Yellow
                } else if self.path.contains(&cell) {
                    TermColor::Green
                } else if targets.contains(&cell) {
                    TermColor::Blue
                } else if cell.is_dark() {
                    TermColor::DarkGrey
                } else {
                    TermColor::Black
                };
                stdout.execute(SetBackgroundColor(background))?;

                match self.state.board.piece_at(cell) {
                    Some(piece) => {
                        let color = match piece.owner {
                            Player::A => TermColor::White,
                            Player::B => TermColor::Red,
                        };
                        stdout.execute(SetForegroundColor(color))?;
                        stdout.execute(Print(format!(" {}", piece.to_char())))?;
                    }
                    None => {
                        stdout.execute(Print("  "))?;
                    }
                }

                stdout.execute(ResetColor)?;
            }

            stdout.execute(Print(format!(" {rank_idx}\r\n")))?;
        }

        stdout.execute(Print("   A B C D E F G H\r\n\r\n"))?;
        stdout.execute(Print(format!(
            "{} to move | Turn {}\r\n\r\n{}\r\n",
            self.state.turn,
            self.state.ply + 1,
            self.message
        )))?;

        stdout.flush()?;
        Ok(())
    }
}
