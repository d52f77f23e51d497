//! Whole-game bookkeeping on top of the board: side to move, history and
//! the checks a human move must pass before it is applied.
use crate::board::Board;
use crate::move_gen::{has_capture, legal_moves};
use crate::rules::{apply_move, RejectionReason};
use crate::types::{is_jump_leg, Move, Player};
use thiserror::Error;

/// Why a complete turn entered by a player was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("{0}")]
    Rejected(#[from] RejectionReason),
    #[error("Invalid move: you must jump")]
    MustCapture,
    #[error("Only jumps can be chained")]
    ChainNotJump,
}

/// Creates the standard starting board.
pub fn new_game() -> Board {
    Board::starting_position()
}

/// Reports the winner if one side has no pieces or no legal moves.
///
/// Piece counts are checked first; then A's mobility, then B's.
pub fn is_game_over(board: &Board) -> Option<Player> {
    if board.count(Player::A) == 0 {
        return Some(Player::B);
    }
    if board.count(Player::B) == 0 {
        return Some(Player::A);
    }
    if legal_moves(board, Player::A).is_empty() {
        return Some(Player::B);
    }
    if legal_moves(board, Player::B).is_empty() {
        return Some(Player::A);
    }
    None
}

/// Checks a full turn for `player` and returns the resulting board.
///
/// The first leg must be legal and respect compulsory capture; every later
/// leg must be a further jump by the same piece.
pub fn validate_move(board: &Board, player: Player, mv: &Move) -> Result<Board, MoveError> {
    let mut legs = mv.legs();
    let Some((from, to)) = legs.next() else {
        return Ok(board.clone());
    };

    if has_capture(board, player) && !is_jump_leg(from, to) {
        return Err(MoveError::MustCapture);
    }
    let mut current = apply_move(board, player, from, to)?;

    for (from, to) in legs {
        if !is_jump_leg(from, to) {
            return Err(MoveError::ChainNotJump);
        }
        current = apply_move(&current, player, from, to)?;
    }

    Ok(current)
}

/// Complete state of a game in progress.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GameState {
    /// The current board position
    pub board: Board,
    /// Which side is to move
    pub turn: Player,
    /// Number of turns played so far
    pub ply: u32,
    /// Every turn played, oldest first
    pub history: Vec<Move>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a new game in the starting position, A to move.
    pub fn new() -> Self {
        Self::from_board(new_game(), Player::A)
    }

    /// Creates a game from an arbitrary board.
    pub fn from_board(board: Board, turn: Player) -> Self {
        Self {
            board,
            turn,
            ply: 0,
            history: Vec::new(),
        }
    }

    /// Validates and plays a full turn for the side to move.
    pub fn play(&self, mv: &Move) -> Result<Self, MoveError> {
        let board = validate_move(&self.board, self.turn, mv)?;
        log::trace!("{} plays {mv} at ply {}", self.turn, self.ply);
        Ok(self.advance(board, mv.clone()))
    }

    /// Records a turn whose resulting board was already computed.
    pub fn advance(&self, board: Board, mv: Move) -> Self {
        let mut history = self.history.clone();
        history.push(mv);
        Self {
            board,
            turn: self.turn.opponent(),
            ply: self.ply + 1,
            history,
        }
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, self.turn)
    }

    /// The winner, if the side to move has no pieces or cannot move.
    pub fn outcome(&self) -> Option<Player> {
        if self.board.count(self.turn) == 0 || self.legal_moves().is_empty() {
            Some(self.turn.opponent())
        } else {
            None
        }
    }
}
