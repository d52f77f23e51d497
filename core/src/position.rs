use crate::board::Board;
use crate::game_state::GameState;
use crate::notation::NotationError;
use crate::types::{Coord, File, Piece, Player, Rank};

/// Compact one-line position strings.
///
/// The layout lists ranks 7 down to 0 separated by `/`. Within a rank, files
/// run A to H; digits count empty cells and `o`, `x`, `O`, `X` are pieces.
/// An optional second field names the side to move: `o` for A, `x` for B.
impl Board {
    /// Parses a position layout such as [`positions::STARTING`].
    pub fn from_position(layout: &str) -> Result<Self, NotationError> {
        let mut board = Board::empty();
        let ranks: Vec<&str> = layout.split('/').collect();

        if ranks.len() != 8 {
            return Err(NotationError::InvalidFormat(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        for (row, rank_str) in ranks.iter().enumerate() {
            let rank_idx = 7 - row as u8;
            let rank = Rank::new(rank_idx).ok_or_else(|| {
                NotationError::InvalidFormat(format!("rank {rank_idx} out of range"))
            })?;
            let mut file_idx = 0u8;

            for ch in rank_str.chars() {
                if file_idx >= 8 {
                    return Err(NotationError::InvalidFormat(format!(
                        "too many cells in rank {rank_idx}"
                    )));
                }

                if let Some(empty_count) = ch.to_digit(10) {
                    file_idx += empty_count as u8;
                } else {
                    let piece = Piece::from_char(ch).ok_or(NotationError::InvalidPiece(ch))?;
                    let file = File::new(file_idx).ok_or_else(|| {
                        NotationError::InvalidFormat(format!("file {file_idx} out of range"))
                    })?;
                    board.set_piece(Coord::new(file, rank), Some(piece));
                    file_idx += 1;
                }
            }

            if file_idx != 8 {
                return Err(NotationError::InvalidFormat(format!(
                    "rank {rank_idx} has {file_idx} cells, expected 8"
                )));
            }
        }

        Ok(board)
    }

    /// Serializes the layout. Inverse of [`Board::from_position`].
    pub fn to_position(&self) -> String {
        let mut out = String::new();

        for rank_idx in (0..8u8).rev() {
            let mut empty_count = 0;

            for file_idx in 0..8u8 {
                match Coord::from_indices(file_idx, rank_idx).and_then(|c| self.piece_at(c)) {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }

            if empty_count > 0 {
                out.push_str(&empty_count.to_string());
            }
            if rank_idx > 0 {
                out.push('/');
            }
        }

        out
    }
}

impl GameState {
    /// Parses `"<layout> [o|x]"`. The side to move defaults to A.
    pub fn from_position(text: &str) -> Result<Self, NotationError> {
        let parts: Vec<&str> = text.split_whitespace().collect();

        let (layout, turn) = match parts.as_slice() {
            [layout] => (*layout, Player::A),
            [layout, "o"] => (*layout, Player::A),
            [layout, "x"] => (*layout, Player::B),
            [_, other] => {
                return Err(NotationError::InvalidFormat(format!(
                    "side to move must be 'o' or 'x', got '{other}'"
                )))
            }
            _ => {
                return Err(NotationError::InvalidFormat(format!(
                    "expected 1 or 2 fields, got {}",
                    parts.len()
                )))
            }
        };

        Ok(GameState::from_board(Board::from_position(layout)?, turn))
    }

    /// Serializes the board and side to move.
    pub fn to_position(&self) -> String {
        let side = match self.turn {
            Player::A => 'o',
            Player::B => 'x',
        };
        format!("{} {}", self.board.to_position(), side)
    }
}

/// Reference positions.
pub mod positions {
    /// Starting position.
    pub const STARTING: &str = "1x1x1x1x/x1x1x1x1/1x1x1x1x/8/8/o1o1o1o1/1o1o1o1o/o1o1o1o1";

    /// A man on E4 that B can take two ways (D5-F3, F5-D3), plus plenty of steps.
    pub const B_MUST_JUMP: &str = "1x1x1x1x/x1x1x1x1/1x1x1x2/4o3/8/o1o1o1o1/1o1o1o1o/o1o1o3";

    /// Lone kings in opposite corners.
    pub const BARE_KINGS: &str = "7X/8/8/8/8/8/8/O7";
}
