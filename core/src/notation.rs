//! Text forms of coordinates and moves: `A0`-style tokens, whitespace separated.

use crate::types::{Coord, File, Move, Rank};
use thiserror::Error;

/// Errors raised while reading coordinates, moves, boards or position strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("invalid coordinate '{0}' (expected a file A-H followed by a rank 0-7)")]
    InvalidCoord(String),
    #[error("a move needs at least two coordinates, got {0}")]
    TooFewCoords(usize),
    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

/// Parses a two-character coordinate such as `A0` or `h7`.
pub fn parse_coord(token: &str) -> Result<Coord, NotationError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(f), Some(r), None) => match (File::from_char(f), Rank::from_char(r)) {
            (Some(file), Some(rank)) => Ok(Coord::new(file, rank)),
            _ => Err(NotationError::InvalidCoord(token.to_string())),
        },
        _ => Err(NotationError::InvalidCoord(token.to_string())),
    }
}

/// Parses a whole turn such as `"C2 E4 G6"`.
pub fn parse_move(text: &str) -> Result<Move, NotationError> {
    let path = text
        .split_whitespace()
        .map(parse_coord)
        .collect::<Result<Vec<_>, _>>()?;
    let len = path.len();
    Move::from_path(path).ok_or(NotationError::TooFewCoords(len))
}
