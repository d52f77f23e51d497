//! Validation and application of single steps and single jumps.

use crate::board::Board;
use crate::types::{Coord, Move, Player};
use thiserror::Error;

/// Why a step or jump was refused. Every variant is recoverable: the caller
/// asks for another move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RejectionReason {
    #[error("There is no piece there!")]
    NoPieceAtOrigin,
    #[error("That's not your piece!")]
    NotOwner,
    #[error("There's already a piece in that space!")]
    DestinationOccupied,
    #[error("You can't move backwards!")]
    IllegalBackwardMove,
    #[error("That's not a diagonal move!")]
    NotDiagonal,
    #[error("You can't jump over nothing!")]
    EmptyMidpointOnJump,
    #[error("You can't jump over yourself!")]
    CannotCaptureOwnPiece,
}

/// Applies one step (distance 1) or one jump (distance 2) for `player`.
///
/// The input board is never touched; a new board is returned on success.
/// A man landing on its crowning rank becomes a king.
pub fn apply_move(
    board: &Board,
    player: Player,
    from: Coord,
    to: Coord,
) -> Result<Board, RejectionReason> {
    let piece = board
        .piece_at(from)
        .ok_or(RejectionReason::NoPieceAtOrigin)?;
    if piece.owner != player {
        return Err(RejectionReason::NotOwner);
    }
    if !board.is_empty(to) {
        return Err(RejectionReason::DestinationOccupied);
    }

    let (dr, df) = from.delta(to);
    if !piece.is_king && !player.is_forward(dr) {
        return Err(RejectionReason::IllegalBackwardMove);
    }
    if dr.abs() != df.abs() || !(1..=2).contains(&dr.abs()) {
        return Err(RejectionReason::NotDiagonal);
    }

    let mut next = board.clone();

    if dr.abs() == 2 {
        let jumped = from
            .midpoint(to)
            .ok_or(RejectionReason::NotDiagonal)?;
        match board.piece_at(jumped) {
            None => return Err(RejectionReason::EmptyMidpointOnJump),
            Some(victim) if victim.owner == player => {
                return Err(RejectionReason::CannotCaptureOwnPiece)
            }
            Some(_) => next.set_piece(jumped, None),
        }
    }

    next.move_piece(from, to);
    if !piece.is_king && to.rank() == player.crowning_rank() {
        next.set_piece(to, Some(piece.crowned()));
    }

    Ok(next)
}

/// Applies every leg of `mv` in order, stopping at the first rejection.
pub fn apply_path(board: &Board, player: Player, mv: &Move) -> Result<Board, RejectionReason> {
    mv.legs().try_fold(board.clone(), |current, (from, to)| {
        apply_move(&current, player, from, to)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{parse_coord, parse_move};
    use crate::types::Piece;

    fn c(s: &str) -> Coord {
        parse_coord(s).unwrap()
    }

    fn board_with(pieces: &[(&str, Piece)]) -> Board {
        let mut board = Board::empty();
        for (coord, piece) in pieces {
            board.set_piece(c(coord), Some(*piece));
        }
        board
    }

    #[test]
    fn test_opening_step() {
        let board = Board::starting_position();
        let next = apply_move(&board, Player::A, c("A2"), c("B3")).unwrap();

        assert!(next.is_empty(c("A2")));
        assert_eq!(next.piece_at(c("B3")), Some(Piece::new(Player::A)));
        assert_eq!(next.count(Player::A), 12);
        assert_eq!(next.count(Player::B), 12);
    }

    #[test]
    fn test_input_board_untouched() {
        let board = Board::starting_position();
        let snapshot = board.clone();

        let first = apply_move(&board, Player::A, c("C2"), c("D3"));
        let second = apply_move(&board, Player::A, c("C2"), c("D3"));

        assert_eq!(board, snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejections_in_order() {
        let board = board_with(&[
            ("C2", Piece::new(Player::A)),
            ("D3", Piece::new(Player::A)),
            ("B3", Piece::new(Player::B)),
            ("E4", Piece::new(Player::A)),
        ]);

        let cases = [
            ("A0", "B1", Player::A, RejectionReason::NoPieceAtOrigin),
            ("C2", "B1", Player::B, RejectionReason::NotOwner),
            ("C2", "D3", Player::A, RejectionReason::DestinationOccupied),
            ("C2", "B1", Player::A, RejectionReason::IllegalBackwardMove),
            ("C2", "C4", Player::A, RejectionReason::NotDiagonal),
            ("C2", "F5", Player::A, RejectionReason::NotDiagonal),
            ("C2", "G6", Player::A, RejectionReason::NotDiagonal),
            ("C2", "E4", Player::A, RejectionReason::DestinationOccupied),
            ("D3", "F5", Player::A, RejectionReason::CannotCaptureOwnPiece),
            ("E4", "G6", Player::A, RejectionReason::EmptyMidpointOnJump),
        ];

        for (from, to, player, expected) in cases {
            assert_eq!(
                apply_move(&board, player, c(from), c(to)),
                Err(expected),
                "{from} -> {to}"
            );
        }
        assert!(apply_move(&board, Player::A, c("C2"), c("A4")).is_ok());
    }

    #[test]
    fn test_sideways_counts_as_backward_for_men() {
        let board = board_with(&[("C2", Piece::new(Player::A))]);
        assert_eq!(
            apply_move(&board, Player::A, c("C2"), c("E2")),
            Err(RejectionReason::IllegalBackwardMove)
        );
    }

    #[test]
    fn test_jump_removes_victim() {
        let board = board_with(&[("C2", Piece::new(Player::A)), ("B3", Piece::new(Player::B))]);
        let next = apply_move(&board, Player::A, c("C2"), c("A4")).unwrap();

        assert!(next.is_empty(c("C2")));
        assert!(next.is_empty(c("B3")));
        assert_eq!(next.piece_at(c("A4")), Some(Piece::new(Player::A)));
        assert_eq!(next.count(Player::B), 0);
    }

    #[test]
    fn test_promotion_on_far_rank() {
        let board = board_with(&[("F6", Piece::new(Player::A)), ("B1", Piece::new(Player::B))]);

        let a = apply_move(&board, Player::A, c("F6"), c("G7")).unwrap();
        assert_eq!(a.piece_at(c("G7")), Some(Piece::king(Player::A)));

        let b = apply_move(&board, Player::B, c("B1"), c("A0")).unwrap();
        assert_eq!(b.piece_at(c("A0")), Some(Piece::king(Player::B)));
    }

    #[test]
    fn test_promotion_by_jump() {
        let board = board_with(&[("C2", Piece::new(Player::B)), ("D1", Piece::new(Player::A))]);
        let next = apply_move(&board, Player::B, c("C2"), c("E0")).unwrap();

        assert_eq!(next.piece_at(c("E0")), Some(Piece::king(Player::B)));
        assert!(next.is_empty(c("D1")));
    }

    #[test]
    fn test_kings_move_backward_and_stay_kings() {
        let board = board_with(&[("G7", Piece::king(Player::A))]);

        let back = apply_move(&board, Player::A, c("G7"), c("F6")).unwrap();
        assert_eq!(back.piece_at(c("F6")), Some(Piece::king(Player::A)));

        let again = apply_move(&back, Player::A, c("F6"), c("E5")).unwrap();
        assert_eq!(again.piece_at(c("E5")), Some(Piece::king(Player::A)));
    }

    #[test]
    fn test_apply_path_chain() {
        let board = board_with(&[
            ("A2", Piece::new(Player::A)),
            ("B3", Piece::new(Player::B)),
            ("D5", Piece::new(Player::B)),
        ]);
        let next = apply_path(&board, Player::A, &parse_move("A2 C4 E6").unwrap()).unwrap();

        assert_eq!(next.count(Player::B), 0);
        assert_eq!(next.piece_at(c("E6")), Some(Piece::new(Player::A)));
    }

    #[test]
    fn test_apply_path_stops_at_first_rejection() {
        let board = board_with(&[("A2", Piece::new(Player::A)), ("B3", Piece::new(Player::B))]);
        assert_eq!(
            apply_path(&board, Player::A, &parse_move("A2 C4 E6").unwrap()),
            Err(RejectionReason::EmptyMidpointOnJump)
        );
    }
}
