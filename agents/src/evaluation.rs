use checkers_core::{Board, Coord, GameState, Piece, Player};

/// Score of a position where A has no pieces left.
pub const WIN: i32 = 1337;
/// Score of a position where B has no pieces left.
pub const LOSS: i32 = -WIN;

/// Value of a crowned piece, wherever it stands.
pub const KING_VALUE: i32 = 5;

/// Static evaluation from B's point of view.
///
/// Positive scores favor B, negative favor A. A side with no pieces left
/// yields [`WIN`] or [`LOSS`]; otherwise the result is the sum of
/// [`piece_value`] over B's pieces minus the same over A's, which stays far
/// below those sentinels.
pub fn score(board: &Board) -> i32 {
    let mut has_a = false;
    let mut has_b = false;
    let mut total = 0;

    for (coord, piece) in board.pieces() {
        match piece.owner {
            Player::A => {
                has_a = true;
                total -= piece_value(coord, piece);
            }
            Player::B => {
                has_b = true;
                total += piece_value(coord, piece);
            }
        }
    }

    if !has_a {
        return WIN;
    }
    if !has_b {
        return LOSS;
    }

    total
}

/// Unsigned worth of one piece.
///
/// Kings are worth [`KING_VALUE`]. Men are worth
/// `round(max(|rank - 3.5|, |file - 3.5|) + 0.5)`: 1 on the four centre
/// cells rising to 4 on the edge. Doubling the coordinates keeps it in
/// integers: `|2r - 7|` is odd, so `(max + 1) / 2` is exact.
pub fn piece_value(coord: Coord, piece: Piece) -> i32 {
    if piece.is_king {
        return KING_VALUE;
    }
    let rank = (2 * coord.rank().index() as i32 - 7).abs();
    let file = (2 * coord.file().index() as i32 - 7).abs();
    (rank.max(file) + 1) / 2
}

/// Positions that can be scored statically.
pub trait Evaluatable {
    /// Score from B's point of view, as [`score`].
    fn evaluate(&self) -> i32;
}

impl Evaluatable for Board {
    fn evaluate(&self) -> i32 {
        score(self)
    }
}

impl Evaluatable for GameState {
    fn evaluate(&self) -> i32 {
        score(&self.board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::{parse_coord, positions};

    fn c(s: &str) -> Coord {
        parse_coord(s).unwrap()
    }

    #[test]
    fn test_starting_position_is_balanced() {
        assert_eq!(score(&Board::starting_position()), 0);
    }

    #[test]
    fn test_piece_values_by_ring() {
        let man = Piece::new(Player::B);
        assert_eq!(piece_value(c("D3"), man), 1);
        assert_eq!(piece_value(c("E4"), man), 1);
        assert_eq!(piece_value(c("C2"), man), 2);
        assert_eq!(piece_value(c("F5"), man), 2);
        assert_eq!(piece_value(c("B1"), man), 3);
        assert_eq!(piece_value(c("D1"), man), 3);
        assert_eq!(piece_value(c("A0"), man), 4);
        assert_eq!(piece_value(c("H3"), man), 4);
        assert_eq!(piece_value(c("D3"), Piece::king(Player::A)), KING_VALUE);
    }

    #[test]
    fn test_sign_follows_owner() {
        let mut board = Board::empty();
        board.set_piece(c("A0"), Some(Piece::new(Player::A)));
        board.set_piece(c("D3"), Some(Piece::king(Player::B)));
        assert_eq!(score(&board), 5 - 4);

        board.set_piece(c("D3"), Some(Piece::new(Player::B)));
        assert_eq!(score(&board), 1 - 4);
    }

    #[test]
    fn test_sentinels() {
        let mut board = Board::empty();
        board.set_piece(c("D3"), Some(Piece::new(Player::B)));
        assert_eq!(score(&board), WIN);

        let mut board = Board::empty();
        board.set_piece(c("D3"), Some(Piece::new(Player::A)));
        assert_eq!(score(&board), LOSS);

        // Twelve kings a side is the most material there can be.
        let full = Board::from_position("XXXXXXXX/XXXX4/8/8/8/8/8/O7").unwrap();
        assert!(score(&full).abs() < WIN);
        let crowded = Board::from_position(positions::STARTING).unwrap();
        assert!(score(&crowded).abs() < WIN);
    }

    #[test]
    fn test_trait_matches_free_function() {
        let state = GameState::from_position(positions::B_MUST_JUMP).unwrap();
        assert_eq!(state.evaluate(), score(&state.board));
        assert_eq!(state.board.evaluate(), score(&state.board));
    }
}
