use crate::board::Board;
use crate::move_gen::full_turns;
use crate::rules::apply_path;
use crate::types::{Move, Player};

/// Perft (performance test) results at each depth.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PerftResults {
    pub nodes: u64,
    /// Leaf turns that captured at least one piece
    pub captures: u64,
    /// Pieces removed across all leaf turns
    pub pieces_taken: u64,
    /// Leaf turns that crowned a man
    pub promotions: u64,
    /// Leaf positions where the side to move next has no reply
    pub wins: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.pieces_taken += other.pieces_taken;
        self.promotions += other.promotions;
        self.wins += other.wins;
    }
}

/// Counts complete turn sequences of the given length, `player` moving first.
pub fn perft(board: &Board, player: Player, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let turns = full_turns(board, player);

    if depth == 1 {
        return turns.len() as u64;
    }

    turns
        .iter()
        .filter_map(|mv| apply_path(board, player, mv).ok())
        .map(|next| perft(&next, player.opponent(), depth - 1))
        .sum()
}

/// Per-root-move breakdown of [`perft`].
pub fn perft_divide(board: &Board, player: Player, depth: u8) -> Vec<(Move, u64)> {
    let mut results = Vec::new();

    for mv in full_turns(board, player) {
        let Ok(next) = apply_path(board, player, &mv) else {
            continue;
        };
        let nodes = if depth <= 1 {
            1
        } else {
            perft(&next, player.opponent(), depth - 1)
        };
        results.push((mv, nodes));
    }

    results
}

/// Performs perft with statistics about the leaf turns.
pub fn perft_detailed(board: &Board, player: Player, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for mv in full_turns(board, player) {
        let Ok(next) = apply_path(board, player, &mv) else {
            continue;
        };

        if depth == 1 {
            results.nodes += 1;

            let taken = board.count(player.opponent()) - next.count(player.opponent());
            if taken > 0 {
                results.captures += 1;
                results.pieces_taken += taken as u64;
            }

            let was_king = board.piece_at(mv.from()).is_some_and(|p| p.is_king);
            let is_king = next.piece_at(mv.to()).is_some_and(|p| p.is_king);
            if is_king && !was_king {
                results.promotions += 1;
            }

            if full_turns(&next, player.opponent()).is_empty() {
                results.wins += 1;
            }
        } else {
            let child_results = perft_detailed(&next, player.opponent(), depth - 1);
            results.add(&child_results);
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_coord;
    use crate::types::Piece;

    /// Node counts from the starting position, A moving first.
    const STARTING_PERFT: &[(u8, u64)] = &[(1, 7), (2, 49), (3, 302)];

    #[test]
    fn test_perft_starting_position() {
        let board = Board::starting_position();

        for &(depth, expected) in STARTING_PERFT {
            let result = perft(&board, Player::A, depth);
            assert_eq!(
                result, expected,
                "Perft({}) failed: expected {}, got {}",
                depth, expected, result
            );
        }
    }

    #[test]
    fn test_perft_divide_sums_to_perft() {
        let board = Board::starting_position();
        let divided = perft_divide(&board, Player::A, 2);

        assert_eq!(divided.len(), 7);
        assert_eq!(
            divided.iter().map(|(_, n)| n).sum::<u64>(),
            perft(&board, Player::A, 2)
        );
    }

    #[test]
    fn test_perft_detailed_counts_captures_and_crowns() {
        let mut board = Board::empty();
        board.set_piece(parse_coord("C2").unwrap(), Some(Piece::new(Player::B)));
        board.set_piece(parse_coord("D1").unwrap(), Some(Piece::new(Player::A)));

        let results = perft_detailed(&board, Player::B, 1);
        assert_eq!(results.nodes, 1);
        assert_eq!(results.captures, 1);
        assert_eq!(results.pieces_taken, 1);
        assert_eq!(results.promotions, 1);
        assert_eq!(results.wins, 1);
    }
}
