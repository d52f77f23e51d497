use crate::evaluation::{score, LOSS, WIN};
use crate::jump_chain::{play_turn, prefers};
use checkers_core::{legal_moves, Board, Move, Player};

/// Search depth used when nothing else is asked for.
pub const DEFAULT_DEPTH: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched below the root before positions are scored statically.
    /// Zero scores each root move directly.
    pub max_depth: u8,
}

impl SearchConfig {
    pub fn depth(max_depth: u8) -> Self {
        Self { max_depth }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::depth(DEFAULT_DEPTH)
    }
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Full turn to play, jump chains included. None when the side has no move.
    pub best_move: Option<Move>,
    /// Backed-up score from B's point of view
    pub score: i32,
    /// Expected line of play starting with `best_move`
    pub principal_variation: Vec<Move>,
    /// Board at the end of the principal variation
    pub leaf: Board,
    pub depth: u8,
    pub nodes: u64,
}

/// Outcome of searching one position: the board the line ends on, its score
/// and the turns leading there.
struct Node {
    board: Board,
    score: i32,
    path: Vec<Move>,
}

impl Node {
    fn terminal(board: &Board, side: Player) -> Self {
        Node {
            board: board.clone(),
            score: worst_for(side),
            path: Vec::new(),
        }
    }
}

struct SearchInfo {
    max_depth: u8,
    nodes: u64,
}

fn worst_for(side: Player) -> i32 {
    match side {
        Player::B => LOSS,
        Player::A => WIN,
    }
}

/// Searches `board` for `side` to the given depth.
pub fn search(board: &Board, side: Player, depth: u8) -> SearchResult {
    search_with_config(board, side, &SearchConfig::depth(depth))
}

pub fn search_with_config(board: &Board, side: Player, config: &SearchConfig) -> SearchResult {
    let mut info = SearchInfo {
        max_depth: config.max_depth,
        nodes: 0,
    };

    let root_bound = worst_for(side.opponent());
    let node = best_move_for(side, board, 0, root_bound, &mut info);

    let result = SearchResult {
        best_move: node.path.first().cloned(),
        score: node.score,
        principal_variation: node.path,
        leaf: node.board,
        depth: config.max_depth,
        nodes: info.nodes,
    };

    match &result.best_move {
        Some(mv) => log::debug!(
            "{side} plays {mv} (score {}, depth {}, {} nodes)",
            result.score,
            result.depth,
            result.nodes
        ),
        None => log::debug!("{side} has no legal move"),
    }

    result
}

/// Picks B's move with the default configuration.
///
/// Returns None only when B has no legal move.
pub fn ai_select_move(board: &Board) -> Option<Move> {
    search_with_config(board, Player::B, &SearchConfig::default()).best_move
}

/// Depth-first minimax for one side.
///
/// B maximizes and A minimizes the score. `bound` is the best value the
/// parent has secured so far: as soon as a child reaches it, the parent will
/// not choose this line and the search returns early.
fn best_move_for(side: Player, board: &Board, depth: u8, bound: i32, info: &mut SearchInfo) -> Node {
    let mut best: Option<Node> = None;

    for mv in legal_moves(board, side) {
        let Some((turn, child)) = play_turn(board, side, &mv) else {
            continue;
        };
        info.nodes += 1;

        let mut node = if depth >= info.max_depth {
            Node {
                score: score(&child),
                board: child,
                path: Vec::new(),
            }
        } else {
            let running = best.as_ref().map_or(worst_for(side), |n| n.score);
            best_move_for(side.opponent(), &child, depth + 1, running, info)
        };
        node.path.insert(0, turn);

        if node.score == bound || prefers(side, node.score, bound) {
            log::trace!("cutoff for {side} at depth {depth}: {} vs {bound}", node.score);
            return node;
        }

        let improves = match &best {
            None => true,
            Some(current) => prefers(side, node.score, current.score),
        };
        if improves {
            best = Some(node);
        }
    }

    best.unwrap_or_else(|| Node::terminal(board, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::{parse_coord, parse_move, positions, Coord, Piece};

    fn c(s: &str) -> Coord {
        parse_coord(s).unwrap()
    }

    /// Plain minimax without cutoffs, for comparison.
    fn full_minimax(side: Player, board: &Board, depth: u8, max_depth: u8) -> i32 {
        let mut best: Option<i32> = None;
        for mv in legal_moves(board, side) {
            let (_, child) = play_turn(board, side, &mv).unwrap();
            let value = if depth >= max_depth {
                score(&child)
            } else {
                full_minimax(side.opponent(), &child, depth + 1, max_depth)
            };
            best = match best {
                Some(b) if !prefers(side, value, b) => Some(b),
                _ => Some(value),
            };
        }
        best.unwrap_or(worst_for(side))
    }

    #[test]
    fn test_default_config() {
        assert_eq!(SearchConfig::default().max_depth, 5);
        assert_eq!(SearchConfig::depth(3), SearchConfig { max_depth: 3 });
    }

    #[test]
    fn test_depth_zero_prefers_crowning_capture() {
        let mut board = Board::empty();
        board.set_piece(c("C2"), Some(Piece::new(Player::B)));
        board.set_piece(c("G6"), Some(Piece::new(Player::B)));
        board.set_piece(c("D1"), Some(Piece::new(Player::A)));
        board.set_piece(c("F5"), Some(Piece::new(Player::A)));
        board.set_piece(c("A0"), Some(Piece::new(Player::A)));

        let result = search(&board, Player::B, 0);
        assert_eq!(result.best_move, Some(parse_move("C2 E0").unwrap()));
        assert_eq!(result.score, 2);
        assert_eq!(result.leaf.piece_at(c("E0")), Some(Piece::king(Player::B)));
        assert_eq!(result.nodes, 2);
    }

    #[test]
    fn test_a_minimizes() {
        let mut board = Board::empty();
        board.set_piece(c("D3"), Some(Piece::new(Player::A)));
        board.set_piece(c("C4"), Some(Piece::new(Player::B)));
        board.set_piece(c("E4"), Some(Piece::new(Player::B)));

        let result = search(&board, Player::A, 0);
        assert_eq!(result.best_move, Some(parse_move("D3 B5").unwrap()));
        assert_eq!(result.score, -2);
    }

    #[test]
    fn test_tied_root_moves_keep_first() {
        let mut board = Board::empty();
        board.set_piece(c("D4"), Some(Piece::king(Player::B)));
        board.set_piece(c("A0"), Some(Piece::new(Player::A)));

        // Every king step scores the same, so the first generated one stays.
        let result = search(&board, Player::B, 0);
        assert_eq!(result.best_move, Some(parse_move("D4 C3").unwrap()));
        assert_eq!(result.score, 1);
        assert_eq!(result.nodes, 4);
    }

    #[test]
    fn test_forced_jump_is_chosen() {
        let board = Board::from_position(positions::B_MUST_JUMP).unwrap();
        let mv = ai_select_move(&board).unwrap();

        assert!(mv.is_jump());
        assert!(mv.from() == c("D5") || mv.from() == c("F5"));
    }

    #[test]
    fn test_no_moves_is_terminal() {
        let mut board = Board::empty();
        board.set_piece(c("D3"), Some(Piece::new(Player::A)));

        let result = search(&board, Player::B, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, LOSS);
        assert!(result.principal_variation.is_empty());
        assert_eq!(ai_select_move(&board), None);

        // A captures nothing but still leaves B without a reply.
        let result = search(&board, Player::A, 3);
        assert!(result.best_move.is_some());
        assert_eq!(result.score, LOSS);
    }

    #[test]
    fn test_principal_variation_reaches_full_depth() {
        let board = Board::starting_position();
        let result = search(&board, Player::B, 2);

        assert_eq!(result.principal_variation.len(), 3);
        assert_eq!(result.best_move.as_ref(), result.principal_variation.first());
        assert!(result.nodes > 0);
    }

    #[test]
    fn test_cutoffs_keep_minimax_value() {
        for layout in [positions::STARTING, positions::B_MUST_JUMP] {
            let board = Board::from_position(layout).unwrap();
            for side in [Player::A, Player::B] {
                for depth in 0..=2 {
                    let result = search(&board, side, depth);
                    assert_eq!(result.score, full_minimax(side, &board, 0, depth));
                }
            }
        }
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = Board::from_position(positions::B_MUST_JUMP).unwrap();
        let first = search(&board, Player::B, 3);
        let second = search(&board, Player::B, 3);

        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes, second.nodes);
    }
}
