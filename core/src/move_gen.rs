use crate::board::Board;
use crate::rules::apply_move;
use crate::types::{Coord, Move, Piece, Player};

/// Generates all legal moves for `player`, each as a two-coordinate move.
///
/// Captures are compulsory: when any jump exists anywhere on the board the
/// result holds only jumps, otherwise only steps. Pieces are scanned rank 0
/// first, file A first, and each piece's directions in a fixed order, so the
/// output order is deterministic.
pub fn legal_moves(board: &Board, player: Player) -> Vec<Move> {
    let jumps = generate_jumps(board, player);
    if !jumps.is_empty() {
        return jumps;
    }
    generate_steps(board, player)
}

/// Returns true if `player` has at least one jump available.
pub fn has_capture(board: &Board, player: Player) -> bool {
    board
        .pieces_of(player)
        .any(|(from, piece)| !jump_landings(board, from, piece).is_empty())
}

/// Landing cells of the single jumps available to the piece on `from`.
///
/// The piece's current crown decides whether two or four directions are
/// tried. Empty cells yield nothing.
pub fn jumps_from(board: &Board, from: Coord) -> Vec<Coord> {
    match board.piece_at(from) {
        Some(piece) => jump_landings(board, from, piece),
        None => Vec::new(),
    }
}

/// Enumerates every complete turn for `player`.
///
/// Unlike [`legal_moves`], jumps are followed to the end of every possible
/// chain, so each returned move is a whole turn. Branches are explored in
/// generation order.
pub fn full_turns(board: &Board, player: Player) -> Vec<Move> {
    let mut turns = Vec::new();

    for mv in legal_moves(board, player) {
        if !mv.is_jump() {
            turns.push(mv);
            continue;
        }
        if let Ok(next) = apply_move(board, player, mv.from(), mv.to()) {
            extend_chains(&next, player, mv, &mut turns);
        }
    }

    turns
}

fn extend_chains(board: &Board, player: Player, chain: Move, out: &mut Vec<Move>) {
    let landings = jumps_from(board, chain.to());
    if landings.is_empty() {
        out.push(chain);
        return;
    }

    for landing in landings {
        if let Ok(next) = apply_move(board, player, chain.to(), landing) {
            let mut longer = chain.clone();
            longer.extend([landing]);
            extend_chains(&next, player, longer, out);
        }
    }
}

/// Generates jump moves for every piece of `player`.
fn generate_jumps(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();

    for (from, piece) in board.pieces_of(player) {
        for to in jump_landings(board, from, piece) {
            moves.push(Move::new(from, to));
        }
    }

    moves
}

/// Generates simple diagonal steps for every piece of `player`.
fn generate_steps(board: &Board, player: Player) -> Vec<Move> {
    let mut moves = Vec::new();

    for (from, piece) in board.pieces_of(player) {
        for &(dr, df) in piece.directions() {
            if let Some(to) = from.offset(dr, df) {
                if board.is_empty(to) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    moves
}

/// A jump needs an opposing piece on the adjacent diagonal and an empty cell
/// just beyond it.
fn jump_landings(board: &Board, from: Coord, piece: Piece) -> Vec<Coord> {
    piece
        .directions()
        .iter()
        .filter_map(|&(dr, df)| {
            let over = from.offset(dr, df)?;
            let to = from.offset(2 * dr, 2 * df)?;
            (board.is_enemy(over, piece.owner) && board.is_empty(to)).then_some(to)
        })
        .collect()
}
