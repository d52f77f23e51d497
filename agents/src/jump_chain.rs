//! Greedy continuation of capture chains.
//!
//! Once a piece has jumped it keeps jumping while it can. At each link the
//! continuation is picked by static evaluation alone (highest score for B,
//! lowest for A, first one on ties), without searching deeper.

use crate::evaluation::score;
use checkers_core::{apply_move, jumps_from, Board, Coord, Move, Player};

/// Extends a capture that landed on `landing`.
///
/// Returns the further landing cells in order and the board after the last
/// of them. When no continuation exists the list is empty and the board is
/// returned unchanged.
pub fn extend_jump(board: &Board, player: Player, landing: Coord) -> (Vec<Coord>, Board) {
    let mut extra = Vec::new();
    let mut current = board.clone();
    let mut at = landing;

    loop {
        let mut best: Option<(i32, Coord, Board)> = None;

        for to in jumps_from(&current, at) {
            let Ok(next) = apply_move(&current, player, at, to) else {
                continue;
            };
            let value = score(&next);
            let better = match &best {
                None => true,
                Some((best_value, _, _)) => prefers(player, value, *best_value),
            };
            if better {
                best = Some((value, to, next));
            }
        }

        let Some((value, to, next)) = best else {
            break;
        };
        log::trace!("{player} continues jump {at} -> {to} (eval {value})");
        extra.push(to);
        current = next;
        at = to;
    }

    (extra, current)
}

/// Plays one generated move as a full turn.
///
/// Steps are applied as-is. Jumps are extended through [`extend_jump`] and
/// the returned move carries the whole chain. Returns None if the move is
/// not legal on `board`.
pub fn play_turn(board: &Board, player: Player, mv: &Move) -> Option<(Move, Board)> {
    let next = apply_move(board, player, mv.from(), mv.to()).ok()?;
    if !mv.is_jump() {
        return Some((mv.clone(), next));
    }

    let (extra, last) = extend_jump(&next, player, mv.to());
    let mut chain = mv.clone();
    chain.extend(extra);
    Some((chain, last))
}

/// Strict preference of `player` for `a` over `b`.
pub(crate) fn prefers(player: Player, a: i32, b: i32) -> bool {
    match player {
        Player::B => a > b,
        Player::A => a < b,
    }
}
