pub mod evaluation;
pub mod jump_chain;
pub mod minimax;
pub mod random;
pub mod search;

use checkers_core::{GameState, Move};

/// A player that can pick turns on its own.
pub trait Agent {
    /// Picks a complete turn for the side to move, or None if it has none.
    fn best_move(&mut self, state: &GameState) -> Option<Move>;

    fn name(&self) -> &str;
}

pub use evaluation::*;
pub use jump_chain::{extend_jump, play_turn};
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::*;
