use crate::Agent;
use checkers_core::{full_turns, GameState, Move};
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Plays a uniformly random complete turn.
pub struct RandomAgent {
    name: String,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            name: "Random".to_string(),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn best_move(&mut self, state: &GameState) -> Option<Move> {
        let turns = full_turns(&state.board, state.turn);
        turns.choose(&mut thread_rng()).cloned()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_core::{Board, Player};

    #[test]
    fn test_random_moves_are_legal() {
        let mut agent = RandomAgent::new();
        let mut state = GameState::new();

        for _ in 0..20 {
            if state.outcome().is_some() {
                break;
            }
            let mv = agent.best_move(&state).unwrap();
            state = state.play(&mv).unwrap();
        }
        assert!(state.ply > 0);
    }

    #[test]
    fn test_no_move_without_pieces() {
        let mut agent = RandomAgent::default();
        let state = GameState::from_board(Board::empty(), Player::B);
        assert_eq!(agent.best_move(&state), None);
    }
}
