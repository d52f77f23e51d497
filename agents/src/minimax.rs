use crate::{
    search::{search_with_config, SearchConfig},
    Agent,
};
use checkers_core::{GameState, Move};

/// Plays the minimax search for whichever side is to move.
pub struct MinimaxAgent {
    name: String,
    config: SearchConfig,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        Self::with_config(SearchConfig::depth(depth))
    }

    pub fn with_config(config: SearchConfig) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", config.max_depth),
            config,
        }
    }
}

impl Default for MinimaxAgent {
    fn default() -> Self {
        Self::with_config(SearchConfig::default())
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, state: &GameState) -> Option<Move> {
        search_with_config(&state.board, state.turn, &self.config).best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
