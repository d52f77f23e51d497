pub mod board;
pub mod game_state;
pub mod move_gen;
pub mod notation;
pub mod perft;
pub mod position;
pub mod rules;
pub mod types;

pub use board::*;
pub use game_state::*;
pub use move_gen::*;
pub use notation::{parse_coord, parse_move, NotationError};
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use position::positions;
pub use rules::{apply_move, apply_path, RejectionReason};
pub use types::*;
