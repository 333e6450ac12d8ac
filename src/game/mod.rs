//! Core game logic: board representation, players, moves, and the rules
//! engine (legality, move application, outcome evaluation).

mod board;
mod moves;
mod player;
mod state;

pub use board::{Board, Cell, MAX_DIMENSION, MIN_DIMENSION, MIN_WIN_LENGTH};
pub use moves::Move;
pub use player::Player;
pub use state::{check_dimensions, GameState, Outcome};
