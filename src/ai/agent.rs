use crate::game::{GameState, Move};

/// Universal interface for computer players.
pub trait Agent {
    /// Select a move for the player to move. The state is never modified;
    /// any lookahead happens on clones.
    fn select_move(&mut self, state: &GameState) -> Move;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
