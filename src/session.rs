//! Unattended games between two computer players.

use tracing::info;

use crate::ai::Agent;
use crate::error::EngineError;
use crate::game::{GameState, Move, Outcome, Player};

/// One applied move and the position it produced.
pub struct MoveRecord<'a> {
    pub ply: usize,
    pub player: Player,
    pub mv: Move,
    pub state: &'a GameState,
}

/// Result of playing a game to completion.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: Vec<(Player, Move)>,
    pub final_state: GameState,
}

/// Play `state` out between `first` (Player 1) and `second` (Player 2).
///
/// `on_move` sees every position after it is reached. An agent that picks an
/// illegal move ends the game with [`EngineError::IllegalMove`].
pub fn play_game<'a, F>(
    mut state: GameState,
    first: &'a mut dyn Agent,
    second: &'a mut dyn Agent,
    mut on_move: F,
) -> Result<GameRecord, EngineError>
where
    F: FnMut(&MoveRecord<'_>),
{
    let mut moves = Vec::new();

    let outcome = loop {
        let outcome = state.evaluate();
        if outcome.is_terminal() {
            break outcome;
        }

        let player = state.current_player();
        let agent = match player {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };
        let mv = agent.select_move(&state);
        state.apply(mv)?;
        info!(player = player.number(), agent = agent.name(), %mv, "move played");

        moves.push((player, mv));
        on_move(&MoveRecord {
            ply: moves.len(),
            player,
            mv,
            state: &state,
        });
    };

    info!(plies = moves.len(), result = %outcome.message(), "game finished");
    Ok(GameRecord {
        outcome,
        moves,
        final_state: state,
    })
}
