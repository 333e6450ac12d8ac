use crate::game::{GameState, Move, Outcome};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use tracing::debug;

use super::agent::Agent;
use super::random::random_move_avoiding;

/// What a one-ply look at the position decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// This move wins on the spot.
    Win(Move),
    /// The opponent would win by dropping here next; take the cell first.
    Block(Move),
    /// Nothing forced. Pick randomly, steering clear of these pops.
    Fallback { avoided: Vec<Move> },
}

/// Look exactly one ply ahead for the player to move.
///
/// Every legal move is first tried for the mover; the first immediate win
/// is taken. Then each move is tried as if the opponent had played it: a
/// winning opponent drop must be blocked now, while a pop that would leave
/// the opponent a run can only be avoided.
pub fn plan(state: &GameState) -> Plan {
    let me = state.current_player();
    let them = me.other();
    let legal = state.legal_moves();

    for &mv in &legal {
        let mut sim = state.clone();
        sim.play_unchecked(mv);
        if sim.evaluate() == Outcome::Winner(me) {
            debug!(player = me.number(), %mv, "found winning move");
            return Plan::Win(mv);
        }
    }

    let mut avoided = Vec::new();
    for &mv in &legal {
        let mut sim = state.clone();
        sim.set_current_player(them);
        sim.play_unchecked(mv);
        if sim.evaluate() != Outcome::Winner(them) {
            continue;
        }
        if mv.pop {
            avoided.push(mv);
        } else {
            debug!(player = me.number(), %mv, "blocking opponent drop");
            return Plan::Block(mv);
        }
    }

    if !avoided.is_empty() {
        debug!(player = me.number(), ?avoided, "avoiding pops that hand over a run");
    }
    Plan::Fallback { avoided }
}

/// Difficulty 2: win if possible, block a winning drop, otherwise play
/// randomly without the losing pops.
pub fn tactical_move<R: Rng>(state: &GameState, rng: &mut R) -> Move {
    match plan(state) {
        Plan::Win(mv) | Plan::Block(mv) => mv,
        Plan::Fallback { avoided } => random_move_avoiding(state, &avoided, rng),
    }
}

/// An agent that plays difficulty 2.
pub struct TacticalAgent {
    rng: StdRng,
}

impl TacticalAgent {
    pub fn new() -> Self {
        TacticalAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        TacticalAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for TacticalAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for TacticalAgent {
    fn select_move(&mut self, state: &GameState) -> Move {
        tactical_move(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Tactical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::RandomAgent;
    use crate::game::{Board, Player};

    fn position(rows: &[&str], win_length: usize, turn: Player) -> GameState {
        GameState::from_board(Board::from_rows(rows).unwrap(), win_length, turn).unwrap()
    }

    #[test]
    fn takes_winning_drop() {
        let state = position(
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                "222....",
                "111....",
            ],
            4,
            Player::One,
        );
        assert_eq!(plan(&state), Plan::Win(Move::drop(3)));
    }

    #[test]
    fn takes_winning_pop() {
        // Popping column 0 lowers Player 1's disc into row 1, completing it
        let state = position(&["....", "1...", "2111", "1221"], 4, Player::One);
        assert_eq!(plan(&state), Plan::Win(Move::pop(0)));
    }

    #[test]
    fn blocks_opponent_drop() {
        let state = position(
            &[
                ".......",
                ".......",
                ".......",
                ".......",
                "111....",
                "222....",
            ],
            4,
            Player::One,
        );
        assert_eq!(plan(&state), Plan::Block(Move::drop(3)));
    }

    #[test]
    fn prefers_win_over_block() {
        // Player 2 threatens column 0 on the bottom row; Player 1 wins in column 6
        let state = position(
            &[
                ".......",
                ".......",
                ".......",
                "......1",
                "......1",
                ".222..1",
            ],
            4,
            Player::One,
        );
        assert_eq!(plan(&state), Plan::Win(Move::drop(6)));
    }

    #[test]
    fn avoids_pop_that_completes_opponent_run() {
        // Popping column 0 would slide Player 2's disc into the bottom row
        let state = position(
            &[".....", ".....", ".....", ".....", "2....", "12221"],
            4,
            Player::One,
        );

        assert_eq!(
            plan(&state),
            Plan::Fallback {
                avoided: vec![Move::pop(0)]
            }
        );

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let mv = tactical_move(&state, &mut rng);
            assert!(state.is_legal(mv));
            assert_ne!(mv, Move::pop(0));
        }
    }

    #[test]
    fn quiet_position_has_nothing_to_avoid() {
        let state = GameState::new(6, 7, 4).unwrap();
        assert_eq!(plan(&state), Plan::Fallback { avoided: vec![] });
    }

    #[test]
    fn search_does_not_touch_state() {
        let state = position(&["....", "1...", "2111", "1221"], 4, Player::One);
        let before = state.clone();
        let mut agent = TacticalAgent::seeded(1);
        agent.select_move(&state);
        assert_eq!(state, before);
    }

    #[test]
    fn beats_random_agent() {
        let mut tactical_wins = 0;
        let mut random_wins = 0;

        for seed in 0..40u64 {
            let tactical_first = seed % 2 == 0;
            let mut tactical = TacticalAgent::seeded(seed);
            let mut random = RandomAgent::seeded(seed + 1_000);
            let mut state = GameState::new(6, 7, 4).unwrap();
            let tactical_player = if tactical_first { Player::One } else { Player::Two };

            let mut plies = 0;
            while !state.is_terminal() && plies < 2_000 {
                let mv = if state.current_player() == tactical_player {
                    tactical.select_move(&state)
                } else {
                    random.select_move(&state)
                };
                state.apply(mv).unwrap();
                plies += 1;
            }

            match state.evaluate() {
                Outcome::Winner(p) if p == tactical_player => tactical_wins += 1,
                Outcome::Winner(_) => random_wins += 1,
                _ => {}
            }
        }

        assert!(
            tactical_wins > random_wins,
            "Tactical should beat random more often ({tactical_wins} vs {random_wins})"
        );
    }

    #[test]
    fn name_is_tactical() {
        assert_eq!(TacticalAgent::new().name(), "Tactical");
    }
}
