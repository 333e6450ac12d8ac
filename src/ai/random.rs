use crate::game::{GameState, Move};
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use super::agent::Agent;

/// Sample a uniformly random column and pop flag until the pair is legal.
///
/// Panics if the player to move has no legal move at all; callers only ask
/// for a move while the game is in progress.
pub fn random_move<R: Rng>(state: &GameState, rng: &mut R) -> Move {
    assert!(!state.legal_moves().is_empty(), "No legal moves available");
    sample_legal(state, rng)
}

fn sample_legal<R: Rng>(state: &GameState, rng: &mut R) -> Move {
    loop {
        let mv = Move {
            column: rng.random_range(0..state.cols()),
            pop: rng.random_bool(0.5),
        };
        if state.is_legal(mv) {
            return mv;
        }
    }
}

/// Like [`random_move`], but resample while the draw lands in `avoided`.
/// The constraint is ignored when it would rule out every legal move.
pub fn random_move_avoiding<R: Rng>(
    state: &GameState,
    avoided: &[Move],
    rng: &mut R,
) -> Move {
    let legal = state.legal_moves();
    assert!(!legal.is_empty(), "No legal moves available");
    let enforce = legal.iter().any(|mv| !avoided.contains(mv));
    loop {
        let mv = sample_legal(state, rng);
        if !enforce || !avoided.contains(&mv) {
            return mv;
        }
    }
}

/// An agent that plays difficulty 1: any legal move, uniformly sampled.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and replays
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, state: &GameState) -> Move {
        random_move(state, &mut self.rng)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
