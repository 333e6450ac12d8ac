//! Computer players: the [`Agent`] trait, the two difficulty tiers and the
//! one-ply tactical search.

mod agent;
mod random;
pub mod tactical;

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::game::{GameState, Move};

pub use agent::Agent;
pub use random::{random_move, random_move_avoiding, RandomAgent};
pub use tactical::{plan, tactical_move, Plan, TacticalAgent};

/// Strength of a computer player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    /// Level 1: uniformly random legal moves.
    Random,
    /// Level 2: one-ply win/block search with random fallback.
    Tactical,
}

impl Difficulty {
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Random => 1,
            Difficulty::Tactical => 2,
        }
    }

    /// Build an agent for this difficulty, seeded for reproducible play if
    /// a seed is given.
    pub fn agent(self, seed: Option<u64>) -> Box<dyn Agent> {
        match (self, seed) {
            (Difficulty::Random, Some(seed)) => Box::new(RandomAgent::seeded(seed)),
            (Difficulty::Random, None) => Box::new(RandomAgent::new()),
            (Difficulty::Tactical, Some(seed)) => Box::new(TacticalAgent::seeded(seed)),
            (Difficulty::Tactical, None) => Box::new(TacticalAgent::new()),
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Difficulty::Random),
            2 => Ok(Difficulty::Tactical),
            other => Err(format!("difficulty must be 1 or 2, got {other}")),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(difficulty: Difficulty) -> u8 {
        difficulty.level()
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("difficulty must be 1 or 2, got '{s}'"))?;
        Difficulty::try_from(level)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

/// Pick a move for the player to move at the given difficulty. `state` is
/// only read; lookahead runs on clones.
pub fn choose_move<R: Rng>(state: &GameState, difficulty: Difficulty, rng: &mut R) -> Move {
    match difficulty {
        Difficulty::Random => random_move(state, rng),
        Difficulty::Tactical => tactical_move(state, rng),
    }
}
