//! # Pop Connect
//!
//! Connect Four generalized to any board from 4x4 to 10x10, any winning run
//! length, and "pop" moves that pull your own disc out of the bottom of a
//! column. Computer players come in two strengths: random, and a one-ply
//! search that takes immediate wins and blocks immediate losses.
//!
//! ## Modules
//!
//! - [`game`] — Rules engine: board, moves, legality, outcome evaluation
//! - [`ai`] — Agent trait, random and tactical computer players
//! - [`session`] — Playing a game out between two agents
//! - [`ui`] — Terminal UI for interactive play
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod session;
pub mod ui;
