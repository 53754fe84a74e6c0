//! Command interpreter for Roomwalker.
//!
//! Turns lines of player input into verbs, resolves the things they name,
//! checks them against the relation graph, and narrates the result. A
//! [`Session`] owns the world, the player, and a seeded RNG for flavor text.

/// Session configuration.
pub mod config;
mod describe;
/// Error types for the interpreter.
pub mod error;
/// Directional movement and positioning.
pub mod movement;
/// Text helpers for narration.
pub mod narrator;
/// Command parsing.
pub mod parser;
/// Adventure session management.
pub mod session;

#[cfg(test)]
mod fixtures;

pub use config::SessionConfig;
pub use error::{FictionError, FictionResult};
pub use parser::{Command, Direction, Verb, parse_command};
pub use session::{Outcome, PLAYER_ID, Reply, Session};
