//! # Connect Four Stats
//!
//! Exhaustive game-tree statistics for Connect Four positions. For every
//! legal move of a position the engine counts how the lines of play within a
//! depth budget end, and reports the counts and percentages per column.
//!
//! ## Modules
//!
//! - [`game`]: Board model: grid, players, move generation, line detection,
//!   board input validation and the gravity resolver
//! - [`search`]: Tree evaluator, memo caches, parallel root dispatch and
//!   per-move aggregation
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod search;

#[cfg(test)]
pub(crate) mod test_util;
