//! Core Connect Four board model: grid, players, move generation, line
//! detection and the input boundary for externally supplied boards.

mod board;
pub mod gravity;
pub mod input;
mod moves;
mod outcome;
mod player;
pub mod win;

pub use board::{Board, BoardKey, Cell, COLS, MAX_COLS, MAX_ROWS, ROWS};
pub use input::BoardInput;
pub use moves::legal_moves;
pub use outcome::{classify, classify_after, GameResult};
pub use player::Player;
