//! Engine module: the 4x4 board with its slide/merge ops, and the game
//! state machine driven by logical commands. Public API stays small and
//! ergonomic.
//!
//! - `Board` is the 4x4 grid value type with move/spawn methods.
//! - `GameState` owns the current and previous board and orchestrates
//!   moves, spawns, undo, and the restart/game-over phases.

mod board;
mod game;

pub use board::{Board, Move, SIZE};
pub use game::{Command, GameState, Phase, WIN_TILE};
