//! Game-state engine for a terminal 2048.
//!
//! Pure state and rules only: the board, the four directional moves, random
//! tile spawns, win/game-over detection, and single-step undo. Input capture
//! and rendering live in the frontend crate; this one never touches I/O.

pub mod engine;

pub use engine::{Board, Command, GameState, Move, Phase, SIZE, WIN_TILE};
