//! Core module - pure game logic with no I/O.
//!
//! This module contains all the game rules and state management. It has zero
//! dependencies on UI, timers, or the filesystem.

pub mod board;
pub mod game;
pub mod piece;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use game::{ActivePiece, Game, LockEvent, Phase};
pub use piece::{shape_offsets, Piece};
pub use rng::PieceSource;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
