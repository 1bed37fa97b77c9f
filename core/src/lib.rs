//! # Tuinty Core Engine
//!
//! Grid-transition engine for a 4x4 sliding-tile merge puzzle in the 2048
//! family. Given a grid and a direction it computes the new grid, the points
//! earned, whether a new tile appears and whether the game is over.
//!
//! The engine is pure apart from its seedable PRNG and the high-score store,
//! so a terminal front end only has to map keys to [`Direction`]s and draw
//! the [`Update`] it gets back.
//!
//! ## Example
//!
//! ```rust
//! use tuinty_core::{Direction, Game, MemoryStore};
//!
//! let mut game = Game::new(MemoryStore::default(), 42); // Create game with seed 42
//! let update = game.step(Direction::Left);
//! println!("Score: {}, Changed: {}", update.score, update.changed);
//! ```

use serde::Serialize;

pub mod error;
pub mod game;
pub mod grid;
pub mod orientation;
pub mod resolver;
pub mod spawn;
pub mod store;

pub use error::{GridError, StoreError};
pub use game::{is_terminal, FinalScore, Game, GameState, Snapshot, Update, UpdateKind};
pub use grid::Grid;
pub use resolver::{resolve_move, MoveOutcome};
pub use spawn::Spawn;
pub use store::{FileStore, HighScoreStore, MemoryStore};

/// The four possible move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Get all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_direction_all() {
        let all: HashSet<Direction> = Direction::all().into_iter().collect();
        assert_eq!(all.len(), 4);
    }
}
