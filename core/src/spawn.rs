//! Tile spawning.

use rand::Rng;
use serde::Serialize;

use crate::grid::{Grid, CELLS};

/// Chance that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f32 = 0.1;

/// A tile placed on the grid by the spawner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spawn {
    /// Row-major cell index.
    pub index: usize,
    pub value: u32,
}

/// Spawn a tile after a move, if the move changed the grid.
///
/// Picks an empty cell uniformly and fills it with a 2 (90%) or a 4 (10%).
/// Does nothing when `changed` is false or no cell is empty.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, changed: bool, rng: &mut R) -> Option<Spawn> {
    if !changed {
        return None;
    }

    let empty_cells = grid.empty_cells();
    if empty_cells.is_empty() {
        return None;
    }

    let index = empty_cells[rng.gen_range(0..empty_cells.len())];
    let roll: f32 = rng.gen();
    let value = if roll < FOUR_PROBABILITY { 4 } else { 2 };
    grid.set_at(index, value);
    Some(Spawn { index, value })
}

/// Place the opening tile of a session: always a 2, on any cell of a cleared grid.
pub fn place_initial_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Spawn {
    debug_assert_eq!(grid.empty_count(), CELLS);
    let index = rng.gen_range(0..CELLS);
    grid.set_at(index, 2);
    Spawn { index, value: 2 }
}
