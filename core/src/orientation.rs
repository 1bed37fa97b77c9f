//! Direction-dependent re-indexing of the grid into lanes.
//!
//! A move always compacts toward position 0 of each lane. The mapping below
//! decides which physical cell sits at each (lane, position) pair:
//!
//! | direction | lane      | position 0 |
//! |-----------|-----------|------------|
//! | up        | column x  | row 0      |
//! | down      | column x  | row 3      |
//! | left      | row y     | column 0   |
//! | right     | row y     | column 3   |

use crate::grid::{Grid, SIZE};
use crate::Direction;

/// Flat grid index of `position` within `lane` for `direction`.
pub fn cell_index(direction: Direction, lane: usize, position: usize) -> usize {
    debug_assert!(lane < SIZE && position < SIZE);
    let back = SIZE - 1 - position;
    match direction {
        Direction::Up => Grid::index(lane, position),
        Direction::Down => Grid::index(lane, back),
        Direction::Left => Grid::index(position, lane),
        Direction::Right => Grid::index(back, lane),
    }
}

/// All four lanes as grid indices, front first.
pub fn lane_indices(direction: Direction) -> [[usize; SIZE]; SIZE] {
    let mut lanes = [[0; SIZE]; SIZE];
    for (lane, indices) in lanes.iter_mut().enumerate() {
        for (position, index) in indices.iter_mut().enumerate() {
            *index = cell_index(direction, lane, position);
        }
    }
    lanes
}

/// A mutable view of a grid seen through one direction's lanes.
///
/// Reads and writes go straight to the underlying grid; the view holds no
/// copy of the values.
pub struct OrientedView<'a> {
    grid: &'a mut Grid,
    lanes: [[usize; SIZE]; SIZE],
}

impl<'a> OrientedView<'a> {
    pub fn new(grid: &'a mut Grid, direction: Direction) -> Self {
        OrientedView {
            grid,
            lanes: lane_indices(direction),
        }
    }

    pub fn get(&self, lane: usize, position: usize) -> u32 {
        self.grid.value_at(self.lanes[lane][position])
    }

    pub fn set(&mut self, lane: usize, position: usize, value: u32) {
        self.grid.set_at(self.lanes[lane][position], value);
    }

    /// Copy out one lane, front first.
    pub fn lane(&self, lane: usize) -> [u32; SIZE] {
        let mut values = [0; SIZE];
        for (position, value) in values.iter_mut().enumerate() {
            *value = self.get(lane, position);
        }
        values
    }

    /// Write one lane back, front first.
    pub fn write_lane(&mut self, lane: usize, values: &[u32; SIZE]) {
        for (position, &value) in values.iter().enumerate() {
            self.set(lane, position, value);
        }
    }
}
