//! Compaction and merging of a move.
//!
//! Every lane is processed front to back on its own:
//! 1. Compact: move all non-zero values to the front, keeping their order.
//! 2. Merge until nothing is left to merge: find the first adjacent equal pair,
//!    double the front tile, pull the rest of the lane forward, and scan again
//!    from the front.
//!
//! Because step 2 rescans after every merge, a tile produced by a merge can
//! merge again within the same move: `[2, 2, 2, 2]` ends as `[8, 0, 0, 0]`.

use serde::Serialize;

use crate::grid::{Grid, SIZE};
use crate::orientation::OrientedView;
use crate::Direction;

/// Result of resolving one move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// The grid after compaction and merging (before any spawn).
    pub grid: Grid,
    /// Value of every tile produced by a merge, in the order they happened.
    pub merges: Vec<u32>,
    /// Whether any cell differs from the grid before the move.
    pub changed: bool,
}

impl MoveOutcome {
    /// Points earned by the move.
    pub fn score_delta(&self) -> u64 {
        self.merges.iter().map(|&v| v as u64).sum()
    }
}

/// Apply a move to `grid` in place and report what happened.
pub fn resolve_move(grid: &mut Grid, direction: Direction) -> MoveOutcome {
    let snapshot = *grid;
    let mut merges = Vec::new();

    {
        let mut view = OrientedView::new(grid, direction);
        for lane in 0..SIZE {
            let mut values = view.lane(lane);
            resolve_lane(&mut values, &mut merges);
            view.write_lane(lane, &values);
        }
    }

    MoveOutcome {
        grid: *grid,
        changed: *grid != snapshot,
        merges,
    }
}

/// Compact a lane and merge it to a fixpoint, appending merged values to `merges`.
pub fn resolve_lane(lane: &mut [u32; SIZE], merges: &mut Vec<u32>) {
    compact(lane);
    merge_to_fixpoint(lane, merges);
}

/// Move all non-zero values to the front of the lane.
pub fn compact(lane: &mut [u32; SIZE]) {
    let mut write_idx = 0;
    for read_idx in 0..SIZE {
        if lane[read_idx] != 0 {
            if write_idx != read_idx {
                lane[write_idx] = lane[read_idx];
                lane[read_idx] = 0;
            }
            write_idx += 1;
        }
    }
}

/// Merge the first adjacent equal pair until none remains.
///
/// Expects a compacted lane and leaves it compacted.
pub fn merge_to_fixpoint(lane: &mut [u32; SIZE], merges: &mut Vec<u32>) {
    while let Some(p) = (1..SIZE).find(|&p| lane[p] != 0 && lane[p - 1] == lane[p]) {
        lane[p - 1] *= 2;
        merges.push(lane[p - 1]);
        lane.copy_within(p + 1.., p);
        lane[SIZE - 1] = 0;
    }
}
