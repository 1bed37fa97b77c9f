//! The 4x4 tile grid.
//!
//! Cells are stored row-major in a flat array of 16 values: indices 0-3 are
//! row 0, 4-7 are row 1, and so on. A cell at column `x` and row `y` lives at
//! index `y * 4 + x`. Empty cells hold 0, tiles hold a power of two >= 2.

use serde::Serialize;

use crate::error::GridError;

/// Side length of the grid.
pub const SIZE: usize = 4;

/// Number of cells in the grid.
pub const CELLS: usize = SIZE * SIZE;

/// Whether `value` may be stored in a cell: 0 or a power of two >= 2.
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// A 4x4 matrix of tile values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Grid {
    cells: [u32; CELLS],
}

impl Grid {
    /// An empty grid.
    pub fn new() -> Self {
        Grid { cells: [0; CELLS] }
    }

    /// Build a grid from row-major cell values, rejecting anything that is
    /// not 0 or a power of two >= 2.
    pub fn from_cells(cells: [u32; CELLS]) -> Result<Self, GridError> {
        for (index, &value) in cells.iter().enumerate() {
            if !is_valid_tile(value) {
                return Err(GridError::InvalidTile { index, value });
            }
        }
        Ok(Grid { cells })
    }

    /// Build a grid from four rows, top to bottom.
    pub fn from_rows(rows: [[u32; SIZE]; SIZE]) -> Result<Self, GridError> {
        let mut cells = [0; CELLS];
        for (y, row) in rows.iter().enumerate() {
            cells[y * SIZE..(y + 1) * SIZE].copy_from_slice(row);
        }
        Self::from_cells(cells)
    }

    /// Flat index of the cell at column `x`, row `y`.
    pub fn index(x: usize, y: usize) -> usize {
        debug_assert!(x < SIZE && y < SIZE);
        y * SIZE + x
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[Self::index(x, y)]
    }

    pub fn cells(&self) -> &[u32; CELLS] {
        &self.cells
    }

    /// The grid as four rows, top to bottom.
    pub fn rows(&self) -> [[u32; SIZE]; SIZE] {
        let mut rows = [[0; SIZE]; SIZE];
        for (y, row) in rows.iter_mut().enumerate() {
            row.copy_from_slice(&self.cells[y * SIZE..(y + 1) * SIZE]);
        }
        rows
    }

    pub(crate) fn value_at(&self, index: usize) -> u32 {
        self.cells[index]
    }

    pub(crate) fn set_at(&mut self, index: usize, value: u32) {
        self.cells[index] = value;
    }

    /// Indices of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    pub fn max_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Whether every cell satisfies the tile value invariant.
    pub fn is_valid(&self) -> bool {
        self.cells.iter().all(|&v| is_valid_tile(v))
    }

    pub(crate) fn clear(&mut self) {
        self.cells = [0; CELLS];
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Grid {{")?;
        for row in self.rows() {
            for val in row {
                if val == 0 {
                    write!(f, "    .")?;
                } else {
                    write!(f, "{:5}", val)?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+------+------+------+------+")?;
        for row in self.rows() {
            write!(f, "|")?;
            for val in row {
                if val == 0 {
                    write!(f, "      |")?;
                } else {
                    write!(f, "{:^6}|", val)?;
                }
            }
            writeln!(f)?;
            writeln!(f, "+------+------+------+------+")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tiles() {
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2));
        assert!(is_valid_tile(4));
        assert!(is_valid_tile(1 << 17));
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(3));
        assert!(!is_valid_tile(6));
    }

    #[test]
    fn test_from_cells_rejects_invalid_tile() {
        let mut cells = [0; CELLS];
        cells[5] = 12;
        assert_eq!(
            Grid::from_cells(cells),
            Err(GridError::InvalidTile { index: 5, value: 12 })
        );
    }

    #[test]
    fn test_from_rows_is_row_major() {
        let rows = [[2, 0, 0, 0], [0, 4, 0, 0], [0, 0, 8, 0], [0, 0, 0, 16]];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.get(0, 0), 2);
        assert_eq!(grid.get(1, 1), 4);
        assert_eq!(grid.get(3, 3), 16);
        assert_eq!(grid.cells()[Grid::index(2, 2)], 8);
        assert_eq!(grid.rows()[1], [0, 4, 0, 0]);
    }

    #[test]
    fn test_empty_cells_and_full() {
        let mut grid = Grid::new();
        assert_eq!(grid.empty_count(), CELLS);
        assert!(!grid.is_full());

        for i in 0..CELLS {
            grid.set_at(i, 2);
        }
        assert!(grid.is_full());
        assert!(grid.empty_cells().is_empty());

        grid.set_at(7, 0);
        assert_eq!(grid.empty_cells(), vec![7]);
    }

    #[test]
    fn test_max_tile() {
        let rows = [[2, 0, 0, 0], [0, 64, 0, 0], [0, 0, 8, 0], [0, 0, 0, 16]];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.max_tile(), 64);
        assert_eq!(Grid::new().max_tile(), 0);
    }

    #[test]
    fn test_display_format() {
        let grid = Grid::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]).unwrap();
        let display = format!("{}", grid);
        assert!(display.contains("+------+"));
        assert!(display.contains(" 2048 "));
        let debug = format!("{:?}", grid);
        assert!(debug.starts_with("Grid {"));
    }
}
