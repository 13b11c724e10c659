//! Occupancy matrix.

use serde::{Deserialize, Serialize};

use crate::core::{BoardError, Coord};

/// State of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
    /// Part of the reserved row. Never becomes `Occupied`.
    Reserved,
}

impl CellState {
    /// Matrix digit used by the debug dump.
    #[must_use]
    pub const fn digit(self) -> u8 {
        match self {
            CellState::Empty => 0,
            CellState::Occupied => 1,
            CellState::Reserved => 2,
        }
    }
}

/// Fixed `rows × columns` matrix of cell states, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell of `reserved_row` marked `Reserved`
    /// and everything else `Empty`.
    #[must_use]
    pub fn new(rows: usize, columns: usize, reserved_row: usize) -> Self {
        let mut cells = vec![CellState::Empty; rows * columns];
        if reserved_row < rows {
            cells[reserved_row * columns..(reserved_row + 1) * columns].fill(CellState::Reserved);
        }
        Self { rows, columns, cells }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.columns
    }

    /// Fail with `InvalidCoordinate` unless `coord` is on the grid.
    pub fn check(&self, coord: Coord) -> Result<(), BoardError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(BoardError::InvalidCoordinate {
                coord,
                rows: self.rows,
                columns: self.columns,
            })
        }
    }

    fn idx(&self, coord: Coord) -> usize {
        coord.row * self.columns + coord.col
    }

    /// State of a cell.
    pub fn get(&self, coord: Coord) -> Result<CellState, BoardError> {
        self.check(coord)?;
        Ok(self.cells[self.idx(coord)])
    }

    /// `true` if the cell is on the grid and occupied.
    #[must_use]
    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.contains(coord) && self.cells[self.idx(coord)] == CellState::Occupied
    }

    /// Set a play cell. Reserved cells cannot be changed.
    pub(crate) fn set(&mut self, coord: Coord, state: CellState) -> Result<(), BoardError> {
        self.check(coord)?;
        let idx = self.idx(coord);
        debug_assert_ne!(self.cells[idx], CellState::Reserved, "reserved cells are immutable");
        debug_assert_ne!(state, CellState::Reserved, "cannot reserve a cell after construction");
        self.cells[idx] = state;
        Ok(())
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == CellState::Occupied).count()
    }
}

/// Renders the matrix as rows of `0`/`1`/`2` digits, row 0 first.
impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(self.columns) {
            let line: Vec<String> = row.iter().map(|c| c.digit().to_string()).collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
