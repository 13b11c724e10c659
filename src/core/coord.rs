//! Grid coordinates, directions and world positions.
//!
//! ## Orientation
//!
//! Rows grow towards the reserved row (the last row in the reference
//! layout). `Up` therefore means `row + 1` and `Down` means `row - 1`;
//! `Right` is `col + 1` and `Left` is `col - 1`.
//!
//! World positions map cells onto a plane: `x = col * cell_width`,
//! `z = row * cell_height`.

use serde::{Deserialize, Serialize};

/// A cell on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0-based).
    pub row: usize,
    /// Column index (0-based).
    pub col: usize,
}

impl Coord {
    /// Create a coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell in `direction`, if it lies inside a
    /// `rows × columns` grid.
    ///
    /// ```
    /// use trio_board::core::{Coord, Direction};
    ///
    /// let corner = Coord::new(0, 0);
    /// assert_eq!(corner.neighbor(Direction::Up, 9, 6), Some(Coord::new(1, 0)));
    /// assert_eq!(corner.neighbor(Direction::Down, 9, 6), None);
    /// assert_eq!(corner.neighbor(Direction::Left, 9, 6), None);
    /// ```
    #[must_use]
    pub fn neighbor(self, direction: Direction, rows: usize, columns: usize) -> Option<Coord> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < rows && col < columns).then_some(Coord { row, col })
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four orthogonal directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards higher rows.
    Up,
    /// Towards lower rows.
    Down,
    /// Towards lower columns.
    Left,
    /// Towards higher columns.
    Right,
}

impl Direction {
    /// All directions, in the order adjacency is reported.
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// `(row, col)` offset of a single step.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// Movement axis in world space.
///
/// `X` follows columns, `Z` follows rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Axis::X => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// Direction of a single cell step along this axis with the given sign.
    #[must_use]
    pub fn direction(self, positive: bool) -> Direction {
        match (self, positive) {
            (Axis::X, true) => Direction::Right,
            (Axis::X, false) => Direction::Left,
            (Axis::Z, true) => Direction::Up,
            (Axis::Z, false) => Direction::Down,
        }
    }
}

/// Continuous position on the board plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub z: f32,
}

impl WorldPos {
    /// Create a world position.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Component along `axis`.
    #[must_use]
    pub fn along(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    /// Move towards `target` along `axis` by at most `max_step`, never
    /// overshooting. The other component is left untouched.
    #[must_use]
    pub fn move_towards(self, axis: Axis, target: WorldPos, max_step: f32) -> WorldPos {
        let current = self.along(axis);
        let delta = target.along(axis) - current;
        let next = if delta.abs() <= max_step {
            target.along(axis)
        } else {
            current + max_step.copysign(delta)
        };
        match axis {
            Axis::X => WorldPos { x: next, ..self },
            Axis::Z => WorldPos { z: next, ..self },
        }
    }
}

/// Occupancy of the four orthogonal neighbours of a cell.
///
/// Out-of-bounds directions report `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjacency {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Adjacency {
    /// Occupancy in a single direction.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Set occupancy in a single direction.
    pub fn set(&mut self, direction: Direction, occupied: bool) {
        match direction {
            Direction::Up => self.up = occupied,
            Direction::Down => self.down = occupied,
            Direction::Left => self.left = occupied,
            Direction::Right => self.right = occupied,
        }
    }
}
