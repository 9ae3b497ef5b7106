use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

use crate::dims::Dims;

/// Lattice coordinate as (row, column).
///
/// Pure value type: cells are identified by coordinates alone and all carving
/// state lives in [`crate::grid::Grid`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Cell(pub i32, pub i32);

impl Cell {
    pub const ZERO: Cell = Cell(0, 0);

    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    /// Iterates the rectangle `[from.0, to.0) x [from.1, to.1)` in row-major order.
    pub fn iter_fill(from: Cell, to: Cell) -> impl Iterator<Item = Cell> {
        (from.0..to.0).flat_map(move |row| (from.1..to.1).map(move |col| Cell(row, col)))
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn in_bounds(self, size: Dims) -> bool {
        self.all_non_negative() && self.0 < size.0 && self.1 < size.1
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, other: Cell) -> Cell {
        Cell(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, other: Cell) -> Cell {
        Cell(self.0 - other.0, self.1 - other.1)
    }
}

impl AddAssign for Cell {
    fn add_assign(&mut self, other: Cell) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl SubAssign for Cell {
    fn sub_assign(&mut self, other: Cell) {
        self.0 -= other.0;
        self.1 -= other.1;
    }
}

impl Add<Direction> for Cell {
    type Output = Cell;

    fn add(self, dir: Direction) -> Cell {
        self + dir.offset()
    }
}

impl From<(i32, i32)> for Cell {
    fn from(tuple: (i32, i32)) -> Self {
        Cell(tuple.0, tuple.1)
    }
}

impl From<Cell> for (i32, i32) {
    fn from(val: Cell) -> Self {
        (val.0, val.1)
    }
}

/// Cardinal direction on the lattice. Row 0 is the top row, so `North` is
/// row - 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn get_in_order() -> [Direction; 4] {
        use Direction::*;
        [North, South, East, West]
    }

    pub fn offset(self) -> Cell {
        match self {
            Direction::North => Cell(-1, 0),
            Direction::South => Cell(1, 0),
            Direction::East => Cell(0, 1),
            Direction::West => Cell(0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }
}
