use std::fmt;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::collections::grid::Direction;

/// A `Coord` struct represents coordinates of an element in a `Grid`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Coord) -> usize {
        let rows = if self.row > other.row {
            self.row - other.row
        } else {
            other.row - self.row
        };
        let cols = if self.col > other.col {
            self.col - other.col
        } else {
            other.col - self.col
        };
        rows + cols
    }

    /// true if the two coordinates share an edge
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }

    /// Moves one step in a direction. Returns `None` when the step would leave the
    /// `rows` x `cols` rectangle.
    pub fn step(self, direction: Direction, rows: usize, cols: usize) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 || row as usize >= rows || col as usize >= cols {
            return None;
        }
        Some(Coord::new(row as usize, col as usize))
    }

    /// The colour of the cell on a checkerboard, used for Hamiltonian path parity
    pub fn is_even(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    pub fn as_index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}
