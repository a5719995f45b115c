//! Numbered path puzzles

pub use self::complexity::complexity;
pub use self::difficulty::Difficulty;

mod complexity;
mod difficulty;
mod parse;

use std::convert::TryFrom;
use std::fmt;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::collections::grid::{Coord, Grid};
use crate::error::{GridFromFileError, ParseError};

/// Largest number of rows or columns a puzzle may have
pub const MAX_DIMENSION: usize = 64;

/// A checkpoint number. The path visits `1..=n` in increasing order.
pub type Value = u32;

/// An ordered sequence of coordinates. A full trace visits every cell exactly once.
pub type Trace = Vec<Coord>;

/// A single grid cell as seen by consumers of a puzzle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub value: Option<Value>,
}

/// A rectangular grid where some cells hold checkpoint numbers
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(into = "Vec<Vec<Cell>>", try_from = "Vec<Vec<Cell>>")]
pub struct Puzzle {
    cells: Grid<Option<Value>>,
}

impl Puzzle {
    /// Creates a puzzle with no numbers
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            cells: Grid::with_dimensions(rows, cols),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GridFromFileError> {
        let s = fs::read_to_string(path)?;
        let puzzle = Self::parse(&s)?;
        Ok(puzzle)
    }

    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse::parse_grid(s)
    }

    pub fn rows(&self) -> usize {
        self.cells.rows()
    }

    pub fn cols(&self) -> usize {
        self.cells.cols()
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(coord)
    }

    pub fn value(&self, coord: Coord) -> Option<Value> {
        self.cells[coord]
    }

    pub fn set_value(&mut self, coord: Coord, value: Option<Value>) {
        self.cells[coord] = value;
    }

    /// Removes every number from the grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    pub fn values(&self) -> &Grid<Option<Value>> {
        &self.cells
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter_coord().map(|(coord, &value)| Cell {
            row: coord.row,
            col: coord.col,
            value,
        })
    }

    /// Every numbered cell, ordered by number
    pub fn checkpoints(&self) -> Vec<(Value, Coord)> {
        let mut checkpoints: Vec<_> = self
            .cells
            .iter_coord()
            .filter_map(|(coord, value)| value.map(|v| (v, coord)))
            .collect();
        checkpoints.sort_unstable();
        checkpoints
    }

    /// Maps each number to its position. A number placed more than once keeps its
    /// last position in row-major order.
    pub fn checkpoint_positions(&self) -> AHashMap<Value, Coord> {
        self.cells
            .iter_coord()
            .filter_map(|(coord, value)| value.map(|v| (v, coord)))
            .collect()
    }

    pub fn max_value(&self) -> Option<Value> {
        self.cells.iter().filter_map(|&v| v).max()
    }

    pub fn position_of(&self, value: Value) -> Option<Coord> {
        self.cells
            .iter_coord()
            .find(|&(_, &v)| v == Some(value))
            .map(|(coord, _)| coord)
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.rows(), self.cols())?;
        let width = self
            .max_value()
            .map_or(1, |max| max.to_string().len());
        for row in self.cells.iter_rows() {
            let mut first = true;
            for value in row {
                if !first {
                    write!(f, " ")?;
                }
                first = false;
                match value {
                    Some(v) => write!(f, "{:>1$}", v, width)?,
                    None => write!(f, "{:>1$}", '.', width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl From<Puzzle> for Vec<Vec<Cell>> {
    fn from(puzzle: Puzzle) -> Self {
        let cols = puzzle.cols().max(1);
        let cells: Vec<Cell> = puzzle.cells().collect();
        cells.chunks(cols).map(<[Cell]>::to_vec).collect()
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Puzzle {
    type Error = String;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut puzzle = Puzzle::empty(rows.len(), cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(format!("row {} has {} cells, expected {}", i, row.len(), cols));
            }
            for (j, cell) in row.into_iter().enumerate() {
                if (cell.row, cell.col) != (i, j) {
                    return Err(format!(
                        "cell ({}, {}) found at ({}, {})",
                        cell.row, cell.col, i, j
                    ));
                }
                puzzle.set_value(Coord::new(i, j), cell.value);
            }
        }
        Ok(puzzle)
    }
}
