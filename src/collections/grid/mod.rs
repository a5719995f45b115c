mod coord;
mod direction;

pub use self::coord::Coord;
pub use self::direction::Direction;

use std::fmt;
use std::fmt::Display;
use std::ops::{Deref, Index, IndexMut};

/// A container of elements represented in a rectangular grid, stored row-major
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    elements: Vec<T>,
}

impl<T> Grid<T> {
    /// Creates a new grid with the specified dimensions and fill with the default value
    pub fn with_dimensions(rows: usize, cols: usize) -> Grid<T>
    where
        T: Clone + Default,
    {
        Self::with_dimensions_and_value(rows, cols, T::default())
    }

    /// Create a new `Grid` of the specified dimensions and fill with a specified value
    pub fn with_dimensions_and_value(rows: usize, cols: usize, val: T) -> Grid<T>
    where
        T: Clone,
    {
        Grid {
            rows,
            cols,
            elements: vec![val; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Every coordinate of the grid in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let cols = self.cols;
        (0..self.elements.len()).map(move |i| Coord::new(i / cols, i % cols))
    }

    /// The in-bounds coordinates sharing an edge with `coord`
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> {
        let (rows, cols) = (self.rows, self.cols);
        Direction::ALL
            .iter()
            .filter_map(move |&direction| coord.step(direction, rows, cols))
    }

    /// Returns an iterator over the rows of the grid
    pub fn iter_rows(&self) -> impl Iterator<Item = &[T]> {
        self.elements.chunks(self.cols.max(1))
    }

    /// Returns an iterator over every element, paired with its `Coord`
    pub fn iter_coord(&self) -> impl Iterator<Item = (Coord, &T)> {
        let cols = self.cols;
        self.elements
            .iter()
            .enumerate()
            .map(move |(i, e)| (Coord::new(i / cols, i % cols), e))
    }

    pub fn get(&self, coord: Coord) -> Option<&T> {
        if self.contains(coord) {
            Some(&self.elements[coord.as_index(self.cols)])
        } else {
            None
        }
    }

    pub fn fill(&mut self, val: T)
    where
        T: Clone,
    {
        for e in &mut self.elements {
            *e = val.clone();
        }
    }
}

impl<T> Deref for Grid<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    fn index(&self, coord: Coord) -> &Self::Output {
        assert!(self.contains(coord), "{:?} is outside the grid", coord);
        &self.elements[coord.as_index(self.cols)]
    }
}

impl<T> IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, coord: Coord) -> &mut Self::Output {
        assert!(self.contains(coord), "{:?} is outside the grid", coord);
        let cols = self.cols;
        &mut self.elements[coord.as_index(cols)]
    }
}

impl<T> Display for Grid<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self
            .elements
            .iter()
            .map(|e| e.to_string().len())
            .max()
            .unwrap_or(0);
        for row in self.iter_rows() {
            for element in row {
                write!(f, "{:>1$} ", element, len)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::collections::grid::{Coord, Grid};

    #[test]
    fn coords_row_major() {
        let grid: Grid<u8> = Grid::with_dimensions(3, 4);
        assert_eq!(Some(Coord::new(1, 3)), grid.coords().nth(7));
        assert_eq!(12, grid.coords().count());
    }

    #[test]
    fn neighbors_of_corner() {
        let grid: Grid<u8> = Grid::with_dimensions(3, 3);
        let neighbors: Vec<_> = grid.neighbors(Coord::new(0, 0)).collect();
        assert_eq!(vec![Coord::new(0, 1), Coord::new(1, 0)], neighbors);
    }

    #[test]
    fn neighbors_of_center() {
        let grid: Grid<u8> = Grid::with_dimensions(3, 3);
        assert_eq!(4, grid.neighbors(Coord::new(1, 1)).count());
    }

    #[test]
    fn index_row_major() {
        let mut grid = Grid::with_dimensions_and_value(2, 3, 0);
        grid[Coord::new(1, 2)] = 5;
        assert_eq!(Some(&5), grid.iter().nth(5));
        assert_eq!(None, grid.get(Coord::new(2, 0)));
    }
}
