//! Module for the four moves between edge-sharing cells of a `Grid`

use std::fmt;
use std::fmt::Debug;

use self::Direction::{Down, Left, Right, Up};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Right, Down, Left];

    /// Row and column offsets of a single step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Up => (-1, 0),
            Right => (0, 1),
            Down => (1, 0),
            Left => (0, -1),
        }
    }
}

impl Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Up => "Up",
            Right => "Right",
            Down => "Down",
            Left => "Left",
        };
        write!(f, "{}", label)
    }
}
