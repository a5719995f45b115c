use itertools::Itertools;

use crate::puzzle::Puzzle;

const MIN_COMPLEXITY: f64 = 0.1;

/// Scores how spread out the checkpoints are, in `[0.1, 1.0]`.
///
/// The average Manhattan distance between consecutive checkpoints is divided by
/// the grid's diagonal span `rows + cols - 2`. Grids with at most one checkpoint
/// score the minimum.
pub fn complexity(puzzle: &Puzzle) -> f64 {
    let checkpoints = puzzle.checkpoints();
    let span = (puzzle.rows() + puzzle.cols()).saturating_sub(2);
    if checkpoints.len() <= 1 || span == 0 {
        return MIN_COMPLEXITY;
    }
    let total: usize = checkpoints
        .iter()
        .tuple_windows()
        .map(|(&(_, a), &(_, b))| a.manhattan(b))
        .sum();
    let average = total as f64 / (checkpoints.len() - 1) as f64;
    (average / span as f64).max(MIN_COMPLEXITY).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::complexity;
    use crate::collections::grid::Coord;
    use crate::puzzle::Puzzle;

    #[test]
    fn degenerate() {
        let mut puzzle = Puzzle::empty(4, 4);
        assert_eq!(0.1, complexity(&puzzle));
        puzzle.set_value(Coord::new(1, 1), Some(1));
        assert_eq!(0.1, complexity(&puzzle));
    }

    #[test]
    fn opposite_corners() {
        let mut puzzle = Puzzle::empty(4, 4);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(3, 3), Some(2));
        assert_eq!(1.0, complexity(&puzzle));
    }

    #[test]
    fn neighbours_are_floored() {
        let mut puzzle = Puzzle::empty(6, 6);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(0, 1), Some(2));
        assert_eq!(0.1, complexity(&puzzle));
    }

    #[test]
    fn average() {
        let mut puzzle = Puzzle::empty(3, 3);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(0, 2), Some(2));
        puzzle.set_value(Coord::new(1, 2), Some(3));
        // (2 + 1) / 2 / 4
        assert_eq!(0.375, complexity(&puzzle));
    }
}
