use crate::collections::grid::Grid;
use crate::puzzle::{Puzzle, Trace, Value};
use crate::solve::pathfinding::find_segment;
use crate::solve::search::{search_path, SearchResult};

/// Finds a path that starts on 1, meets every number in increasing order and
/// visits every cell exactly once.
///
/// Consecutive numbers are first joined by shortest segments. When these do not
/// happen to cover the grid, an exhaustive search decides. Returns `None` when
/// the numbers are not exactly `1..=max`, when no such path exists or when the
/// search runs out of steps.
pub fn find_complete_path(puzzle: &Puzzle) -> Option<Trace> {
    let checkpoints = puzzle.checkpoints();
    let max_value = checkpoints.last()?.0;
    let consecutive = checkpoints
        .iter()
        .enumerate()
        .all(|(i, &(value, _))| value == i as Value + 1);
    if !consecutive {
        debug!("Numbers are not exactly 1 to {}", max_value);
        return None;
    }
    if let Some(path) = join_segments(puzzle) {
        debug!("Shortest segments cover the grid");
        return Some(path);
    }
    let start = checkpoints[0].1;
    match search_path(puzzle, start, max_value) {
        Ok(SearchResult::Found(path)) => Some(path),
        Ok(SearchResult::NoPath) => None,
        Err(e) => {
            warn!("Giving up on {}x{} puzzle: {}", puzzle.rows(), puzzle.cols(), e);
            None
        }
    }
}

/// Joins each pair of consecutive numbers with a breadth-first segment.
///
/// Numbers not reached yet are blocked so no segment runs through them, and the
/// cells of earlier segments stay blocked. Fails unless the segments add up to
/// every cell.
fn join_segments(puzzle: &Puzzle) -> Option<Trace> {
    let checkpoints = puzzle.checkpoints();
    let mut blocked: Grid<bool> = Grid::with_dimensions(puzzle.rows(), puzzle.cols());
    for &(_, coord) in &checkpoints {
        blocked[coord] = true;
    }
    let (_, first) = checkpoints[0];
    let mut path = vec![first];
    for pair in checkpoints.windows(2) {
        let ((_, start), (value, end)) = (pair[0], pair[1]);
        blocked[end] = false;
        let segment = match find_segment(puzzle, start, end, &blocked) {
            Some(segment) => segment,
            None => {
                debug!("No segment to {} at {:?}", value, end);
                return None;
            }
        };
        for &coord in &segment {
            blocked[coord] = true;
        }
        path.extend_from_slice(&segment[1..]);
    }
    if path.len() == puzzle.cell_count() {
        Some(path)
    } else {
        trace!("Segments cover {} of {} cells", path.len(), puzzle.cell_count());
        None
    }
}

#[cfg(test)]
mod tests {
    use super::find_complete_path;
    use crate::collections::grid::Coord;
    use crate::generate::trace::is_full_trace;
    use crate::puzzle::Puzzle;

    #[test]
    fn segments_cover_line() {
        let mut puzzle = Puzzle::empty(1, 4);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(0, 3), Some(2));
        let path = find_complete_path(&puzzle).unwrap();
        assert!(is_full_trace(&path, 1, 4));
    }

    #[test]
    fn needs_exhaustive_search() {
        let mut puzzle = Puzzle::empty(3, 3);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(2, 2), Some(2));
        let path = find_complete_path(&puzzle).unwrap();
        assert!(is_full_trace(&path, 3, 3));
        assert_eq!(Coord::new(0, 0), path[0]);
        assert_eq!(Coord::new(2, 2), path[8]);
    }

    #[test]
    fn missing_number() {
        let mut puzzle = Puzzle::empty(3, 3);
        puzzle.set_value(Coord::new(0, 0), Some(1));
        puzzle.set_value(Coord::new(2, 2), Some(3));
        assert_eq!(None, find_complete_path(&puzzle));
        assert_eq!(None, find_complete_path(&Puzzle::empty(3, 3)));
    }
}
