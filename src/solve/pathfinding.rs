use std::collections::VecDeque;

use crate::collections::grid::{Coord, Grid};
use crate::puzzle::{Puzzle, Trace};

/// Segments longer than this, measured in Manhattan distance, are rejected by
/// `connects` without searching
pub const DEFAULT_MAX_SEGMENT_DISTANCE: usize = 8;

/// How `connects_with` decides reachability
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reachability {
    /// Pairs farther apart than the bound never connect
    Bounded(usize),
    /// Plain breadth-first search
    Exact,
}

impl Default for Reachability {
    fn default() -> Self {
        Reachability::Bounded(DEFAULT_MAX_SEGMENT_DISTANCE)
    }
}

/// true if a path from `start` can reach `end` through empty cells, using the
/// default distance bound
pub fn connects(puzzle: &Puzzle, start: Coord, end: Coord) -> bool {
    connects_with(puzzle, start, end, Reachability::default())
}

pub fn connects_with(puzzle: &Puzzle, start: Coord, end: Coord, reachability: Reachability) -> bool {
    if !puzzle.contains(start) || !puzzle.contains(end) {
        return false;
    }
    if let Reachability::Bounded(max) = reachability {
        if start.manhattan(end) > max {
            return false;
        }
    }
    if blocks_first_segment(puzzle, start, end) {
        return false;
    }
    let blocked = Grid::with_dimensions(puzzle.rows(), puzzle.cols());
    find_segment(puzzle, start, end, &blocked).is_some()
}

/// From 1 to 2, a 3 inside their bounding rectangle must sit next to 2.
/// Otherwise it splits the first segment from the rest of the path.
fn blocks_first_segment(puzzle: &Puzzle, start: Coord, end: Coord) -> bool {
    if puzzle.value(start) != Some(1) || puzzle.value(end) != Some(2) {
        return false;
    }
    let three = match puzzle.position_of(3) {
        Some(coord) => coord,
        None => return false,
    };
    let rows = start.row.min(end.row)..=start.row.max(end.row);
    let cols = start.col.min(end.col)..=start.col.max(end.col);
    rows.contains(&three.row) && cols.contains(&three.col) && end.manhattan(three) > 1
}

/// Shortest path from `start` to `end` by breadth-first search.
///
/// Steps only onto cells that are not `blocked` and are either empty or `end`
/// itself. The returned segment includes both endpoints.
pub(crate) fn find_segment(
    puzzle: &Puzzle,
    start: Coord,
    end: Coord,
    blocked: &Grid<bool>,
) -> Option<Trace> {
    let mut visited = blocked.clone();
    let mut parents: Grid<Option<Coord>> = Grid::with_dimensions(puzzle.rows(), puzzle.cols());
    let mut queue = VecDeque::new();
    visited[start] = true;
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        if current == end {
            return Some(reconstruct(&parents, start, end));
        }
        for next in visited.neighbors(current).collect::<Vec<_>>() {
            if visited[next] || (puzzle.value(next).is_some() && next != end) {
                continue;
            }
            visited[next] = true;
            parents[next] = Some(current);
            queue.push_back(next);
        }
    }
    None
}

fn reconstruct(parents: &Grid<Option<Coord>>, start: Coord, end: Coord) -> Trace {
    let mut segment = vec![end];
    let mut current = end;
    while current != start {
        match parents[current] {
            Some(parent) => current = parent,
            None => break,
        }
        segment.push(current);
    }
    segment.reverse();
    segment
}
