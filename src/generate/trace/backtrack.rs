use rand::seq::SliceRandom;
use rand::Rng;

use crate::collections::branch::Branch;
use crate::collections::grid::{Coord, Direction, Grid};
use crate::error::SearchExhausted;
use crate::generate::trace::serpentine::{serpentine, serpentine_near};
use crate::generate::trace::parity_allows;
use crate::puzzle::Trace;

/// Searches from fresh starting states before giving up on a constraint
pub const MAX_ATTEMPTS: u32 = 10;

/// Cells visited per attempt before it is abandoned
pub const MAX_BACKTRACK_STEPS: u32 = 10_000;

/// Builds a full trace by depth-first search, optionally pinned to a start and an end.
///
/// Never fails. Exhausted attempts with a fixed end are retried once without it,
/// then the search falls back to the serpentine variant nearest `start`.
pub fn backtracking_trace<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    start: Option<Coord>,
    end: Option<Coord>,
    rng: &mut R,
) -> Trace {
    if rows == 1 || cols == 1 {
        return line_trace(rows, cols, start);
    }
    for attempt in 1..=MAX_ATTEMPTS {
        let start = start.unwrap_or_else(|| random_start(rows, cols, rng));
        let mut context = SearchContext::new(rows, cols, start, end, rng);
        match context.search() {
            Ok(true) => {
                debug!(
                    "Found trace from {:?} in {} steps (attempt {})",
                    start, context.steps, attempt
                );
                return context.trace;
            }
            Ok(false) => debug!("No trace from {:?} (attempt {})", start, attempt),
            Err(e) => debug!("Attempt {} from {:?}: {}", attempt, start, e),
        }
    }
    if let Some(end) = end {
        warn!(
            "Backtracking failed {} times with end {:?}, retrying without it",
            MAX_ATTEMPTS, end
        );
        return backtracking_trace(rows, cols, start, None, rng);
    }
    warn!(
        "Backtracking failed {} times on {}x{}, using serpentine trace",
        MAX_ATTEMPTS, rows, cols
    );
    match start {
        Some(start) => serpentine_near(rows, cols, start),
        None => serpentine(rows, cols),
    }
}

/// A single row or column only has one trace, up to direction
fn line_trace(rows: usize, cols: usize, start: Option<Coord>) -> Trace {
    let mut trace = serpentine(rows, cols);
    if start.is_some() && start == trace.last().copied() {
        trace.reverse();
    }
    trace
}

/// A uniformly random cell, moved to a neighbouring cell when it cannot begin a
/// full trace on an odd-sized grid
fn random_start<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Coord {
    let start = Coord::new(rng.gen_range(0, rows), rng.gen_range(0, cols));
    if (rows * cols) % 2 == 1 && !start.is_even() {
        let col = if start.col > 0 { start.col - 1 } else { start.col + 1 };
        return Coord::new(start.row, col);
    }
    start
}

struct SearchContext<'a, R: ?Sized> {
    visited: Grid<bool>,
    trace: Trace,
    end: Option<Coord>,
    steps: u32,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> SearchContext<'a, R> {
    fn new(rows: usize, cols: usize, start: Coord, end: Option<Coord>, rng: &'a mut R) -> Self {
        let mut visited = Grid::with_dimensions(rows, cols);
        visited[start] = true;
        let mut trace = Vec::with_capacity(rows * cols);
        trace.push(start);
        Self {
            visited,
            trace,
            end,
            steps: 0,
            rng,
        }
    }

    fn total(&self) -> usize {
        self.visited.len()
    }

    /// Extends the trace from its start until every cell is visited. Holds one
    /// `Branch` of untried neighbours per trace cell.
    fn search(&mut self) -> Result<bool, SearchExhausted> {
        let total = self.total();
        let start = self.trace[0];
        let mut branches = vec![Branch::new(self.candidates(start))];
        loop {
            let next = match branches.last_mut() {
                Some(branch) => branch.next_option(),
                None => return Ok(false),
            };
            let next = match next {
                Some(next) => next,
                None => {
                    branches.pop();
                    if !branches.is_empty() {
                        self.leave();
                    }
                    continue;
                }
            };
            if self.steps >= MAX_BACKTRACK_STEPS {
                return Err(SearchExhausted(MAX_BACKTRACK_STEPS));
            }
            self.steps += 1;
            self.visit(next);
            if self.trace.len() == total {
                if self.end.map_or(true, |end| end == next) {
                    return Ok(true);
                }
                self.leave();
            } else if self.end_out_of_reach(next) {
                self.leave();
            } else {
                branches.push(Branch::new(self.candidates(next)));
            }
        }
    }

    fn visit(&mut self, coord: Coord) {
        self.visited[coord] = true;
        self.trace.push(coord);
    }

    fn leave(&mut self) {
        if let Some(coord) = self.trace.pop() {
            self.visited[coord] = false;
        }
    }

    /// Near the end of a pinned search, the end must stay within the cells left
    fn end_out_of_reach(&self, current: Coord) -> bool {
        let total = self.total();
        let remaining = total - self.trace.len();
        match self.end {
            Some(end) => self.trace.len() + 3 >= total && current.manhattan(end) > remaining,
            None => false,
        }
    }

    /// Unvisited neighbours of `current` in the order they should be tried.
    ///
    /// Directions are shuffled first so that ties are broken randomly. Near the
    /// end of a pinned search, candidates closest to the end go first. Otherwise
    /// candidates with the fewest free neighbours go first.
    fn candidates(&mut self, current: Coord) -> Vec<Coord> {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut *self.rng);
        let (rows, cols) = (self.visited.rows(), self.visited.cols());
        let total = self.total();
        let is_last = self.trace.len() + 1 == total;
        let mut candidates: Vec<Coord> = directions
            .iter()
            .filter_map(|&d| current.step(d, rows, cols))
            .filter(|&c| !self.visited[c])
            // the end may only be entered as the final cell
            .filter(|&c| is_last || self.end != Some(c))
            .collect();
        match self.end {
            Some(end) if self.trace.len() + (rows + cols).max(5) >= total => {
                candidates.sort_by_key(|c| c.manhattan(end));
            }
            _ => candidates.sort_by_key(|&c| self.free_neighbors(c)),
        }
        candidates
    }

    fn free_neighbors(&self, coord: Coord) -> usize {
        self.visited
            .neighbors(coord)
            .filter(|&n| !self.visited[n])
            .count()
    }
}

/// true if a trace starting at `start` and ending at `end` might cover the grid
pub(crate) fn endpoints_feasible(rows: usize, cols: usize, start: Coord, end: Coord) -> bool {
    if rows == 1 || cols == 1 {
        let last = Coord::new(rows - 1, cols - 1);
        return (start == Coord::new(0, 0) && end == last)
            || (start == last && end == Coord::new(0, 0));
    }
    parity_allows(rows, cols, start, end)
}
