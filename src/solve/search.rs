use rand::seq::SliceRandom;

use crate::collections::branch::Branch;
use crate::collections::grid::{Coord, Grid};
use crate::error::SearchExhausted;
use crate::generate::trace::parity_allows;
use crate::puzzle::{Puzzle, Trace, Value};
use crate::random::DailyRng;

/// Cells visited across all runs of one path search
pub const MAX_SEARCH_STEPS: u32 = 1_000_000;

/// Budget of the first run. Each restart doubles it.
const FIRST_RUN_STEPS: u32 = 5_000;

pub(crate) enum SearchResult {
    Found(Trace),
    NoPath,
}

/// Depth-first search for a path that starts on 1, meets the numbers in order and
/// covers every cell. With two or more numbers the path must end on the largest.
///
/// Runs restart with a fresh tie-break order and a doubled budget until the
/// total budget is spent. A run that finishes without a path is definitive.
pub(crate) fn search_path(
    puzzle: &Puzzle,
    start: Coord,
    max_value: Value,
) -> Result<SearchResult, SearchExhausted> {
    let (rows, cols) = (puzzle.rows(), puzzle.cols());
    let terminus = if max_value >= 2 {
        puzzle.position_of(max_value)
    } else {
        None
    };
    let parity_ok = match terminus {
        Some(end) => parity_allows(rows, cols, start, end),
        None => (rows * cols) % 2 == 0 || start.is_even(),
    };
    if !parity_ok {
        debug!("Endpoints of the path have the wrong colours");
        return Ok(SearchResult::NoPath);
    }
    let checkpoints: Vec<Coord> = puzzle
        .checkpoints()
        .into_iter()
        .filter(|&(value, _)| value <= max_value)
        .map(|(_, coord)| coord)
        .collect();
    let mut remaining = MAX_SEARCH_STEPS;
    let mut run_steps = FIRST_RUN_STEPS;
    let mut run = 0;
    while remaining > 0 {
        let max_steps = run_steps.min(remaining);
        let mut context = SearchContext::new(puzzle, &checkpoints, start, terminus, max_steps, run);
        match context.search() {
            Ok(true) => {
                debug!("Path search found a path in run {} after {} steps", run, context.steps);
                return Ok(SearchResult::Found(context.path));
            }
            Ok(false) => {
                debug!("Path search ruled out a path in run {} after {} steps", run, context.steps);
                return Ok(SearchResult::NoPath);
            }
            Err(e) => trace!("Run {}: {}", run, e),
        }
        remaining -= max_steps;
        run_steps = run_steps.saturating_mul(2);
        run += 1;
    }
    Err(SearchExhausted(MAX_SEARCH_STEPS))
}

struct SearchContext<'a> {
    puzzle: &'a Puzzle,
    /// numbered cells, the cell of value `v` at index `v - 1`
    checkpoints: &'a [Coord],
    visited: Grid<bool>,
    path: Trace,
    next_value: Value,
    terminus: Option<Coord>,
    steps: u32,
    max_steps: u32,
    rng: DailyRng,
}

impl<'a> SearchContext<'a> {
    fn new(
        puzzle: &'a Puzzle,
        checkpoints: &'a [Coord],
        start: Coord,
        terminus: Option<Coord>,
        max_steps: u32,
        run: i64,
    ) -> Self {
        let (rows, cols) = (puzzle.rows(), puzzle.cols());
        let mut context = Self {
            puzzle,
            checkpoints,
            visited: Grid::with_dimensions(rows, cols),
            path: Vec::with_capacity(rows * cols),
            next_value: 1,
            terminus,
            steps: 0,
            max_steps,
            rng: DailyRng::new(run),
        };
        context.visit(start);
        context
    }

    fn search(&mut self) -> Result<bool, SearchExhausted> {
        let total = self.visited.len();
        if self.path.len() == total {
            return Ok(true);
        }
        let start = self.path[0];
        if !self.is_promising(start) {
            return Ok(false);
        }
        let mut branches = vec![Branch::new(self.candidates(start))];
        while let Some(branch) = branches.last_mut() {
            let next = match branch.next_option() {
                Some(next) => next,
                None => {
                    branches.pop();
                    if !branches.is_empty() {
                        self.leave();
                    }
                    continue;
                }
            };
            if self.steps >= self.max_steps {
                return Err(SearchExhausted(self.max_steps));
            }
            self.steps += 1;
            self.visit(next);
            if self.path.len() == total {
                return Ok(true);
            }
            if !self.is_promising(next) {
                self.leave();
                continue;
            }
            let candidates = self.candidates(next);
            branches.push(Branch::new(candidates));
        }
        Ok(false)
    }

    fn visit(&mut self, coord: Coord) {
        self.visited[coord] = true;
        self.path.push(coord);
        if self.puzzle.value(coord).is_some() {
            self.next_value += 1;
        }
    }

    fn leave(&mut self) {
        if let Some(coord) = self.path.pop() {
            self.visited[coord] = false;
            if self.puzzle.value(coord).is_some() {
                self.next_value -= 1;
            }
        }
    }

    fn next_checkpoint(&self) -> Option<Coord> {
        self.checkpoints.get(self.next_value as usize - 1).copied()
    }

    /// Cells that may follow `current`, fewest onward moves first, then nearest
    /// to the next number. Ties are broken by the run's random order.
    fn candidates(&mut self, current: Coord) -> Vec<Coord> {
        let is_last = self.path.len() + 1 == self.visited.len();
        let mut candidates: Vec<Coord> = self
            .visited
            .neighbors(current)
            .filter(|&c| !self.visited[c])
            .filter(|&c| match self.puzzle.value(c) {
                None => true,
                Some(v) => v == self.next_value && (is_last || Some(c) != self.terminus),
            })
            .collect();
        candidates.shuffle(&mut self.rng);
        let target = self.next_checkpoint();
        candidates.sort_by_key(|&c| {
            let distance = target.map_or(0, |t| c.manhattan(t));
            (self.open_neighbors(c, None), distance)
        });
        candidates
    }

    fn open_neighbors(&self, coord: Coord, head: Option<Coord>) -> usize {
        self.visited
            .neighbors(coord)
            .filter(|&n| !self.visited[n] || Some(n) == head)
            .count()
    }

    fn is_promising(&self, head: Coord) -> bool {
        self.remaining_is_coverable(head) && self.checkpoints_reachable(head)
    }

    /// Prunes states where the unvisited cells cannot all be covered: they must
    /// be connected to `current`, and every cell except the final one needs two
    /// open sides.
    fn remaining_is_coverable(&self, current: Coord) -> bool {
        let unvisited = self.visited.len() - self.path.len();
        let mut seen = Grid::with_dimensions(self.visited.rows(), self.visited.cols());
        let mut stack = vec![current];
        seen[current] = true;
        let mut reached = 0;
        while let Some(coord) = stack.pop() {
            for n in self.visited.neighbors(coord) {
                if !seen[n] && !self.visited[n] {
                    seen[n] = true;
                    reached += 1;
                    stack.push(n);
                }
            }
        }
        if reached != unvisited {
            return false;
        }
        let mut dead_ends = 0;
        for (coord, &visited) in self.visited.iter_coord() {
            if visited {
                continue;
            }
            let open = self.open_neighbors(coord, Some(current));
            if Some(coord) == self.terminus {
                if open == 0 {
                    return false;
                }
            } else if open < 2 {
                dead_ends += 1;
                // only an unpinned path may end in a dead end
                if self.terminus.is_some() || dead_ends > 1 {
                    return false;
                }
            }
        }
        true
    }

    /// Each remaining number must be reachable from the one before it (or from
    /// `head`) through unvisited unnumbered cells.
    fn checkpoints_reachable(&self, head: Coord) -> bool {
        let first = self.next_value as usize - 1;
        if first >= self.checkpoints.len() {
            return true;
        }
        let regions = self.empty_regions();
        let mut from = head;
        for &to in &self.checkpoints[first..] {
            if !from.is_adjacent(to) && !self.share_region(&regions, from, to) {
                trace!("Number at {:?} is cut off from {:?}", to, from);
                return false;
            }
            from = to;
        }
        true
    }

    /// Labels connected regions of unvisited unnumbered cells, 0 for other cells
    fn empty_regions(&self) -> Grid<usize> {
        let mut labels: Grid<usize> = Grid::with_dimensions(self.visited.rows(), self.visited.cols());
        let is_open = |c: Coord| !self.visited[c] && self.puzzle.value(c).is_none();
        let mut next_label = 0;
        let mut stack = Vec::new();
        for coord in self.visited.coords() {
            if labels[coord] != 0 || !is_open(coord) {
                continue;
            }
            next_label += 1;
            labels[coord] = next_label;
            stack.push(coord);
            while let Some(c) = stack.pop() {
                for n in self.visited.neighbors(c) {
                    if labels[n] == 0 && is_open(n) {
                        labels[n] = next_label;
                        stack.push(n);
                    }
                }
            }
        }
        labels
    }

    fn share_region(&self, regions: &Grid<usize>, a: Coord, b: Coord) -> bool {
        let around_a: Vec<usize> = self
            .visited
            .neighbors(a)
            .map(|n| regions[n])
            .filter(|&label| label != 0)
            .collect();
        self.visited
            .neighbors(b)
            .any(|n| regions[n] != 0 && around_a.contains(&regions[n]))
    }
}
